//! Helper macro generating the port error enums.

/// Expand a port error enum plus snake_case constructor functions.
///
/// Every variant is either a unit (`Variant => "msg"`) or carries one
/// detail field (`Variant { message: String } => "msg: {message}"`); the
/// generated constructor takes `impl Into<_>` so adapters can pass `&str`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $field:ident : $ty:ty } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field : $ty } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $field : $ty } )?);
            )*
        }
    };

    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $field:ident : $ty:ty }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Foo { message: String } => "foo: {message}",
            Bar => "bar",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::foo("hello");
        assert_eq!(err.to_string(), "foo: hello");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExamplePortError::bar().to_string(), "bar");
    }
}
