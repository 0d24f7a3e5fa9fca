//! Request-shape validation helpers shared by the handlers.

use crate::domain::Error;

/// Reject non-positive identifiers arriving as path parameters.
pub fn positive_id(id: i64) -> Result<i64, Error> {
    if id > 0 {
        Ok(id)
    } else {
        Err(Error::invalid_input("identifier must be a positive integer"))
    }
}

/// Parse the `ingredient_ids` query parameter: a comma-separated list of
/// positive integers. Tokens are trimmed and empty tokens skipped; any
/// malformed or non-positive token fails the whole list, as does an empty
/// effective list.
pub fn parse_ingredient_ids(raw: &str) -> Result<Vec<i64>, Error> {
    let mut ids = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let id: i64 = token
            .parse()
            .map_err(|_| Error::invalid_input(format!("invalid ingredient id: {token}")))?;
        if id <= 0 {
            return Err(Error::invalid_input(format!(
                "ingredient ids must be positive: {id}"
            )));
        }
        ids.push(id);
    }
    if ids.is_empty() {
        return Err(Error::invalid_input("ingredient_ids must not be empty"));
    }
    Ok(ids)
}
