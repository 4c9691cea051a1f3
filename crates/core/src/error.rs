use crate::types::DbId;

/// Domain errors raised while reading and shaping memorial data.
///
/// Data anomalies (missing dates, orphaned comments, dangling media ids) are
/// not errors; they are absorbed by the shaping code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A requested record does not exist or is not publicly visible.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A client-supplied filter or parameter was rejected.
    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Fallen",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Fallen with id 7");
    }
}
