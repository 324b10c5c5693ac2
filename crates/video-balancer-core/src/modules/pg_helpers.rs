//! Helper functions for PostgreSQL repository operations.

use video_balancer_types::{RepositoryError, RoutingSettings};

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(db_err.message().to_string());
        }
    }
    RepositoryError::Database(err.to_string())
}

pub(crate) fn ratio_to_db(ratio: u32) -> Result<i32, RepositoryError> {
    i32::try_from(ratio)
        .map_err(|_| RepositoryError::Serialization(format!("ratio {} out of range", ratio)))
}

pub(crate) fn ratio_from_db(ratio: i32) -> Result<u32, RepositoryError> {
    u32::try_from(ratio)
        .ok()
        .filter(|r| *r >= 1)
        .ok_or_else(|| RepositoryError::Serialization(format!("stored ratio {} is invalid", ratio)))
}

/// Convert a `(host, ratio)` row into settings.
pub(crate) fn row_to_settings((host, ratio): (String, i32)) -> Result<RoutingSettings, RepositoryError> {
    Ok(RoutingSettings { host, ratio: ratio_from_db(ratio)? })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_conversion() {
        assert_eq!(ratio_to_db(30).unwrap(), 30);
        assert!(ratio_to_db(u32::MAX).is_err());
        assert_eq!(ratio_from_db(5).unwrap(), 5);
        assert!(ratio_from_db(0).is_err());
        assert!(ratio_from_db(-3).is_err());
    }

    #[test]
    fn test_non_database_error_maps_to_database() {
        let err = map_sqlx_err(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
