use crate::utils::error::AppError;
use mongodb::bson::oid::ObjectId;

/// Parses a path id into an `ObjectId`, rejecting anything that is not 24 hex chars.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("invalid id: {}", id)))
}

/// Best-effort conversion for id lists. Malformed entries are logged and skipped.
pub fn parse_object_ids(ids: &[String]) -> Vec<ObjectId> {
    ids.iter()
        .filter_map(|id| match ObjectId::parse_str(id) {
            Ok(oid) => Some(oid),
            Err(_) => {
                log::warn!("⚠️ Skipping malformed id: {}", id);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(parse_object_id("not-an-id").is_err());
        assert!(parse_object_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }

    #[test]
    fn test_parse_object_ids_skips_malformed() {
        let ids = vec![
            "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            "oops".to_string(),
            "65a1f0c2e4b0a1b2c3d4e5f7".to_string(),
        ];
        let parsed = parse_object_ids(&ids);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].to_hex(), "65a1f0c2e4b0a1b2c3d4e5f7");
    }
}
