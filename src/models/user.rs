use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Anything other than the literal `"admin"`, including no role at all, is a customer.
    pub fn from_stored(role: Option<&str>) -> Self {
        match role {
            Some(ADMIN_ROLE) => Role::Admin,
            _ => Role::Customer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_stored(self.role.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_literal_admin_is_admin() {
        assert_eq!(Role::from_stored(Some("admin")), Role::Admin);
        assert_eq!(Role::from_stored(Some("Admin")), Role::Customer);
        assert_eq!(Role::from_stored(Some("editor")), Role::Customer);
        assert_eq!(Role::from_stored(None), Role::Customer);
    }

    #[test]
    fn test_new_user_never_carries_a_role() {
        let body = serde_json::json!({
            "email": "guest@bistro.test",
            "name": "Guest",
            "role": "admin"
        });
        let user: NewUser = serde_json::from_value(body).unwrap();
        let stored = mongodb::bson::to_document(&user).unwrap();

        assert!(!stored.contains_key("role"));
        assert_eq!(stored.get_str("email").unwrap(), "guest@bistro.test");
    }
}
