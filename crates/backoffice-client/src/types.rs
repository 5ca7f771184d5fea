//! Request and response types for the admin API.
//!
//! The API speaks camelCase JSON; ids are opaque strings (GUIDs server-side).

use serde::{Deserialize, Serialize};

/// Identifier used by every resource.
pub type Id = String;

// ─────────────────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────────────────

/// A role as embedded in a user and as returned by `/roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    #[serde(default)]
    pub user_name: Option<String>,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub mother_maiden_name: Option<String>,
    /// ISO 8601 date.
    pub date_of_birth: String,
    pub email: String,
    #[serde(default)]
    pub hashed_password: String,
    pub role_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    /// "First Last", including the middle name when present.
    pub fn display_name(&self) -> String {
        match &self.middle_name {
            Some(middle) if !middle.is_empty() => {
                format!("{} {} {}", self.first_name, middle, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Name of the embedded role, if the server included it.
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }
}

/// Request to create a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub user_name: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub mother_maiden_name: Option<String>,
    pub date_of_birth: String,
    pub email: String,
    pub hashed_password: String,
    pub role_id: Id,
}

/// Partial update for a user; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_maiden_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashed_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Id>,
}

impl UserUpdate {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.first_name.is_none()
            && self.middle_name.is_none()
            && self.last_name.is_none()
            && self.mother_maiden_name.is_none()
            && self.date_of_birth.is_none()
            && self.email.is_none()
            && self.hashed_password.is_none()
            && self.role_id.is_none()
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Payload posted to `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username_or_email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of the login and register endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_wire_format() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "userName": null,
            "firstName": "Ana",
            "middleName": "María",
            "lastName": "López",
            "motherMaidenName": null,
            "dateOfBirth": "1990-04-01",
            "email": "ana@example.com",
            "hashedPassword": "x",
            "roleId": "r1",
            "role": { "id": "r1", "name": "admin", "description": null }
        }))
        .unwrap();

        assert_eq!(user.display_name(), "Ana María López");
        assert_eq!(user.role_name(), Some("admin"));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = UserUpdate {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "email": "new@example.com" })
        );
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_login_request_is_camel_case() {
        let req = LoginRequest {
            username_or_email: "ana".into(),
            password: "pw".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "usernameOrEmail": "ana", "password": "pw" })
        );
    }

    #[test]
    fn test_auth_response_tolerates_missing_fields() {
        let resp: AuthResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.token.is_none());
        assert!(resp.user.is_none());
    }
}
