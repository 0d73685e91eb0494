//! User records.

use serde::{Deserialize, Serialize};

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload accepted by `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    /// Unique across users when present.
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_email_serializes_minimal_body() {
        let user = User {
            id: "abc".to_string(),
            name: "Ada".to_string(),
            email: None,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": "abc", "name": "Ada"})
        );
    }

    #[test]
    fn test_new_user_requires_name() {
        let result: Result<NewUser, _> = serde_json::from_str(r#"{"email":"ada@example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_user_email_is_optional() {
        let payload: NewUser = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(payload, NewUser::new("Ada"));
    }
}
