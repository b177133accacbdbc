//! Session context
//!
//! The signed-in user is carried as an explicit value instead of being read
//! from ambient storage. Its JSON form is the object the login page stores
//! under the `user` key: `{"type": "Employee", "email": "a@a"}`.

use serde::{Deserialize, Serialize};

use crate::core::error::SessionError;

/// Kind of account behind a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
    User,
}

impl UserType {
    /// Employees and plain users share the employee pages
    pub fn is_employee(&self) -> bool {
        matches!(self, UserType::Employee | UserType::User)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin)
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,

    #[serde(default)]
    pub email: String,
}

impl Session {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
        }
    }

    /// Parse the stored `user` object
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        serde_json::from_str(raw).map_err(|e| SessionError::Malformed {
            message: e.to_string(),
        })
    }

    /// The `user` object as stored at login
    pub fn to_json(&self) -> String {
        // A unit enum and a string: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_employee_session() {
        let session = Session::from_json(r#"{"type":"Employee","email":"a@a"}"#).unwrap();
        assert_eq!(session.user_type, UserType::Employee);
        assert_eq!(session.email, "a@a");
        assert!(session.user_type.is_employee());
    }

    #[test]
    fn test_email_defaults_to_empty() {
        let session = Session::from_json(r#"{"type":"Admin"}"#).unwrap();
        assert!(session.user_type.is_admin());
        assert!(session.email.is_empty());
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let err = Session::from_json(r#"{"type":"Guest"}"#).unwrap_err();
        assert!(matches!(err, SessionError::Malformed { .. }));
    }

    #[test]
    fn test_json_roundtrip_uses_type_key() {
        let session = Session::new(UserType::User, "a@a");
        assert_eq!(session.to_json(), r#"{"type":"User","email":"a@a"}"#);
    }
}
