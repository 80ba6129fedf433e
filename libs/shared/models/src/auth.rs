use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Payload of an access token. Tokens are bound to an email and always carry an expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
}

/// A row of the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse<R> {
    pub result: R,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_gates_admin() {
        let mut user: User = serde_json::from_value(json!({ "email": "a@x.com" })).unwrap();
        assert!(!user.is_admin());

        user.role = Some("member".to_string());
        assert!(!user.is_admin());

        user.role = Some(ADMIN_ROLE.to_string());
        assert!(user.is_admin());
    }
}
