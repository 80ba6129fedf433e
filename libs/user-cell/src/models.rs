use serde::{Deserialize, Serialize};

/// Profile fields a client may set when signing in.
///
/// Has no `role` field: a `role` key in the request body is dropped during
/// deserialization, so sign-in cannot change a user's role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatus {
    pub admin: bool,
}
