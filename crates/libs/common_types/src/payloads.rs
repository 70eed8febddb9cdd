use crate::{MediaKind, Memory};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct MemoriesPayload {
    #[serde(default)]
    pub memories: Vec<Memory>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicUrlPayload {
    #[serde(default)]
    pub music_url: String,
}

/// Reply of the write endpoints that accept a payload but do not store it.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Reply of the legacy file-backed store.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub file_name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// A signed admin session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub access_token: String,
    /// Unix seconds.
    pub expiry: i64,
}

/// Represents the claims contained within a session JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String, // Subject, always the admin role
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
}
