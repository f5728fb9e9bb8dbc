use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload shared by access and refresh credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // User ID
    pub sid: String, // Session ID (SSID)
    #[serde(default)]
    pub data: HashMap<String, String>,
    pub typ: TokenKind,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

impl TokenClaims {
    pub fn into_claims(self) -> Claims {
        Claims::new(self.sub, self.sid, self.data)
    }
}
