use jsonwebtoken::{DecodingKey, EncodingKey};
use std::collections::HashMap;

use crate::errors::SessionError;

/// HS256 key ring: one active key signs, every listed key verifies.
#[derive(Clone)]
pub struct JwtKeyStore {
    active_kid: String,
    keys: HashMap<String, Vec<u8>>,
}

impl JwtKeyStore {
    pub fn from_config(jwt_keys: &[(String, Vec<u8>)], jwt_active_kid: &str) -> Self {
        Self {
            active_kid: jwt_active_kid.to_string(),
            keys: jwt_keys.iter().cloned().collect(),
        }
    }

    pub fn encoding_key_and_kid(&self) -> Result<(EncodingKey, &str), SessionError> {
        let secret = self.keys.get(&self.active_kid).ok_or_else(|| {
            SessionError::SigningFailure(format!("active kid {} not in key ring", self.active_kid))
        })?;
        Ok((EncodingKey::from_secret(secret), &self.active_kid))
    }

    /// Tokens without a `kid` are checked against the active key.
    pub fn decoding_key_for_kid(&self, kid: Option<&str>) -> Option<DecodingKey> {
        let k = kid.unwrap_or(&self.active_kid);
        self.keys.get(k).map(|s| DecodingKey::from_secret(s))
    }
}
