use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// Identity carried inside the signed credentials.
///
/// Two `Claims` are the same session when their SSIDs match; a user can hold
/// several concurrent sessions, so `user_id` takes no part in equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub ssid: String,
    /// Small, low-churn values embedded in the token (e.g. role).
    pub data: HashMap<String, String>,
}

impl Claims {
    pub fn new(
        user_id: impl Into<String>,
        ssid: impl Into<String>,
        data: HashMap<String, String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            ssid: ssid.into(),
            data,
        }
    }

    pub fn get(&self, key: &str) -> Result<&str, SessionError> {
        self.data
            .get(key)
            .map(String::as_str)
            .ok_or(SessionError::KeyNotFound)
    }
}

impl PartialEq for Claims {
    fn eq(&self, other: &Self) -> bool {
        self.ssid == other.ssid
    }
}

impl Eq for Claims {}

impl Hash for Claims {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ssid.hash(state);
    }
}
