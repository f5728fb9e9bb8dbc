use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /login`. The caller has already authenticated the user.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequestBody {
    pub user_id: String,
    #[serde(default)]
    pub jwt_data: HashMap<String, String>,
    #[serde(default)]
    pub session_data: HashMap<String, String>,
}
