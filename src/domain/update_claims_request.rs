use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `PUT /claims`. `ssid` must name the session the request is bound to.
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateClaimsRequestBody {
    pub ssid: String,
    pub data: HashMap<String, String>,
}
