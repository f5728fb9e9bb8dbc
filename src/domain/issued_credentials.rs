use std::convert::Infallible;

use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::CookieJar;

use crate::utils::{
    access_cookie, refresh_cookie, ACCESS_TOKEN_RESPONSE_HEADER, REFRESH_TOKEN_RESPONSE_HEADER,
};

/// One freshly minted credential plus how it should be delivered as a cookie.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub cookie_name: String,
    pub ttl_seconds: i64,
}

/// Credentials produced by a provider operation, written back to the client.
///
/// Renewal and claim updates only carry a new access credential; the refresh
/// credential is issued once, at session creation.
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    pub ssid: String,
    pub access: Credential,
    pub refresh: Option<Credential>,
}

impl IssuedCredentials {
    pub fn access_token(&self) -> &str {
        &self.access.token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_ref().map(|c| c.token.as_str())
    }

    pub fn apply_to(&self, jar: CookieJar) -> CookieJar {
        let jar = jar.add(access_cookie(
            &self.access.cookie_name,
            &self.access.token,
            self.access.ttl_seconds,
        ));
        match &self.refresh {
            Some(refresh) => jar.add(refresh_cookie(
                &refresh.cookie_name,
                &refresh.token,
                refresh.ttl_seconds,
            )),
            None => jar,
        }
    }
}

impl IntoResponseParts for IssuedCredentials {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let mut res = self.apply_to(CookieJar::new()).into_response_parts(res)?;

        // JWTs are plain base64url + dots, so these never fail in practice.
        match HeaderValue::from_str(&self.access.token) {
            Ok(value) => {
                res.headers_mut().insert(ACCESS_TOKEN_RESPONSE_HEADER, value);
            }
            Err(e) => log::warn!(
                "session {}: access credential not sent as {ACCESS_TOKEN_RESPONSE_HEADER}: {e}",
                self.ssid
            ),
        }
        if let Some(refresh) = &self.refresh {
            match HeaderValue::from_str(&refresh.token) {
                Ok(value) => {
                    res.headers_mut().insert(REFRESH_TOKEN_RESPONSE_HEADER, value);
                }
                Err(e) => log::warn!(
                    "session {}: refresh credential not sent as {REFRESH_TOKEN_RESPONSE_HEADER}: {e}",
                    self.ssid
                ),
            }
        }
        Ok(res)
    }
}
