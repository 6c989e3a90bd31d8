use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Value};
use sha2::{Digest, Sha512};
use std::{
    convert::Infallible,
    ops::{Deref, DerefMut},
    sync::Arc,
};

use crate::services::AppState;

pub const SESSION_COOKIE_NAME: &str = "fg_session";

/// Derives the cookie signing key from the configured secret.
///
/// `Key::from` wants 64 bytes of key material, which is exactly one SHA-512
/// digest, so any secret length works.
pub fn derive_session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Per-user key/value state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    values: Map<String, Value>,
    modified: bool,
}

impl Session {
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            values,
            modified: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if self.values.get(&key) != Some(&value) {
            self.values.insert(key, value);
            self.modified = true;
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn decode(raw: &str) -> Option<Self> {
        let bytes = general_purpose::URL_SAFE_NO_PAD.decode(raw).ok()?;
        let values = serde_json::from_slice::<Map<String, Value>>(&bytes).ok()?;
        Some(Self::from_values(values))
    }

    fn encode(&self) -> String {
        let json = Value::Object(self.values.clone()).to_string();
        general_purpose::URL_SAFE_NO_PAD.encode(json)
    }
}

/// Session state carried in a signed cookie.
///
/// Extracting it never fails: a missing, tampered or unreadable cookie gives
/// an empty session. Returning it as part of a response writes the cookie back
/// when the session changed.
pub struct UserSession {
    jar: SignedCookieJar,
    session: Session,
    secure: bool,
}

impl UserSession {
    pub fn from_jar(jar: SignedCookieJar, secure: bool) -> Self {
        let session = match jar.get(SESSION_COOKIE_NAME) {
            Some(cookie) => Session::decode(cookie.value()).unwrap_or_else(|| {
                tracing::debug!("Discarding unreadable session cookie");
                Session::default()
            }),
            None => Session::default(),
        };

        Self {
            jar,
            session,
            secure,
        }
    }

    pub fn into_jar(self) -> SignedCookieJar {
        if !self.session.is_modified() {
            return self.jar;
        }

        let cookie = Cookie::build((SESSION_COOKIE_NAME, self.session.encode()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();

        self.jar.add(cookie)
    }
}

impl Deref for UserSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for UserSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}

impl FromRequestParts<Arc<AppState>> for UserSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.session_key.clone());
        Ok(Self::from_jar(jar, state.config.cookie_secure))
    }
}

impl IntoResponseParts for UserSession {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}
