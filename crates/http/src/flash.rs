//! One-shot flash notifications carried in a cookie.
//!
//! A redirect attaches the message; the next rendered page consumes it and
//! clears the cookie. The payload is base64-encoded so the message text
//! never has to be cookie-safe itself.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::convert::Infallible;

const COOKIE_NAME: &str = "flash";
const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        let payload = format!("{}:{}", self.level.as_str(), self.message);
        URL_SAFE_NO_PAD.encode(payload)
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let payload = String::from_utf8(bytes).ok()?;
        let (level, message) = payload.split_once(':')?;
        Some(Self {
            level: FlashLevel::parse(level)?,
            message: message.to_string(),
        })
    }

    fn cookie(&self) -> String {
        format!("{}={}; Path=/; HttpOnly", COOKIE_NAME, self.encode())
    }
}

/// Extractor yielding the pending flash message, if any.
#[derive(Debug, Default)]
pub struct Flash(Option<FlashMessage>);

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.0.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash(from_headers(&parts.headers)))
    }
}

fn from_headers(headers: &HeaderMap) -> Option<FlashMessage> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| FlashMessage::decode(value))
}

/// Redirect carrying a flash message for the next page.
pub fn flash_redirect(to: &str, flash: FlashMessage) -> Response {
    let mut response = Redirect::to(to).into_response();
    if let Ok(value) = HeaderValue::from_str(&flash.cookie()) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

/// Render an HTML page, clearing the flash cookie when one was consumed.
pub fn rendered(body: String, consumed_flash: bool) -> Response {
    let mut response = axum::response::Html(body).into_response();
    if consumed_flash {
        response
            .headers_mut()
            .append(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
    }
    response
}
