//! Wire DTOs for the shortener API.
//!
//! Success bodies are decoded tolerantly: the reference backend returns bare
//! strings or one-element arrays where a richer API returns objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenRequest<'a> {
    pub url: &'a str,
}

/// Body of a successful `POST /shorten`.
///
/// Variant order matters: objects would also match from a sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShortenResponse {
    Bare(String),
    List(Vec<String>),
    Object {
        #[serde(alias = "shortCode", default)]
        short_code: Option<String>,
    },
}

impl ShortenResponse {
    /// Issued short code, empty when the body carried none.
    pub fn into_short_code(self) -> String {
        match self {
            Self::Bare(code) => code,
            Self::List(codes) => codes.into_iter().next().unwrap_or_default(),
            Self::Object { short_code } => short_code.unwrap_or_default(),
        }
    }
}

/// Body of a successful `GET /{code}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LongUrlResponse {
    Bare(String),
    List(Vec<String>),
    Object {
        #[serde(alias = "longUrl", default)]
        long_url: Option<String>,
    },
}

impl LongUrlResponse {
    /// Destination URL, empty when the body carried none.
    pub fn into_long_url(self) -> String {
        match self {
            Self::Bare(url) => url,
            Self::List(urls) => urls.into_iter().next().unwrap_or_default(),
            Self::Object { long_url } => long_url.unwrap_or_default(),
        }
    }
}

/// Body of a successful `GET /get-qr-code/{url}`.
#[derive(Debug, Deserialize)]
pub struct QrCodeResponse {
    #[serde(alias = "imageBase64", default)]
    pub image_base64: Option<String>,
}

/// Error body, `{"detail": ...}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Extracts a human-readable detail from a raw error body.
    ///
    /// A string `detail` is used verbatim, any other JSON `detail` as its JSON
    /// text. A non-JSON body is used as plain text.
    pub fn detail_from(body: &str) -> Option<String> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: Some(Value::String(detail)),
            }) => Some(detail),
            Ok(ErrorBody {
                detail: Some(Value::Null) | None,
            }) => None,
            Ok(ErrorBody {
                detail: Some(other),
            }) => Some(other.to_string()),
            Err(_) if serde_json::from_str::<Value>(body).is_ok() => None,
            Err(_) => Some(body.to_string()),
        }
    }
}
