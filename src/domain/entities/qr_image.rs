//! QR code image payload.

use base64::{Engine, engine::general_purpose::STANDARD};

/// A QR code as returned by the encode endpoint.
///
/// The payload is kept exactly as received, usually a
/// `data:image/png;base64,...` URI ready for an `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    payload: String,
}

impl QrImage {
    /// Accepts a payload if it is well-formed.
    ///
    /// Well-formed means non-empty with a base64 body that decodes, either
    /// after the comma of a `data:` URI or as a whole.
    pub fn parse(payload: impl Into<String>) -> Option<Self> {
        let payload = payload.into();
        let image = Self { payload };

        match image.decode() {
            Some(bytes) if !bytes.is_empty() => Some(image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.payload
    }

    pub fn into_inner(self) -> String {
        self.payload
    }

    /// Decoded image bytes (PNG for the reference backend).
    pub fn bytes(&self) -> Vec<u8> {
        self.decode().unwrap_or_default()
    }

    fn decode(&self) -> Option<Vec<u8>> {
        let trimmed = self.payload.trim();
        let body = match trimmed.strip_prefix("data:") {
            Some(rest) => {
                let (meta, body) = rest.split_once(',')?;
                if !meta.ends_with(";base64") {
                    return None;
                }
                body
            }
            None => trimmed,
        };

        if body.is_empty() {
            return None;
        }
        STANDARD.decode(body).ok()
    }
}
