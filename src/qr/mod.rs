//! QR payload validation, encoding, and logo compositing
//!
//! This module turns a text payload into a rendered QR symbol and
//! optionally embeds a logo at its center. The matrix encoding itself is
//! delegated to the `qrcode` crate; pixel work is delegated to `image`.

mod compositor;
mod encoder;

pub use compositor::LogoCompositor;
pub use encoder::QrEncoder;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated text payload (usually a URL) destined for a QR symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload(String);

impl Payload {
    /// Validate and wrap a payload string.
    ///
    /// Empty or all-whitespace input is rejected with
    /// [`Error::EmptyPayload`]; no other format validation is applied, any
    /// string the underlying encoder accepts is legal.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyPayload);
        }
        Ok(Self(text))
    }

    /// Get the payload text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
