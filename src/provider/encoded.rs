//! Opaque handle to a base64-encoded raster image.

use std::fmt;
use std::sync::Arc;

use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

/// MIME type assumed for provider images.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Base64 image data as returned by the provider.
///
/// Cloning is cheap (the payload is shared), which keeps history snapshots
/// of layer stacks small.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    mime_type: String,
    data: Arc<str>,
}

impl EncodedImage {
    /// Wrap base64 data without validating it.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self::with_mime_type(DEFAULT_MIME_TYPE, data)
    }

    pub fn with_mime_type(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: Arc::from(data.into()),
        }
    }

    /// Encode raw image bytes (e.g. a PNG file).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_base64(Base64::encode_string(bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn as_base64(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the payload to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64ct::Error> {
        Base64::decode_vec(self.data.trim())
    }

    /// `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl fmt::Debug for EncodedImage {
    // Payloads run to megabytes; show only their size.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_survive_encoding() {
        let image = EncodedImage::from_bytes(&[0x89, b'P', b'N', b'G', 0, 255]);
        assert_eq!(image.decode().unwrap(), vec![0x89, b'P', b'N', b'G', 0, 255]);
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_invalid_base64_fails_to_decode() {
        assert!(EncodedImage::from_base64("not base64!!").decode().is_err());
    }

    #[test]
    fn test_data_url_and_debug() {
        let image = EncodedImage::from_base64("QUJD");
        assert_eq!(image.data_url(), "data:image/png;base64,QUJD");
        assert_eq!(
            format!("{:?}", image),
            "EncodedImage { mime_type: \"image/png\", len: 4 }"
        );
    }
}
