use base64::Engine;
use serde::{Deserialize, Serialize};

/// Wire convention for uploaded images and payment screenshots: the backend
/// decodes `data` as base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedFile {
    pub mime_type: String,
    pub data: String,
    pub file_name: String,
}

impl EncodedFile {
    pub fn from_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            file_name: file_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_bytes_as_base64() {
        let file = EncodedFile::from_bytes("proof.png", "image/png", b"hello");
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.file_name, "proof.png");
    }

    #[test]
    fn test_serializes_camel_case() {
        let file = EncodedFile::from_bytes("a.jpg", "image/jpeg", b"x");
        let json = serde_json::to_value(&file).unwrap();
        assert!(json.get("mimeType").is_some());
        assert!(json.get("fileName").is_some());
    }
}
