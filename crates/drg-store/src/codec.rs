//! Obfuscation codec: base64 over JSON.
//!
//! This only keeps casual readers from seeing plain JSON in the data files.
//! It is not encryption.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors produced while decoding a payload.
#[derive(Debug)]
pub enum DecodeError {
    Base64(base64::DecodeError),
    Json(serde_json::Error),
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(STANDARD.encode(json))
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let bytes = STANDARD.decode(text.trim()).map_err(DecodeError::Base64)?;
    serde_json::from_slice(&bytes).map_err(DecodeError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_payload_is_not_plain_json() {
        let encoded = encode(&vec!["dr_wang"]).unwrap();
        assert!(!encoded.contains("dr_wang"));
        let decoded: Vec<String> = decode(&encoded).unwrap();
        assert_eq!(decoded, vec!["dr_wang".to_string()]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode::<Vec<String>>("not base64!"),
            Err(DecodeError::Base64(_))
        ));
        let not_json = STANDARD.encode(b"hello");
        assert!(matches!(
            decode::<Vec<String>>(&not_json),
            Err(DecodeError::Json(_))
        ));
    }
}
