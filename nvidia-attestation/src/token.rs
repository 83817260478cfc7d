use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("Token has {0} segments, expected 3")]
    Segments(usize),
    #[error("Token payload segment is empty")]
    EmptyPayload,
    #[error("Failed to decode token payload: {0}")]
    Payload(#[from] base64::DecodeError),
    #[error("Failed to parse token claims: {0}")]
    Claims(#[from] serde_json::Error),
    #[error("Token claims are not a JSON object")]
    NotAnObject,
}

/// Decodes the claim set carried by a signed attestation token.
///
/// Only the payload segment of the `header.payload.signature` form is
/// consumed; the signature is NOT verified. Trust is placed in the TLS
/// channel to the attestation service that issued the token.
///
/// Decode failures are logged and collapsed to an empty claim map, so one
/// malformed device token cannot abort a whole verification; callers treat
/// an empty map as a failed claim set.
pub fn decode_token_claims(token: &str) -> Map<String, Value> {
    match try_decode(token) {
        Ok(claims) => claims,
        Err(err) => {
            warn!("Failed to decode attestation token: {err}");
            Map::new()
        }
    }
}

fn try_decode(token: &str) -> Result<Map<String, Value>, TokenDecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenDecodeError::Segments(segments.len()));
    }
    let payload = segments[1];
    if payload.is_empty() {
        return Err(TokenDecodeError::EmptyPayload);
    }
    let decoded = URL_SAFE_NO_PAD.decode(payload)?;
    match serde_json::from_slice(&decoded)? {
        Value::Object(claims) => Ok(claims),
        _ => Err(TokenDecodeError::NotAnObject),
    }
}
