//! Interaction webhook verification
//!
//! Requests are signed with Ed25519 over `timestamp || body`. Only PING is
//! answered in-band; everything else is acknowledged.

use crate::error::InteractionError;
use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use serde::{Deserialize, Serialize};

/// Signature header
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Timestamp header
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Interaction type of a PING
pub const PING: u8 = 1;

/// Verified interaction envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Interaction id
    #[serde(default)]
    pub id: Option<String>,
}

/// Response to a verified interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionReply {
    /// Answer a PING with a PONG body
    Pong,
    /// Accept without a body
    Acknowledged,
}

impl Interaction {
    /// How to answer this interaction
    #[must_use]
    pub fn reply(&self) -> InteractionReply {
        if self.kind == PING {
            InteractionReply::Pong
        } else {
            InteractionReply::Acknowledged
        }
    }
}

/// Checks request signatures against the application public key
#[derive(Debug, Clone)]
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// Create verifier from a key
    #[must_use]
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Create verifier from a hex-encoded public key
    ///
    /// # Errors
    /// Returns `InteractionError::InvalidPublicKey` if the key is not 32
    /// hex-encoded bytes on the curve
    pub fn from_hex(public_key: &str) -> Result<Self, InteractionError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| InteractionError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| InteractionError::InvalidPublicKey("expected 32 bytes".to_string()))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| InteractionError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(key))
    }

    /// Verify a request and decode its envelope
    ///
    /// # Errors
    /// - `MissingHeaders` if either header is absent
    /// - `MalformedSignature` if the signature is not 64 hex bytes
    /// - `BadSignature` if verification fails
    /// - `MalformedBody` if the verified body is not an interaction
    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<Interaction, InteractionError> {
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            return Err(InteractionError::MissingHeaders);
        };

        let raw = hex::decode(signature).map_err(|_| InteractionError::MalformedSignature)?;
        let raw: [u8; SIGNATURE_LENGTH] = raw
            .try_into()
            .map_err(|_| InteractionError::MalformedSignature)?;
        let signature = Signature::from_bytes(&raw);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify(&message, &signature).map_err(|_| {
            tracing::warn!("interaction signature rejected");
            InteractionError::BadSignature
        })?;

        Ok(serde_json::from_slice(body)?)
    }
}
