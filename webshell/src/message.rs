//! Echo protocol between the hosted page and the shell
//!
//! The page posts an object with `type` and `payload` strings; the shell logs
//! both and answers with a fixed `pong` object.

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;

/// Payload every reply carries
pub const PONG_PAYLOAD: &str = "Hello from Rust";

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message is not a JSON object")]
    NotAnObject,

    #[error("Field '{field}' must be a string")]
    FieldType { field: &'static str },
}

/// The two fields the shell reads from an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub kind: String,
    pub payload: String,
}

impl IncomingMessage {
    /// Parse a raw message body. Missing fields read as empty strings,
    /// unknown fields are ignored.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let value: Value = serde_json::from_str(raw)?;
        let obj = value.as_object().ok_or(MessageError::NotAnObject)?;

        Ok(Self {
            kind: string_field(obj, "type")?,
            payload: string_field(obj, "payload")?,
        })
    }
}

fn string_field(obj: &serde_json::Map<String, Value>, field: &'static str) -> Result<String, MessageError> {
    match obj.get(field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(MessageError::FieldType { field }),
    }
}

/// Reply posted back to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: String,
    #[serde(rename = "receivedType")]
    pub received_type: String,
    pub timestamp: String,
}

impl OutgoingMessage {
    pub fn pong(received_type: &str, timestamp_ms: u128) -> Self {
        Self {
            kind: "pong".to_string(),
            payload: PONG_PAYLOAD.to_string(),
            received_type: received_type.to_string(),
            timestamp: timestamp_ms.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Turns incoming message bodies into reply bodies.
///
/// Timestamps are milliseconds since the responder was created, so they only
/// ever grow for the lifetime of the window.
#[derive(Debug, Clone)]
pub struct Responder {
    started: Instant,
}

impl Responder {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    pub fn respond(&self, raw: &str) -> Result<String, MessageError> {
        let incoming = IncomingMessage::parse(raw)?;
        tracing::info!(kind = %incoming.kind, payload = %incoming.payload, "message received");

        let reply = OutgoingMessage::pong(&incoming.kind, self.started.elapsed().as_millis());
        reply.to_json()
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}
