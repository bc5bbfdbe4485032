//! Worker wire messages.
//!
//! One JSON object per line in each direction. Parsing goes through
//! [`serde_json::Value`] first so an `{"error": ...}` reply is recognized
//! before the document shape is validated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use textlab_core::Document;

use crate::SpacyError;

/// First message from the worker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Handshake {
    /// Pipeline loaded.
    Ready {
        /// Name the worker loaded, if it reports one.
        #[serde(default)]
        model: Option<String>,
    },
    /// Import or load failed.
    Error {
        /// Description from Python.
        message: String,
    },
}

#[derive(Serialize)]
struct Request<'a> {
    text: &'a str,
}

/// Parse the handshake line.
///
/// # Errors
///
/// [`SpacyError::Protocol`] if the line is not a handshake.
pub fn parse_handshake(line: &str) -> Result<Handshake, SpacyError> {
    serde_json::from_str(line.trim())
        .map_err(|e| SpacyError::Protocol { reason: format!("bad handshake: {e}") })
}

/// Encode a processing request, without the trailing newline.
///
/// # Errors
///
/// [`SpacyError::Protocol`] if serialization fails.
pub fn encode_request(text: &str) -> Result<String, SpacyError> {
    serde_json::to_string(&Request { text })
        .map_err(|e| SpacyError::Protocol { reason: e.to_string() })
}

/// Parse a reply line into a document.
///
/// # Errors
///
/// [`SpacyError::Engine`] for an error reply, [`SpacyError::Protocol`] for
/// anything that is not a valid document.
pub fn parse_reply(line: &str) -> Result<Document, SpacyError> {
    let value: Value = serde_json::from_str(line.trim())
        .map_err(|e| SpacyError::Protocol { reason: format!("bad reply: {e}") })?;

    if let Some(error) = value.get("error") {
        let reason = error.as_str().map_or_else(|| error.to_string(), str::to_owned);
        return Err(SpacyError::Engine { reason });
    }

    serde_json::from_value(value)
        .map_err(|e| SpacyError::Protocol { reason: format!("bad document: {e}") })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_variants() {
        assert_eq!(
            parse_handshake(r#"{"status":"ready","model":"en_core_web_sm"}"#).unwrap(),
            Handshake::Ready { model: Some("en_core_web_sm".into()) }
        );
        assert_eq!(
            parse_handshake(r#"{"status":"error","message":"No module named 'spacy'"}"#).unwrap(),
            Handshake::Error { message: "No module named 'spacy'".into() }
        );
        assert!(matches!(parse_handshake("Traceback"), Err(SpacyError::Protocol { .. })));
    }

    #[test]
    fn request_is_one_line() {
        let line = encode_request("two\nlines \"quoted\"").unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(line, r#"{"text":"two\nlines \"quoted\""}"#);
    }

    #[test]
    fn error_reply_is_engine_error() {
        let err = parse_reply(r#"{"error":"[E088] Text of length 2000000 exceeds maximum"}"#)
            .unwrap_err();
        assert!(matches!(err, SpacyError::Engine { reason } if reason.starts_with("[E088]")));
    }

    #[test]
    fn document_reply() {
        let line = r#"{"text":"Hi.","tokens":[
            {"text":"Hi","pos":"INTJ","tag":"UH","tag_explanation":"interjection","lemma":"hi",
             "dep":"ROOT","head":0,"entity_type":null,"is_stop":false},
            {"text":".","pos":"PUNCT","tag":".","tag_explanation":null,"lemma":".",
             "dep":"punct","head":0,"entity_type":null,"is_stop":false}],
            "sentences":[{"text":"Hi.","start":0,"end":2}],"entities":[]}"#;
        let doc = parse_reply(&line.replace('\n', " ")).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tokens()[0].tag_explanation.as_deref(), Some("interjection"));
    }

    #[test]
    fn invalid_document_is_protocol_error() {
        let line = r#"{"text":"x","tokens":[{"text":"x","pos":"X","tag":"X","lemma":"x","dep":"ROOT","head":5}]}"#;
        let err = parse_reply(line).unwrap_err();
        assert!(matches!(err, SpacyError::Protocol { reason } if reason.contains("head 5")));
    }
}
