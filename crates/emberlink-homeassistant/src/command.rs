//! Inbound command payload decoding
//!
//! Command payloads are free-form: the hub sends bare text for some channels
//! (`"heat"`, `"ON"`) and JSON values for others (`72.5`). The decoder tries
//! a complete JSON scalar first and falls back to raw text, so handlers
//! pattern-match instead of guessing.
//!
//! Structured JSON bodies (objects, arrays) arrive as [`CommandPayload::Text`]
//! carrying the raw JSON; handlers that expect them run their own
//! `serde_json_core` typed parse.

/// A JSON scalar decoded from a command payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonScalar<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(&'a str),
}

/// A decoded command payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandPayload<'a> {
    /// Payload that parsed as a complete JSON scalar
    Json(JsonScalar<'a>),
    /// Raw text passed through unchanged
    Text(&'a str),
}

impl<'a> CommandPayload<'a> {
    /// Decode raw payload bytes. `None` if the payload is not UTF-8.
    pub fn decode(payload: &'a [u8]) -> Option<Self> {
        let text = core::str::from_utf8(payload).ok()?;
        Some(Self::from_text(text))
    }

    /// Decode a payload already known to be text.
    pub fn from_text(text: &'a str) -> Self {
        let candidate = text.trim();
        match candidate {
            "null" => return CommandPayload::Json(JsonScalar::Null),
            "true" => return CommandPayload::Json(JsonScalar::Bool(true)),
            "false" => return CommandPayload::Json(JsonScalar::Bool(false)),
            _ => {}
        }

        if let Some(value) = parse_json_string(candidate) {
            return CommandPayload::Json(JsonScalar::Text(value));
        }
        if let Some(value) = parse_json_number(candidate) {
            return CommandPayload::Json(JsonScalar::Number(value));
        }

        CommandPayload::Text(text)
    }

    /// Numeric view of the payload, if it decoded as a JSON number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CommandPayload::Json(JsonScalar::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Boolean view of the payload, if it decoded as a JSON boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CommandPayload::Json(JsonScalar::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Textual view: a decoded JSON string or the raw text fallback.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            CommandPayload::Json(JsonScalar::Text(v)) | CommandPayload::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Parse `candidate` as a complete JSON string literal.
///
/// Literals containing escape sequences fall through to the raw-text path;
/// they cannot be unescaped into a borrowed slice.
fn parse_json_string(candidate: &str) -> Option<&str> {
    match serde_json_core::from_str::<&str>(candidate) {
        Ok((value, consumed)) if consumed == candidate.len() => Some(value),
        _ => None,
    }
}

/// Parse `candidate` as a complete JSON number.
///
/// The full-consumption check rejects inputs like `72abc` that a prefix
/// parser would accept.
fn parse_json_number(candidate: &str) -> Option<f64> {
    match serde_json_core::from_str::<f64>(candidate) {
        Ok((value, consumed)) if consumed == candidate.len() => Some(value),
        _ => None,
    }
}
