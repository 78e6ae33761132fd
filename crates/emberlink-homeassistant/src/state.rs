//! State value encoding
//!
//! State payloads follow one rule: text is published as-is, everything else
//! is JSON-encoded. The union makes the rule explicit at the call site
//! instead of inspecting a dynamic type.

/// A value published on a state channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateValue<'a> {
    /// Raw text, published without JSON quoting
    Text(&'a str),
    Bool(bool),
    Integer(i64),
    Float(f64),
}

/// Render a state value into `buf`, returning the payload length.
pub(crate) fn encode(value: StateValue<'_>, buf: &mut [u8]) -> Result<usize, ()> {
    match value {
        StateValue::Text(text) => {
            let bytes = text.as_bytes();
            if bytes.len() > buf.len() {
                return Err(());
            }
            buf[..bytes.len()].copy_from_slice(bytes);
            Ok(bytes.len())
        }
        StateValue::Bool(v) => serde_json_core::to_slice(&v, buf).map_err(|_| ()),
        StateValue::Integer(v) => serde_json_core::to_slice(&v, buf).map_err(|_| ()),
        StateValue::Float(v) => serde_json_core::to_slice(&v, buf).map_err(|_| ()),
    }
}
