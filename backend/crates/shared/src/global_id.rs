//! Global ID Codec
//!
//! Opaque identifiers exposed at the API boundary. A global ID is the
//! standard Base64 encoding of `"<TypeName>:<internal id>"`, e.g.
//! `"TagNode:1"` becomes `"VGFnTm9kZTox"`.
//!
//! The codec is pure: it never touches storage and knows nothing about
//! which type names exist.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Global ID decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobalIdError {
    /// Not valid Base64 / UTF-8, or missing the `:` separator
    #[error("Unable to parse global ID \"{0}\"")]
    Malformed(String),

    /// Local part is not a numeric id
    #[error("Invalid internal id in global ID \"{0}\"")]
    InvalidLocalId(String),

    /// Decoded type does not match the expected node type
    #[error("Must receive a {expected} id")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
}

/// Encode `(type_name, id)` into an opaque global ID
///
/// ## Examples
/// ```rust
/// use kernel::global_id::encode;
/// assert_eq!(encode("TagNode", 1), "VGFnTm9kZTox");
/// ```
pub fn encode(type_name: &str, id: i64) -> String {
    STANDARD.encode(format!("{type_name}:{id}"))
}

/// Decode an opaque global ID into `(type_name, id)`
///
/// ## Examples
/// ```rust
/// use kernel::global_id::decode;
/// assert_eq!(decode("VGFnTm9kZTox").unwrap(), ("TagNode".to_string(), 1));
/// ```
pub fn decode(global_id: &str) -> Result<(String, i64), GlobalIdError> {
    let malformed = || GlobalIdError::Malformed(global_id.to_string());

    let bytes = STANDARD.decode(global_id.trim()).map_err(|_| malformed())?;
    let raw = String::from_utf8(bytes).map_err(|_| malformed())?;

    let (type_name, local_id) = raw.split_once(':').ok_or_else(malformed)?;
    if type_name.is_empty() {
        return Err(malformed());
    }

    let id = local_id
        .parse::<i64>()
        .map_err(|_| GlobalIdError::InvalidLocalId(global_id.to_string()))?;

    Ok((type_name.to_string(), id))
}

/// Decode a global ID and require a specific type name
pub fn decode_as(global_id: &str, expected: &'static str) -> Result<i64, GlobalIdError> {
    let (type_name, id) = decode(global_id)?;
    if type_name != expected {
        return Err(GlobalIdError::TypeMismatch {
            expected,
            actual: type_name,
        });
    }
    Ok(id)
}
