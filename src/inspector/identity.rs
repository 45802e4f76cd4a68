//! Object identity for cycle detection
//!
//! An object's identity is its natural key when the type provides one
//! (persistent id, content hash), otherwise a 32 digit hex token derived from
//! its allocation address. Address tokens are only meaningful within one pass.

use crate::value::ObjectRef;

/// Identity used to detect repeat visits
pub fn identity_of(object: &ObjectRef) -> String {
    object
        .get()
        .natural_key()
        .unwrap_or_else(|| ephemeral_identity(object))
}

/// Address-based identity token
pub fn ephemeral_identity(object: &ObjectRef) -> String {
    format!("{:032x}", object.address())
}
