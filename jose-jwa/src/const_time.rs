//! Constant-time comparison (spec §5 "Constant-time discipline").

use subtle::ConstantTimeEq;

/// Compare two byte slices for equality in constant time with respect to
/// their *contents*.
///
/// Mismatched lengths short-circuit (length is not considered secret here —
/// every caller compares against a tag/ciphertext of a length already fixed
/// by the algorithm in use), but once lengths match, every byte is
/// compared regardless of where an earlier mismatch occurred.
pub fn eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
