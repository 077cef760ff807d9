//! Envelope byte layout and constant-time tag comparison
//!
//! ```text
//! [associated data][16 bytes: IV][N bytes: ciphertext][32 bytes: tag]
//! ```

use subtle::ConstantTimeEq;

use crate::{IV_SIZE, TAG_SIZE};

/// Borrowed view of a decoded envelope.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeParts<'a> {
    pub associated_data: &'a [u8],
    pub iv: &'a [u8; IV_SIZE],
    pub ciphertext: &'a [u8],
    pub tag: &'a [u8; TAG_SIZE],
    /// Everything the tag covers: `associated data || IV || ciphertext`
    pub authenticated: &'a [u8],
}

/// Smallest valid envelope for a given associated-data length.
pub const fn min_envelope_len(associated_data_len: usize) -> usize {
    associated_data_len + IV_SIZE + TAG_SIZE
}

/// Split an envelope into its regions, or `None` if it is too short.
pub fn split(envelope: &[u8], associated_data_len: usize) -> Option<EnvelopeParts<'_>> {
    if envelope.len() < min_envelope_len(associated_data_len) {
        return None;
    }

    let (authenticated, tag) = envelope.split_at(envelope.len() - TAG_SIZE);
    let (associated_data, rest) = authenticated.split_at(associated_data_len);
    let (iv, ciphertext) = rest.split_at(IV_SIZE);

    Some(EnvelopeParts {
        associated_data,
        iv: iv.try_into().ok()?,
        ciphertext,
        tag: tag.try_into().ok()?,
        authenticated,
    })
}

/// Start an envelope: `associated data || IV || ciphertext`, with room for the tag.
pub fn unsigned(associated_data: &[u8], iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> Vec<u8> {
    let mut envelope =
        Vec::with_capacity(associated_data.len() + IV_SIZE + ciphertext.len() + TAG_SIZE);
    envelope.extend_from_slice(associated_data);
    envelope.extend_from_slice(iv);
    envelope.extend_from_slice(ciphertext);
    envelope
}

/// Compare two tags without short-circuiting on the first differing byte.
///
/// Every position is XOR-accumulated; only the (public) lengths may end the
/// comparison early.
pub fn tags_match(expected: &[u8], received: &[u8]) -> bool {
    expected.ct_eq(received).into()
}
