//! # Signature Blob Codec
//!
//! A signature blob is fixed-size records concatenated in signer order.

/// Split `blob` into exactly `count` records of `record_len` bytes.
///
/// Returns `None` on any length mismatch, including an empty signer list.
pub fn split_records(blob: &[u8], record_len: usize, count: usize) -> Option<Vec<&[u8]>> {
    if count == 0 || record_len == 0 || blob.len() != record_len.checked_mul(count)? {
        return None;
    }
    Some(blob.chunks_exact(record_len).collect())
}

/// Concatenate records into a blob.
pub fn join_records<R: AsRef<[u8]>>(records: &[R]) -> Vec<u8> {
    records.iter().flat_map(|r| r.as_ref().iter().copied()).collect()
}
