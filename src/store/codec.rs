//! Persisted sequence encoding.
//!
//! Sequences are stored as a JSON array of asset ids, e.g. `[1,5,3,1,2]`.

use crate::models::AssetId;

/// Sequence encoding/decoding failure.
#[derive(Debug, thiserror::Error)]
#[error("malformed sequence: {0}")]
pub struct CodecError(#[from] serde_json::Error);

/// Encodes a sequence as a JSON array.
pub fn encode_sequence(sequence: &[AssetId]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(sequence)?)
}

/// Decodes a JSON array of asset ids.
pub fn decode_sequence(raw: &str) -> Result<Vec<AssetId>, CodecError> {
    Ok(serde_json::from_str(raw)?)
}

/// Decodes a sequence, treating malformed data as an empty sequence.
///
/// An empty result prompts callers to regenerate the playlist.
pub fn decode_sequence_lossy(raw: &str) -> Vec<AssetId> {
    decode_sequence(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding undecodable stored sequence");
        Vec::new()
    })
}
