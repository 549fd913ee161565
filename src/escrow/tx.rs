//! Pseudo transaction identifiers for simulated contract calls

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Issues `0x`-prefixed ids that are unique within the process.
///
/// Each id is the SHA-256 of a monotonic sequence number, the call label and
/// a random v4 UUID. Nothing can verify these ids; they only make the log
/// look like a ledger.
#[derive(Debug, Default)]
pub struct TxIdGenerator {
    sequence: u64,
}

impl TxIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, label: &str) -> String {
        self.sequence = self.sequence.wrapping_add(1);
        let preimage = format!("{}:{}:{}", self.sequence, label, Uuid::new_v4());
        let digest = Sha256::digest(preimage.as_bytes());
        format!("0x{}", hex::encode(digest))
    }
}
