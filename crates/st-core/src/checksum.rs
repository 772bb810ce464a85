//! SHA-256 checksums for migration scripts.

use sha2::{Digest, Sha256};

/// Compute the hex SHA-256 digest of a migration script.
///
/// The digest is 64 hex characters, matching the width of the ledger's
/// `checksum` column.
pub fn compute_checksum(sql: &str) -> String {
    let digest = Sha256::digest(sql.as_bytes());
    format!("{:x}", digest)
}
