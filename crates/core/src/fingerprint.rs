//! Fingerprints that tie a logged server error to the response a client saw.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `"{unix_secs}{message}"`.
///
/// The same fingerprint is written to the error log and sent back as the
/// response message, so a user report can be matched to the log line.
pub fn error_fingerprint(unix_secs: i64, message: &str) -> String {
    let digest = Sha256::digest(format!("{unix_secs}{message}").as_bytes());
    format!("{:x}", digest)
}
