//! Checksum calculation for schedule-run fingerprinting.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of serialized run output.
///
/// Two runs over identical inputs produce identical placements, so equal
/// checksums are the cheap way to verify an idempotent retry.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = r#"[{"assignment_id":"a1"}]"#;
        let checksum1 = calculate_checksum(content);
        let checksum2 = calculate_checksum(content);
        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_different_content_different_checksum() {
        let checksum1 = calculate_checksum(r#"[{"time":"09:00"}]"#);
        let checksum2 = calculate_checksum(r#"[{"time":"09:30"}]"#);
        assert_ne!(checksum1, checksum2);
    }
}
