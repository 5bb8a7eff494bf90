use jobboard_core::AppResult;
use jobboard_domain::IpHash;
use tracing::warn;

/// Salt used when no secret salt is configured.
pub const FALLBACK_IP_HASH_SALT: &str = "jobboard-default-ip-salt";

/// Derives salted, one-way fingerprints from caller addresses.
#[derive(Clone)]
pub struct IpFingerprinter {
    salt: String,
}

impl std::fmt::Debug for IpFingerprinter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("IpFingerprinter")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl IpFingerprinter {
    /// Creates a fingerprinter. A missing or blank salt falls back to a fixed
    /// constant so hashing stays deterministic.
    #[must_use]
    pub fn new(salt: Option<String>) -> Self {
        let salt = match salt.filter(|value| !value.trim().is_empty()) {
            Some(salt) => salt,
            None => {
                warn!("ip hash salt is not configured, falling back to the built-in salt");
                FALLBACK_IP_HASH_SALT.to_owned()
            }
        };

        Self { salt }
    }

    /// Computes `sha256(address + salt)` as lowercase hex.
    pub fn fingerprint(&self, caller_address: &str) -> AppResult<IpHash> {
        use sha2::{Digest, Sha256};
        use std::fmt::Write;

        let mut hasher = Sha256::new();
        hasher.update(caller_address.as_bytes());
        hasher.update(self.salt.as_bytes());
        let result = hasher.finalize();

        let digest = result
            .iter()
            .fold(String::with_capacity(64), |mut acc, byte| {
                let _ = write!(acc, "{byte:02x}");
                acc
            });

        IpHash::from_hex(digest)
    }
}
