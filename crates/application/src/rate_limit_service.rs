//! Application rate limiting ports and service.
//!
//! Suppresses duplicate applications by fingerprinting the caller address
//! with a salted SHA-256 digest and checking the `application_attempts`
//! audit log for a recent attempt on the same vacancy. The check favors
//! availability: when the audit log cannot be read the attempt is allowed.

mod config;
mod ip_fingerprint;
mod ports;
mod service;

#[cfg(test)]
mod tests;

pub use config::{
    ApplicationRateLimitRule, DEFAULT_APPLICATION_WINDOW_SECONDS, FALLBACK_CALLER_ADDRESS,
};
pub use ip_fingerprint::{FALLBACK_IP_HASH_SALT, IpFingerprinter};
pub use ports::ApplicationAttemptRepository;
pub use service::{ApplicationAttemptInput, RateLimitDecision, RateLimitService};
