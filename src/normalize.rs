//! Input validation and canonicalization
//!
//! Raw `(platform, identity)` pairs arrive from tool calls untrusted. This
//! module turns them into a [`NormalizedKey`]: both fields trimmed and
//! lower-cased, so requests differing only in case or surrounding whitespace
//! collapse onto one cache entry. Pure functions, no I/O.

use std::fmt;

use crate::error::{LookupError, Result};

/// Maximum accepted identity length in characters
pub const MAX_IDENTITY_LEN: usize = 256;

/// Platforms the upstream API is known to resolve
///
/// Used only for hinting: unknown values are accepted and passed through,
/// since the upstream API is authoritative about what it supports.
pub const KNOWN_PLATFORMS: &[&str] = &[
    "ethereum",
    "solana",
    "ens",
    "sns",
    "farcaster",
    "lens",
    "clusters",
    "basenames",
    "unstoppabledomains",
    "space_id",
    "dotbit",
    "ckb",
    "box",
    "linea",
    "justaname",
    "zeta",
    "mode",
    "arbitrum",
    "taiko",
    "mint",
    "zkfair",
    "manta",
    "lightlink",
    "genome",
    "merlin",
    "alienx",
    "tomo",
    "ailayer",
    "gravity",
    "bitcoin",
    "litecoin",
    "dogecoin",
    "aptos",
    "stacks",
    "tron",
    "ton",
    "xrpc",
    "cosmos",
    "arweave",
    "algorand",
    "firefly",
    "particle",
    "privy",
    "twitter",
    "bluesky",
    "github",
    "discord",
    "telegram",
    "dentity",
    "email",
    "linkedin",
    "reddit",
    "nextid",
    "keybase",
    "facebook",
    "dns",
    "nftd",
    "gallery",
    "paragraph",
    "mirror",
    "instagram",
    "crowdsourcing",
    "nostr",
    "gmgn",
    "talentprotocol",
    "foundation",
    "rarible",
    "soundxyz",
    "warpcast",
    "opensea",
    "icebreaker",
    "tally",
];

/// Canonical cache key for a lookup
///
/// Invariant: both fields are non-empty, trimmed, and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey {
    pub platform: String,
    pub identity: String,
}

impl NormalizedKey {
    /// Flat `platform:identity` form used as the cache map key
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.platform, self.identity)
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.identity)
    }
}

/// Validate and canonicalize a raw `(platform, identity)` pair
///
/// Rejects an empty platform, an identity that is empty after trimming, and
/// an identity longer than [`MAX_IDENTITY_LEN`] characters. Beyond trimming
/// and lower-casing, the content is left untouched.
pub fn normalize(platform: &str, identity: &str) -> Result<NormalizedKey> {
    let platform = platform.trim().to_lowercase();
    if platform.is_empty() {
        return Err(LookupError::InvalidPlatform(
            "platform cannot be empty".to_string(),
        ));
    }

    let identity = identity.trim();
    if identity.is_empty() {
        return Err(LookupError::InvalidIdentity(
            "identity cannot be empty".to_string(),
        ));
    }
    if identity.chars().count() > MAX_IDENTITY_LEN {
        return Err(LookupError::InvalidIdentity(format!(
            "identity exceeds {} characters",
            MAX_IDENTITY_LEN
        )));
    }

    if !is_known_platform(&platform) {
        tracing::debug!(platform = %platform, "platform not in known list, passing through");
    }

    Ok(NormalizedKey {
        platform,
        identity: identity.to_lowercase(),
    })
}

/// Whether the (already lower-cased) platform is in the known enumeration
pub fn is_known_platform(platform: &str) -> bool {
    KNOWN_PLATFORMS.contains(&platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_collide_onto_one_key() {
        let a = normalize("ENS", " Vitalik.eth ").unwrap();
        let b = normalize("ens", "vitalik.eth").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cache_key(), "ens:vitalik.eth");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("  Farcaster", "DWR.eth").unwrap();
        let twice = normalize(&once.platform, &once.identity).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_platform_rejected() {
        let err = normalize("", "vitalik.eth").unwrap_err();
        assert!(matches!(err, LookupError::InvalidPlatform(_)));

        let err = normalize("   ", "vitalik.eth").unwrap_err();
        assert!(matches!(err, LookupError::InvalidPlatform(_)));
    }

    #[test]
    fn test_empty_identity_rejected() {
        let err = normalize("ethereum", "   ").unwrap_err();
        assert!(matches!(err, LookupError::InvalidIdentity(_)));
    }

    #[test]
    fn test_overlong_identity_rejected() {
        let long = "a".repeat(MAX_IDENTITY_LEN + 1);
        let err = normalize("ethereum", &long).unwrap_err();
        assert!(matches!(err, LookupError::InvalidIdentity(_)));

        // Exactly at the bound is fine
        let max = "a".repeat(MAX_IDENTITY_LEN);
        assert!(normalize("ethereum", &max).is_ok());
    }

    #[test]
    fn test_embedded_punctuation_preserved() {
        let key = normalize("dotbit", "some.name#tag_1").unwrap();
        assert_eq!(key.identity, "some.name#tag_1");
    }

    #[test]
    fn test_unknown_platform_passes_through() {
        let key = normalize("somefutureplatform", "alice").unwrap();
        assert_eq!(key.platform, "somefutureplatform");
        assert!(!is_known_platform(&key.platform));
        assert!(is_known_platform("ens"));
    }
}
