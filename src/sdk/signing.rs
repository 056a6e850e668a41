//! Signing primitives for state transitions
//!
//! Mutations are authorized by a signer wrapping a WIF-encoded private key,
//! applied against one of the identity's public keys. Key resolution (by
//! explicit id, or by minimum security level) happens in the dispatcher; the
//! wrapped SDK receives the already-resolved triple.

use serde::{Deserialize, Serialize};

use super::SdkError;

/// Purpose of an identity public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyPurpose {
    Authentication,
    Encryption,
    Decryption,
    Transfer,
    Voting,
    Owner,
}

/// Security level of an identity public key. Lower ordinal means stronger:
/// a key "meets" a requirement when its level is at or above the required
/// strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityLevel {
    Master,
    Critical,
    High,
    Medium,
}

/// One public key attached to a fetched identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedKey {
    pub id: u32,
    pub purpose: KeyPurpose,
    pub security_level: SecurityLevel,
    #[serde(default)]
    pub disabled: bool,
}

/// Identity state as fetched from the platform before a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityHandle {
    pub id: String,
    pub revision: u64,
    pub keys: Vec<ResolvedKey>,
}

impl IdentityHandle {
    /// Locate the signing key: the explicitly requested id when given, else
    /// the first enabled authentication key at or above `min_level`.
    pub fn signing_key(&self, key_id: Option<u32>, min_level: SecurityLevel) -> Option<&ResolvedKey> {
        match key_id {
            Some(id) => self.keys.iter().find(|k| k.id == id && !k.disabled),
            None => self.keys.iter().find(|k| {
                !k.disabled && k.purpose == KeyPurpose::Authentication && k.security_level <= min_level
            }),
        }
    }
}

/// Opaque signer wrapping a WIF-encoded private key. The actual cryptography
/// lives in the wrapped SDK; this type only carries the material across the
/// boundary after a shape check.
#[derive(Clone)]
pub struct Signer {
    wif: String,
}

impl Signer {
    /// Wrap a WIF-encoded private key. Only the gross shape is checked here;
    /// the SDK performs the real decode.
    pub fn from_wif(wif: &str) -> Result<Self, SdkError> {
        let trimmed = wif.trim();
        if trimmed.is_empty() {
            return Err(SdkError::InvalidKey("private key is empty".to_string()));
        }
        if trimmed.len() < 26 || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SdkError::InvalidKey(
                "not a WIF-encoded private key".to_string(),
            ));
        }
        Ok(Self {
            wif: trimmed.to_string(),
        })
    }

    pub fn wif(&self) -> &str {
        &self.wif
    }
}

impl std::fmt::Debug for Signer {
    // Key material stays out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

/// Everything a mutation call needs to be authorized.
#[derive(Debug, Clone)]
pub struct SigningContext {
    pub identity: IdentityHandle,
    pub key: ResolvedKey,
    pub signer: Signer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(keys: Vec<ResolvedKey>) -> IdentityHandle {
        IdentityHandle {
            id: "5rvkgL9BDyrSkkSEPNFUoKHssjbFHI2dGy2QSEyVbT2A".to_string(),
            revision: 3,
            keys,
        }
    }

    fn key(id: u32, purpose: KeyPurpose, level: SecurityLevel) -> ResolvedKey {
        ResolvedKey {
            id,
            purpose,
            security_level: level,
            disabled: false,
        }
    }

    #[test]
    fn explicit_key_id_wins() {
        let ident = identity(vec![
            key(0, KeyPurpose::Authentication, SecurityLevel::Master),
            key(2, KeyPurpose::Transfer, SecurityLevel::Critical),
        ]);
        assert_eq!(
            ident.signing_key(Some(2), SecurityLevel::High).map(|k| k.id),
            Some(2)
        );
    }

    #[test]
    fn falls_back_to_first_strong_enough_auth_key() {
        let ident = identity(vec![
            key(0, KeyPurpose::Encryption, SecurityLevel::Master),
            key(1, KeyPurpose::Authentication, SecurityLevel::Medium),
            key(2, KeyPurpose::Authentication, SecurityLevel::High),
        ]);
        assert_eq!(
            ident.signing_key(None, SecurityLevel::High).map(|k| k.id),
            Some(2)
        );
    }

    #[test]
    fn disabled_keys_are_skipped() {
        let mut disabled = key(1, KeyPurpose::Authentication, SecurityLevel::High);
        disabled.disabled = true;
        let ident = identity(vec![disabled]);
        assert!(ident.signing_key(None, SecurityLevel::High).is_none());
        assert!(ident.signing_key(Some(1), SecurityLevel::High).is_none());
    }

    #[test]
    fn wif_shape_is_checked() {
        assert!(Signer::from_wif("").is_err());
        assert!(Signer::from_wif("short").is_err());
        assert!(Signer::from_wif("XK6CFyvYUMvY9FVQLeYBZBFDbC4QuBLiqWMAFxBVZcMHJ5eARJtb").is_ok());
    }
}
