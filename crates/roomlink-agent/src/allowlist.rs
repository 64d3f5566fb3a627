//! Credential allow-list.

use roomlink_core::Credential;

/// Configured set of credentials permitted to operate the door.
///
/// Deployments today carry a single entry, but the shape is a list so
/// adding a second badge is a config change, not a code change.
/// Membership checks use the credential's constant-time equality.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    allowed: Vec<Credential>,
}

impl AllowList {
    /// Create an allow-list from credentials.
    #[must_use]
    pub fn new(allowed: Vec<Credential>) -> Self {
        Self { allowed }
    }

    /// Create an allow-list from raw identifiers.
    #[must_use]
    pub fn from_raw(ids: &[u64]) -> Self {
        Self {
            allowed: ids.iter().copied().map(Credential::new).collect(),
        }
    }

    /// Returns `true` if `credential` is permitted.
    #[must_use]
    pub fn permits(&self, credential: &Credential) -> bool {
        self.allowed.iter().any(|allowed| allowed == credential)
    }

    /// Number of configured credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Returns `true` if no credentials are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_configured_credential() {
        let list = AllowList::from_raw(&[756_402_188_501]);
        assert!(list.permits(&Credential::new(756_402_188_501)));
        assert!(!list.permits(&Credential::new(756_402_188_502)));
    }

    #[test]
    fn test_empty_list_denies_everything() {
        let list = AllowList::default();
        assert!(list.is_empty());
        assert!(!list.permits(&Credential::new(1)));
    }

    #[test]
    fn test_multiple_entries() {
        let list = AllowList::from_raw(&[1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert!(list.permits(&Credential::new(2)));
    }
}
