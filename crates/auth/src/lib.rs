//! Credential verification for Bookrack.
//!
//! Controllers depend on the [`CredentialVerifier`] trait only, so the
//! backing store can be swapped (static entry today, a real user table
//! later) without touching any route handler.

/// Capability to check an identity/secret pair.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &str, secret: &str) -> bool;
}

/// Single hard-coded credential pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    identity: String,
    secret: String,
}

impl StaticCredentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("test@gmail.com", "12345678")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, identity: &str, secret: &str) -> bool {
        let ok = identity == self.identity && secret == self.secret;
        if !ok {
            tracing::debug!(identity, "credential check failed");
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_verifies() {
        let creds = StaticCredentials::default();
        assert!(creds.verify("test@gmail.com", "12345678"));
    }

    #[test]
    fn wrong_identity_or_secret_is_rejected() {
        let creds = StaticCredentials::default();
        assert!(!creds.verify("test@gmail.com", "wrong-pass"));
        assert!(!creds.verify("other@gmail.com", "12345678"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn custom_pair_verifies_exactly() {
        let creds = StaticCredentials::new("admin@example.com", "hunter2!");
        assert!(creds.verify("admin@example.com", "hunter2!"));
        assert!(!creds.verify("admin@example.com", "hunter2"));
    }
}
