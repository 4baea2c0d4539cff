use crate::enricher::{EnrichError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Smallest credential pool the enricher accepts
pub const MIN_CREDENTIALS: usize = 4;

/// Round-robin supplier of bearer credentials
#[derive(Debug)]
pub struct CredentialRotator {
    credentials: Vec<String>,
    cursor: AtomicUsize,
}

impl CredentialRotator {
    /// Build a rotator from a credential pool.
    ///
    /// Blank and repeated credentials are discarded before the size check, so
    /// four copies of the same token do not pass.
    pub fn new<I, S>(credentials: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool: Vec<String> = Vec::new();
        for credential in credentials {
            let credential = credential.into().trim().to_string();
            if !credential.is_empty() && !pool.contains(&credential) {
                pool.push(credential);
            }
        }

        if pool.len() < MIN_CREDENTIALS {
            return Err(EnrichError::InsufficientCredentials {
                found: pool.len(),
                required: MIN_CREDENTIALS,
            });
        }

        Ok(Self {
            credentials: pool,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Next credential in the circular sequence
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> &str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.credentials.len();
        &self.credentials[index]
    }

    /// Pool size
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
