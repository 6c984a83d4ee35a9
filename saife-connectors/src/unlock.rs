//! Library unlock flow
//!
//! The SAIFE private key is unlocked with a password. [`AttemptLimiter`]
//! counts consecutive wrong passwords; once the limit is reached it raises
//! `LibraryError::AdminLocked` and keeps doing so for every later attempt,
//! including ones with the right password. Only an administrator reset
//! (outside this crate) clears it.
//!
//! ```text
//! Locked ──ok──► Unlocked
//!   │
//!   └─wrong × max_attempts──► AdminLocked (terminal)
//! ```

use saife_core::{LibraryError, LibraryResult};

/// Checks a password against the protected key
///
/// `Ok(false)` is a wrong password. `Err` means the check itself could not
/// run (for example the service is unavailable) and does not count as an
/// attempt.
pub trait CredentialVerifier {
    /// Check `password`
    fn verify(&mut self, password: &str) -> LibraryResult<bool>;
}

impl<F> CredentialVerifier for F
where
    F: FnMut(&str) -> LibraryResult<bool>,
{
    fn verify(&mut self, password: &str) -> LibraryResult<bool> {
        self(password)
    }
}

/// Unlock gate that locks out after repeated wrong passwords
pub struct AttemptLimiter<V> {
    verifier: V,
    max_attempts: u32,
    failures: u32,
    unlocked: bool,
}

impl<V: CredentialVerifier> AttemptLimiter<V> {
    /// Allow `max_attempts` consecutive wrong passwords (at least one)
    pub fn new(verifier: V, max_attempts: u32) -> Self {
        Self {
            verifier,
            max_attempts: max_attempts.max(1),
            failures: 0,
            unlocked: false,
        }
    }

    /// Try to unlock with `password`
    pub fn unlock(&mut self, password: &str) -> LibraryResult<()> {
        if self.is_admin_locked() {
            return Err(self.locked_error());
        }

        if self.verifier.verify(password)? {
            log::debug!("library unlocked");
            self.failures = 0;
            self.unlocked = true;
            return Ok(());
        }

        self.unlocked = false;
        self.failures += 1;
        if self.is_admin_locked() {
            log::warn!("unlock disabled after {} failed attempts", self.failures);
            return Err(self.locked_error());
        }

        Err(LibraryError::new(format!(
            "incorrect password, {} attempt(s) remaining",
            self.remaining_attempts()
        )))
    }

    /// Whether the most recent `unlock` succeeded
    ///
    /// A wrong password relocks the library.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Whether the limit has been reached
    pub fn is_admin_locked(&self) -> bool {
        self.failures >= self.max_attempts
    }

    /// Wrong passwords still tolerated
    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failures)
    }

    fn locked_error(&self) -> LibraryError {
        LibraryError::admin_locked(format!(
            "unlock disabled after {} failed attempts; an administrator must reset the password",
            self.failures
        ))
    }
}
