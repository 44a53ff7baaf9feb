use crate::errors::StepstoneResult;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// One atomic migration step against an external target system.
///
/// # Purpose
/// A migration unit carries exactly two capabilities: a version marker fixing
/// its position in the upgrade sequence, and a fallible apply action holding
/// the actual state-changing logic. The sequencer never inspects or mutates a
/// unit beyond these two members.
///
/// # Characteristics
/// - The version marker must not change after registration
/// - `apply` may fail; the sequencer propagates failures unwrapped and never
///   retries, rolls back, or skips
/// - Idempotency of `apply` is the implementor's concern
pub trait Migration: Send + Sync {
    /// Returns this unit's version marker (dot-delimited numeric segments).
    fn version(&self) -> &str;

    /// Applies this unit's changes to the target system.
    fn apply(&self) -> StepstoneResult<()>;
}

/// Closure-holding [`Migration`] implementation.
///
/// # Purpose
/// Lets callers register a migration without declaring a named type: a
/// version marker plus an apply closure.
///
/// # Characteristics
/// - **Thread-safe**: the closure requires Send + Sync
/// - **Cloneable**: the closure is shared via Arc, not copied
/// - **Fallible**: the closure returns StepstoneResult for error handling
///
/// # Usage
///
/// ```rust,ignore
/// use stepstone::migration::MigrationFn;
///
/// let migration = MigrationFn::new("0.2", || {
///     // mutate the target system
///     Ok(())
/// });
/// ```
#[derive(Clone)]
pub struct MigrationFn {
    version: String,
    apply_fn: Arc<dyn Fn() -> StepstoneResult<()> + Send + Sync>,
}

impl MigrationFn {
    /// Creates a migration unit from a version marker and an apply closure.
    ///
    /// # Arguments
    /// * `version` - The unit's version marker
    /// * `apply_fn` - Closure performing the unit's changes on the target system
    pub fn new<F>(version: &str, apply_fn: F) -> Self
    where
        F: Fn() -> StepstoneResult<()> + Send + Sync + 'static,
    {
        MigrationFn {
            version: version.to_string(),
            apply_fn: Arc::new(apply_fn),
        }
    }
}

impl Migration for MigrationFn {
    fn version(&self) -> &str {
        &self.version
    }

    fn apply(&self) -> StepstoneResult<()> {
        (self.apply_fn)()
    }
}

impl Debug for MigrationFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationFn")
            .field("version", &self.version)
            .field("apply_fn", &"<closure>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, StepstoneError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== MigrationFn Tests ====================

    #[test]
    fn test_migration_fn_version() {
        let migration = MigrationFn::new("0.2.1", || Ok(()));
        assert_eq!(migration.version(), "0.2.1");
    }

    #[test]
    fn test_migration_fn_apply_runs_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let migration = MigrationFn::new("0.1", move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        migration.apply().unwrap();
        migration.apply().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_migration_fn_apply_propagates_error() {
        let migration = MigrationFn::new("0.1", || {
            Err(StepstoneError::new(
                "target unreachable",
                ErrorKind::MigrationError,
            ))
        });

        let result = migration.apply();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MigrationError);
    }

    #[test]
    fn test_migration_fn_clone_shares_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let migration = MigrationFn::new("0.1", move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let cloned = migration.clone();

        migration.apply().unwrap();
        cloned.apply().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cloned.version(), migration.version());
    }

    #[test]
    fn test_migration_fn_debug_elides_closure() {
        let migration = MigrationFn::new("0.3", || Ok(()));
        let debug_str = format!("{:?}", migration);
        assert!(debug_str.contains("MigrationFn"));
        assert!(debug_str.contains("0.3"));
        assert!(debug_str.contains("<closure>"));
    }
}
