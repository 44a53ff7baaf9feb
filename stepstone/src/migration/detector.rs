use crate::errors::StepstoneResult;

/// Reports the currently-applied version of the target system.
///
/// A detector typically reads the version from wherever the target system
/// records it (a metadata table, a file header, a config key). Failures are
/// the detector's concern and propagate unwrapped through
/// [`MigrationSequencer::migrate_to`](crate::migration::MigrationSequencer::migrate_to).
pub trait VersionDetector: Send + Sync {
    /// Returns the current version marker of the target system.
    fn get_version(&self) -> StepstoneResult<String>;
}
