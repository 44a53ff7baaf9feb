use crate::errors::{ErrorKind, StepstoneError, StepstoneResult};
use crate::migration::{Migration, VersionDetector};
use crate::version::Version;
use parking_lot::RwLock;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Orders registered migration units by version and applies the sub-range
/// between two version markers.
///
/// # Purpose
/// `MigrationSequencer` holds an unordered registry of [`Migration`] units,
/// exposes them version-sorted, and replays the units strictly between a
/// lower and an upper version marker, in ascending order. It is the piece
/// that decides WHICH units run and in WHAT order; what a unit actually does
/// to the target system stays behind the [`Migration`] trait.
///
/// # Characteristics
/// - Cheaply cloneable: clones share the same registry through `Arc`
/// - Registration appends without ordering; the sorted view is materialized
///   lazily on read and is a snapshot, so later registration never changes a
///   previously returned view
/// - Duplicate registrations are accepted and sorted like any other entry
/// - Migration runs are synchronous and sequential, one unit at a time
///
/// # Usage
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use stepstone::migration::{MigrationFn, MigrationSequencer};
///
/// let sequencer = MigrationSequencer::new();
/// sequencer.register(Arc::new(MigrationFn::new("0.1", || Ok(()))))?;
/// sequencer.register(Arc::new(MigrationFn::new("0.2", || Ok(()))))?;
///
/// // applies 0.2 only: 0.1 is the already-applied lower bound
/// sequencer.migrate(Some("0.1"), None)?;
/// ```
#[derive(Clone)]
pub struct MigrationSequencer {
    inner: Arc<SequencerInner>,
}

struct SequencerInner {
    registry: RwLock<Vec<Arc<dyn Migration>>>,
    version_detector: Option<Arc<dyn VersionDetector>>,
}

impl MigrationSequencer {
    /// Creates a sequencer without a version detector.
    ///
    /// [`migrate_to`](Self::migrate_to) on such a sequencer fails with
    /// `MissingVersionDetector`; the two-bound [`migrate`](Self::migrate) is
    /// unaffected.
    pub fn new() -> Self {
        MigrationSequencer {
            inner: Arc::new(SequencerInner {
                registry: RwLock::new(Vec::new()),
                version_detector: None,
            }),
        }
    }

    /// Creates a sequencer whose lower bound can be read from `detector`.
    pub fn with_detector(detector: Arc<dyn VersionDetector>) -> Self {
        MigrationSequencer {
            inner: Arc::new(SequencerInner {
                registry: RwLock::new(Vec::new()),
                version_detector: Some(detector),
            }),
        }
    }

    /// Registers a migration unit.
    ///
    /// # Arguments
    /// * `migration` - The unit to append to the registry
    ///
    /// # Returns
    /// `Ok(())` - Unit appended
    /// `Err(StepstoneError)` - `ValidationError` if the unit's version marker
    ///   is empty
    ///
    /// # Behavior
    /// No ordering is performed at registration time; ordering is computed
    /// lazily on read. The version marker is not parsed here either, so a
    /// malformed (non-numeric) marker is accepted now and surfaces as
    /// `MalformedVersion` from any operation that needs the sorted view.
    /// Registering the same unit twice is accepted and both entries appear in
    /// sorted output.
    pub fn register(&self, migration: Arc<dyn Migration>) -> StepstoneResult<()> {
        if migration.version().is_empty() {
            log::error!("Rejected migration with an empty version marker");
            return Err(StepstoneError::new(
                "Migration version marker must not be empty",
                ErrorKind::ValidationError,
            ));
        }

        self.inner.registry.write().push(migration);
        Ok(())
    }

    /// Returns the number of registered units.
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// Returns true if no units are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.registry.read().is_empty()
    }

    /// Returns all registered units sorted ascending by version.
    ///
    /// # Returns
    /// `Ok(Vec<Arc<dyn Migration>>)` - A newly materialized snapshot; later
    ///   registration does not retroactively change it
    /// `Err(StepstoneError)` - `MalformedVersion` if any registered marker
    ///   cannot be parsed
    ///
    /// # Behavior
    /// Sorting is stable, so units with equal versions keep their
    /// registration order relative to each other.
    pub fn migrations(&self) -> StepstoneResult<Vec<Arc<dyn Migration>>> {
        let entries = self.sorted_entries()?;
        Ok(entries.into_iter().map(|(_, migration)| migration).collect())
    }

    /// Computes the applicable sub-range without applying anything.
    ///
    /// # Arguments
    /// * `from_version` - Lower exclusion marker; `None` means no lower bound
    /// * `to_version` - Upper exclusion marker; `None` means no upper bound
    ///
    /// # Returns
    /// `Ok(Vec<Arc<dyn Migration>>)` - The units [`migrate`](Self::migrate)
    ///   would apply, in application order
    /// `Err(StepstoneError)` - `MalformedVersion` for an unparsable bound or
    ///   registered marker
    ///
    /// # Behavior
    /// Both bounds are exclusive. The range starts immediately after the LAST
    /// sorted entry whose version equals `from_version` (everything up to and
    /// including that entry is excluded), or at the beginning when nothing
    /// matches. Within the remainder, the range ends immediately before the
    /// LAST entry whose version equals `to_version`, or at the end when
    /// nothing matches. Bound equality is semantic: "0.2.0" matches a unit
    /// registered as "0.2".
    pub fn plan(
        &self,
        from_version: Option<&str>,
        to_version: Option<&str>,
    ) -> StepstoneResult<Vec<Arc<dyn Migration>>> {
        let mut entries = self.sorted_entries()?;
        let registered = entries.len();

        if let Some(marker) = from_version {
            let from = Version::parse(marker)?;
            if let Some(index) = entries.iter().rposition(|(version, _)| *version == from) {
                entries.drain(..=index);
            }
        }

        if let Some(marker) = to_version {
            let to = Version::parse(marker)?;
            if let Some(index) = entries.iter().rposition(|(version, _)| *version == to) {
                entries.truncate(index);
            }
        }

        log::debug!(
            "Planned {} of {} registered migrations (from {:?}, to {:?})",
            entries.len(),
            registered,
            from_version,
            to_version
        );
        Ok(entries.into_iter().map(|(_, migration)| migration).collect())
    }

    /// Applies every unit strictly between the two version markers, in
    /// ascending version order.
    ///
    /// # Arguments
    /// * `from_version` - Lower exclusion marker; `None` means no lower bound
    /// * `to_version` - Upper exclusion marker; `None` means no upper bound
    ///
    /// # Returns
    /// `Ok(())` - Every selected unit applied
    /// `Err(StepstoneError)` - `MalformedVersion` for an unparsable marker,
    ///   or whatever error the failing unit returned
    ///
    /// # Behavior
    /// The unit at `from_version` is never re-applied and the unit at
    /// `to_version` is never applied, so `migrate(X, Y)` followed by
    /// `migrate(Y, Z)` never double-applies the unit at Y. A unit failure
    /// propagates immediately, unwrapped: units before the failure point have
    /// already run, the rest of the range is halted, and nothing is rolled
    /// back. The operator re-runs with an adjusted lower bound.
    pub fn migrate(
        &self,
        from_version: Option<&str>,
        to_version: Option<&str>,
    ) -> StepstoneResult<()> {
        let selected = self.plan(from_version, to_version)?;

        for migration in selected {
            log::info!("Applying migration {}", migration.version());
            migration.apply()?;
        }
        Ok(())
    }

    /// Applies every unit strictly between the detector-reported current
    /// version and `to_version`.
    ///
    /// # Arguments
    /// * `to_version` - Upper exclusion marker
    ///
    /// # Returns
    /// `Ok(())` - Every selected unit applied
    /// `Err(StepstoneError)` - `MissingVersionDetector` if the sequencer was
    ///   built without a detector (raised before any filtering), a detector
    ///   failure, or any [`migrate`](Self::migrate) error
    pub fn migrate_to(&self, to_version: &str) -> StepstoneResult<()> {
        let detector = self.inner.version_detector.as_ref().ok_or_else(|| {
            log::error!("Detector-sourced migration requested without a configured version detector");
            StepstoneError::new(
                "No version detector configured",
                ErrorKind::MissingVersionDetector,
            )
        })?;

        let current = detector.get_version()?;
        self.migrate(Some(&current), Some(to_version))
    }

    /// Snapshots the registry and pairs each unit with its parsed version,
    /// sorted ascending. The registry lock is released before any parsing or
    /// sorting happens.
    fn sorted_entries(&self) -> StepstoneResult<Vec<(Version, Arc<dyn Migration>)>> {
        let snapshot: Vec<Arc<dyn Migration>> = self.inner.registry.read().clone();

        let mut entries = Vec::with_capacity(snapshot.len());
        for migration in snapshot {
            let version = Version::parse(migration.version())?;
            entries.push((version, migration));
        }

        // stable sort keeps registration order for equal versions
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(entries)
    }
}

impl Default for MigrationSequencer {
    fn default() -> Self {
        MigrationSequencer::new()
    }
}

impl Debug for MigrationSequencer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationSequencer")
            .field("registered", &self.len())
            .field("has_detector", &self.inner.version_detector.is_some())
            .finish()
    }
}
