use std::sync::{Arc, Mutex};

use stepstone::errors::{ErrorKind, StepstoneError, StepstoneResult};
use stepstone::migration::{Migration, MigrationSequencer, VersionDetector};

/// Shared record of applied version markers, in application order.
pub type ApplyLog = Arc<Mutex<Vec<String>>>;

pub fn apply_log() -> ApplyLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn applied(log: &ApplyLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Migration unit that records its version marker into an [`ApplyLog`] when
/// applied. Optionally fails instead of recording.
pub struct TestMigration {
    version: String,
    log: ApplyLog,
    fail: bool,
}

impl TestMigration {
    pub fn new(version: &str, log: ApplyLog) -> Arc<dyn Migration> {
        Arc::new(TestMigration {
            version: version.to_string(),
            log,
            fail: false,
        })
    }

    pub fn failing(version: &str, log: ApplyLog) -> Arc<dyn Migration> {
        Arc::new(TestMigration {
            version: version.to_string(),
            log,
            fail: true,
        })
    }
}

impl Migration for TestMigration {
    fn version(&self) -> &str {
        &self.version
    }

    fn apply(&self) -> StepstoneResult<()> {
        if self.fail {
            return Err(StepstoneError::new(
                &format!("migration {} failed against the target", self.version),
                ErrorKind::MigrationError,
            ));
        }
        self.log.lock().unwrap().push(self.version.clone());
        Ok(())
    }
}

/// Detector reporting a fixed current version.
pub struct FixedDetector {
    version: String,
}

impl FixedDetector {
    pub fn new(version: &str) -> Arc<dyn VersionDetector> {
        Arc::new(FixedDetector {
            version: version.to_string(),
        })
    }
}

impl VersionDetector for FixedDetector {
    fn get_version(&self) -> StepstoneResult<String> {
        Ok(self.version.clone())
    }
}

/// Builds a sequencer with one [`TestMigration`] per version marker.
pub fn sequencer_with(versions: &[&str], log: &ApplyLog) -> MigrationSequencer {
    let sequencer = MigrationSequencer::new();
    for version in versions {
        sequencer
            .register(TestMigration::new(version, log.clone()))
            .expect("Failed to register migration");
    }
    sequencer
}
