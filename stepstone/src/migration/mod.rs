//! Version-ordered migration sequencing.
//!
//! This module holds the sequencing machinery for upgrading a target system
//! between two known versions by replaying only the migrations that fall
//! between them.
//!
//! # Migration Process
//!
//! A migration run:
//! 1. Registers migration units with the sequencer in any order
//! 2. Resolves a lower bound, either supplied explicitly or read from a
//!    [`VersionDetector`]
//! 3. Applies every unit strictly between the lower and upper bound, in
//!    ascending version order
//!
//! # Creating Migrations
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stepstone::migration::{MigrationFn, MigrationSequencer};
//!
//! let sequencer = MigrationSequencer::new();
//! sequencer.register(Arc::new(MigrationFn::new("0.1", || {
//!     // mutate the target system
//!     Ok(())
//! })))?;
//!
//! sequencer.migrate(Some("0.0"), Some("0.2"))?;
//! ```
//!
//! # Boundary Semantics
//!
//! Both bounds are exclusive: the unit whose version equals the lower bound
//! is considered already applied, and the unit at the upper bound is left to
//! the state being migrated to. Chaining `migrate(X, Y)` then
//! `migrate(Y, Z)` therefore never applies the unit at Y twice.
//!
//! # Failure Semantics
//!
//! Unit failures propagate immediately and halt the remaining range. Units
//! before the failure point have already run; the operator re-runs with an
//! adjusted lower bound.

mod detector;
mod migration;
mod sequencer;

pub use detector::VersionDetector;
pub use migration::{Migration, MigrationFn};
pub use sequencer::MigrationSequencer;
