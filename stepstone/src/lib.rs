//! # Stepstone - Version-Ordered Migration Sequencer
//!
//! Stepstone holds an unordered collection of versioned migration units,
//! orders them by semantic version, and applies the contiguous sub-range
//! strictly between a "from" and a "to" marker, in ascending order. It is
//! typically used to bring a persisted schema or state from one known
//! version to another by replaying only the migrations that fall between
//! those two markers.
//!
//! ## Key Features
//!
//! - **Numeric version ordering**: dot-delimited segments compared by value,
//!   so "0.2" sorts before "0.10"
//! - **Exclusive bounds**: the already-applied lower bound is never re-run
//!   and the target version is never run, so chained ranges never overlap
//! - **Pluggable collaborators**: a [`migration::Migration`] unit carries the
//!   state-changing logic, a [`migration::VersionDetector`] reads the current
//!   version of the target system
//! - **Fail fast**: a unit failure halts the remaining range unwrapped, with
//!   no retry and no rollback
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stepstone::migration::{MigrationFn, MigrationSequencer};
//!
//! # fn main() -> stepstone::errors::StepstoneResult<()> {
//! let sequencer = MigrationSequencer::new();
//!
//! sequencer.register(Arc::new(MigrationFn::new("0.1", || {
//!     // add the new column
//!     Ok(())
//! })))?;
//! sequencer.register(Arc::new(MigrationFn::new("0.2", || {
//!     // backfill it
//!     Ok(())
//! })))?;
//!
//! // current state is at 0.1; run everything up to (not including) 0.3
//! sequencer.migrate(Some("0.1"), Some("0.3"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`errors`] - Error types and result definitions
//! - [`migration`] - Migration units, version detection, and sequencing
//! - [`version`] - The version marker type and its total order

pub mod errors;
pub mod migration;
pub mod version;
