//! # csvconv - Profile-driven CSV normalization
//!
//! csvconv transforms CSV files received in varying shapes into one fixed
//! downstream schema, driven by a reusable JSON profile instead of bespoke code
//! per source.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Reader    │────▶│  Transform  │────▶│  CSV / XLSX │
//! │  (ISO/UTF8) │     │  (decode)   │     │  (profile)  │     │  (writers)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csvconv::{batch, ConsoleSink, Profile, RunMode};
//!
//! let profile = Profile::load("profile.json")?;
//! let mode = RunMode::resolve(&profile.paths)?;
//! let report = batch::run(&profile, &mode, &ConsoleSink::new(false))?;
//! println!("Converted {} files", report.processed());
//! # Ok::<(), csvconv::ConvertError>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per failure kind
//! - [`profile`] - Profile loading and validation
//! - [`table`] - In-memory row table
//! - [`io`] - CSV reading, CSV and XLSX writing
//! - [`transform`] - Derive, header map and the per-file pipeline
//! - [`batch`] - Single-file and directory runs
//! - [`logs`] - Progress sink

// Core modules
pub mod error;
pub mod logs;
pub mod profile;
pub mod table;

// Input / output
pub mod io;

// Transformation
pub mod transform;

// Orchestration
pub mod batch;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    ConfigResult,
    ConvertError,
    ConvertResult,
    PathError,
    PatternError,
    SchemaError,
};

// =============================================================================
// Re-exports - Profile and table
// =============================================================================

pub use profile::{OutputType, Profile, ProfilePaths};
pub use table::Table;

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    convert_file,
    emit,
    transform_table,
    FileNameRule,
    FileReport,
    HeaderRule,
    NO_MATCH,
};

// =============================================================================
// Re-exports - Batch
// =============================================================================

pub use batch::{discover_inputs, BatchReport, RunMode};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{ConsoleSink, LogEntry, LogLevel, LogSink, MemorySink};
