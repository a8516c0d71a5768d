//! Library crate for hscan
//!
//! This exposes the scan pipeline for integration tests and library usage.
//!
//! # Features
//!
//! - **Hash Databases**: Load flat directories of digest lists into one
//!   queryable in-memory set
//! - **Content Hashing**: SHA-1 digests over full file content
//! - **Bounded Scanning**: Recursive traversal feeding a fixed worker pool
//! - **Match Logging**: Line-atomic append sinks and guarded match counters
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`db`]: Reference hash database loading and lookup
//! - [`hash`]: File content hashing
//! - [`pool`]: Bounded worker pool
//! - [`progress`]: Terminal status line
//! - [`scan`]: Traversal and hash-and-match pipeline
//! - [`sink`]: Match and error log sinks
//! - [`sniff`]: Plain-text probe for database files
//! - [`stats`]: Shared scan counters

pub mod cli;
pub mod db;
pub mod hash;
pub mod pool;
pub mod progress;
pub mod scan;
pub mod sink;
pub mod sniff;
pub mod stats;

pub use cli::Args;
pub use db::{HashDatabase, SourceIndex};
pub use scan::{ScanContext, ScanOptions, scan_tree};
pub use sink::{ErrorSink, LineSink, MatchCounters, MatchRecorder};
pub use stats::ScanStats;
