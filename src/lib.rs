//! Read and bump the `version = "..."` assignment of a project manifest.
//!
//! [`updater`] holds the two pure operations a release tool needs; the
//! remaining modules back the `verbump` command line.

pub mod agents;
pub mod cli;
pub mod error;
pub mod fields;
pub mod release;
pub mod updater;
pub mod utils;
pub mod workflow;

pub use error::{Result, VerbumpError};
pub use updater::{FALLBACK_VERSION, read_version, write_version};
