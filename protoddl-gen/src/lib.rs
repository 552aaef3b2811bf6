//! protoddl generator library
//!
//! Loads schema descriptor files and writes the DDL produced by
//! [`protoddl::Generator`] to disk. The CLI (main.rs) uses this library.

pub mod error;
pub mod parser;
pub mod settings;
pub mod writer;

pub use error::GenError;
pub use settings::{resolve_config, ConfigOverrides};
pub use writer::SqlWriter;
