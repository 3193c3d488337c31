//! # INI Configuration Parser
//!
//! A configuration engine for INI-style files: `[section]` headers followed
//! by `key = value` entries, with a shared defaults section, multi-line
//! values, comments and value interpolation.
//!
//! ## Overview
//!
//! Text is read line by line into an ordered, case-insensitive store of
//! sections. Values stay raw in the store; interpolation happens on read, so
//! changing a referenced option changes every value that refers to it.
//!
//! ## Key Features
//!
//! - **Defaults Section**: options in `[DEFAULT]` are visible from every section
//! - **Interpolation**: `%(name)s` (basic) or `${section:name}` (extended)
//! - **Multi-line Values**: indented continuation lines, optionally keeping blank lines
//! - **Strict Mode**: duplicate sections and options are rejected with their line
//! - **Error Aggregation**: malformed lines are collected and reported together
//! - **Round-trip Rendering**: write back text that reads into the same configuration
//! - **Serde Integration**: deserialize a section into any `#[derive(Deserialize)]` type
//!
//! ## Basic Usage
//!
//! ```rust
//! use ini_configparser::Configuration;
//!
//! let text = "
//! [DEFAULT]
//! base = /srv
//!
//! [server]
//! root = %(base)s/www
//! port = 8080
//! debug = off
//! ";
//!
//! let config: Configuration = text.parse()?;
//! assert_eq!(config.get("server", "root")?, "/srv/www");
//! assert_eq!(config.get_int("server", "port")?, 8080);
//! assert!(!config.get_bool("server", "debug")?);
//! # Ok::<(), ini_configparser::IniError>(())
//! ```
//!
//! ## Parse Options
//!
//! ```rust
//! use ini_configparser::{Configuration, InterpolationMode, ParseOptions};
//!
//! let options = ParseOptions::default()
//!     .with_interpolation(InterpolationMode::Extended)
//!     .with_allow_no_value(true)
//!     .with_inline_comment_prefixes([";"]);
//!
//! let mut config = Configuration::with_options(options);
//! config.read("[paths]\nroot = /srv ; comment\n[app]\nlog = ${paths:root}/log\nverbose\n", "app.ini")?;
//! assert_eq!(config.get("app", "log")?, "/srv/log");
//! assert_eq!(config.get_raw("app", "verbose")?, None);
//! # Ok::<(), ini_configparser::IniError>(())
//! ```
//!
//! ## Serde Integration
//!
//! ```rust
//! use ini_configparser::Configuration;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tls: bool,
//! }
//!
//! let config: Configuration = "[server]\nhost = example.org\nport = 443\ntls = yes\n".parse()?;
//! let server: Server = config.deserialize_section("server")?;
//! assert_eq!(server.port, 443);
//! # Ok::<(), ini_configparser::IniError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`IniError`]; [`IniError::kind`] gives a
//! matchable [`ErrorKind`], and read errors carry the source name and line.

pub mod classifier;
pub mod coerce;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod interpolation;
pub mod options;
pub mod parser;
pub mod store;
pub mod writer;


// Re-export main types
pub use config::{Configuration, STRING_SOURCE};
pub use error::{ErrorKind, IniError, LineError, Location, ParsingErrors, Result};
pub use options::{
    DEFAULT_INTERPOLATION_DEPTH, DEFAULT_SECTION_NAME, InterpolationMode, ParseOptions,
    UNNAMED_SECTION_NAME,
};

// Re-export engine building blocks
pub use deserializer::SectionDeserializer;
pub use interpolation::Interpolator;
pub use parser::{LineParser, parse_into};
pub use store::{SectionItems, Store};
