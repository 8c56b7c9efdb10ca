//! CLI command implementations.
//!
//! - `layout` - Run a policy and print the layout report
//! - `holes` - Dump hole outlines as JSON
//! - `export` - Write the layout drawing to DXF or SVG
//! - `config` - Print the effective configuration as YAML
//! - `policies` - List available layout policies

pub mod common;
pub mod config;
pub mod export;
pub mod holes;
pub mod layout;
pub mod policies;

pub use config::cmd_config;
pub use export::{cmd_export, ExportArgs};
pub use holes::cmd_holes;
pub use layout::{cmd_layout, LayoutArgs};
pub use policies::cmd_policies;
