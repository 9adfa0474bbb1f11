//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, parse_date)
//! - `records` - Record commands (add, update, delete, import, list)
//! - `reports` - Report generation commands

pub mod core;
pub mod records;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use records::*;
pub use reports::*;
