//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof (`blockfall::{core, term,
//! input, adapter, types}`) and hosts the command-line definition shared by
//! the binary and its tests.

pub mod cli;

pub use blockfall_adapter as adapter;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
