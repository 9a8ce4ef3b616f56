//! Action Types
//!
//! The base trait every extension action implements, the scope variants that
//! attach actions to pages, and the command-line capability.

mod base;
mod class;
mod command;
mod scope;

pub use base::*;
pub use class::*;
pub use command::*;
pub use scope::*;
