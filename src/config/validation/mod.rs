//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `validators`: Validators for each configuration section

mod trait_def;
mod validators;

pub use trait_def::Validate;
