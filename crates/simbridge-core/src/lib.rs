//! SimBridge Core - Generic data model
//!
//! This crate defines the value types handed across the simulator boundary:
//! - Identifiers and their validator
//! - ArbData (JSON object plus binary arguments)
//! - ArbCmd (ArbData addressed by interface and operation)
//! - The error taxonomy shared with the FFI layer

pub mod arb_cmd;
pub mod arb_data;
pub mod error;
pub mod identifier;

pub use arb_cmd::*;
pub use arb_data::*;
pub use error::*;
pub use identifier::{validate as validate_identifier, Identifier};
