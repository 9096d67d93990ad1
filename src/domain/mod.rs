//! Domain Module
//!
//! Core domain types (addresses, records, mutation payloads) and the trait
//! seams the registry depends on.

pub mod address;
pub mod ports;
pub mod record;

pub use address::*;
pub use ports::*;
pub use record::*;
