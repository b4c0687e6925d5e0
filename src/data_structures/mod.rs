//! Arena data structures: geometry descriptors and GPU instances.
//!
//! - `descriptor` contains house, flag and primitive descriptors
//! - `instance` holds per-instance transformation data derived from descriptors

pub mod descriptor;
pub mod instance;
