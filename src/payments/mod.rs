//! Wompi payment gateway integration
//!
//! Builds authenticated requests against the Wompi API, maps responses into
//! typed records and surfaces gateway failures as typed errors.

pub mod constants;
pub mod error;
pub mod providers;
pub mod traits;
pub mod types;
