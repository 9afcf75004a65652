//! Domain layer: client-side entities and the ports the components talk through.
//!
//! - [`entities`] - Status, result, statistics and QR payload types
//! - [`ports`] - Gateway and navigator traits
//!
//! The domain layer has no dependency on the HTTP transport; the components in
//! [`crate::application::services`] receive port implementations explicitly.

pub mod entities;
pub mod ports;
