//! Controller vocabulary and device facts
//!
//! Two leaf types everything else builds on:
//!
//! 1. [`logical`] - the device-independent input catalog
//! 2. [`device`] - per-device capability descriptors and fingerprints
//!
//! # Architecture
//!
//! ```text
//! DeviceDescriptor ──► Fingerprint ──► identity / DB lookup
//! LogicalInput ──────► MappingProfile ──► Encoder ──► native token
//! ```

pub mod device;
pub mod logical;

pub use device::{DeviceDescriptor, Fingerprint, InputTechnology};
pub use logical::LogicalInput;
