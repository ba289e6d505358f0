//! padbind
//!
//! Übersetzt eine geräteunabhängige Eingabebeschreibung in die nativen
//! Bindings eines Emulators, für bis zu acht Geräte gemischter Technologie.
//!
//! ```text
//! DeviceDescriptor ──► identity ──► overrides ──► encoder ──► target ──► BindingSink
//! ```

pub mod config;
pub mod controller;
pub mod mapping;
pub mod target;
