//! Modul für die Umwandlung logischer Eingaben in native Bindings.
//!
//! Dieses Modul enthält die Binding-Engine: Identitäten für baugleiche Geräte,
//! die Encoder pro Eingabetechnologie, die Override-Kette, die Hotkeys und die
//! Sitzung, die alles in einem Durchlauf zusammenführt.
//!
//! # Ablauf
//!
//! ```text
//! identity ──► overrides ──► encoder ──► hotkey ──► sink
//!                  ▲
//!          mode / special
//! ```

pub mod code;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod hotkey;
pub mod identity;
pub mod keyboard;
pub mod mode;
pub mod mouse;
pub mod overrides;
pub mod profile;
pub mod sdl;
pub mod sink;
pub mod special;
pub mod xinput;

// Re-exports für einfacheren Zugriff
pub use engine::{BindingSession, DeviceFailure, SessionOptions};
pub use error::BindingError;
pub use profile::{MappingProfile, NativeToken};
pub use sink::{BindingSink, ResolvedBinding};
