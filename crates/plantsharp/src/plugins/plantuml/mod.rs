//! PlantUML class-diagram emitter
//!
//! Turns declaration syntax trees into a PlantUML document. Namespaces
//! map to packages, class-like types to type blocks, methods to member
//! lines.

mod config;
mod document;
mod generator;
mod modifiers;

pub use config::{derive_module_name, validate_root_namespace, GeneratorConfig, HeaderStyle};
pub use document::{END_MARKER, START_MARKER};
pub use generator::PlantUmlGenerator;
pub use modifiers::{member_flag, member_modifier_flags, type_keyword, type_modifier_flags};
