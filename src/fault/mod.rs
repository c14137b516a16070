//! Faults raised downstream and how they are classified and translated.

pub mod class;
pub mod translator;

pub use crate::error::Fault;
pub use class::FaultClass;
pub use translator::{FaultTranslator, InternalServerErrorTranslator};

/// Borrowed view of a fault, as handed to matchers and translators.
pub type FaultRef<'a> = &'a (dyn std::error::Error + Send + Sync + 'static);
