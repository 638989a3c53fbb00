use smartstring::{LazyCompact, SmartString};

pub mod case_convention;
pub mod command;
pub mod config;
pub mod document;
pub mod escape;
pub mod selection;
pub mod sort;
pub mod transform;

pub type Tendril = SmartString<LazyCompact>;
