//! Shared helpers used by several indicator modules.

pub mod math;
