//! Core application primitives: cycle runtime, scheduler, HTTP surface

pub mod http;
pub mod runtime;
pub mod scheduler;

pub use http::*;
pub use runtime::*;
pub use scheduler::*;
