//! Request middleware.
//!
//! Bearer-token checks live with the HTTP adapter in
//! [`crate::inbound::http::auth`]; this module holds cross-cutting layers.

pub mod trace;

pub use trace::{Trace, TraceId};
