//! Shared test doubles for the folio crates
//!
//! The gateway only ever talks to the outside world through the backend,
//! so the main double here is a scriptable HTTP backend.

pub mod backend;

pub use backend::*;
