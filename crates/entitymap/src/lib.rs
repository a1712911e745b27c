//! ## Crate layout
//! - `core`: the runtime surface: values, discovered templates, records,
//!   statement builders, sessions, and units of work.
//!
//! The `prelude` module mirrors the surface application code touches; driver
//! implementors reach into `core::driver` directly.

pub use entitymap_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{
    error::{Error, Result},
    session::Session,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        error::{Error, Result},
        prelude::*,
    };
    pub use serde::{Deserialize, Serialize};
}
