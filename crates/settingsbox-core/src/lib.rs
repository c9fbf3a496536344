//! # settingsbox Core
//!
//! Core types shared by the settings store and the binding widgets:
//! single-threaded shared-state aliases, ordered callback lists and
//! a small RGB color type.

pub mod callbacks;
pub mod color;
pub mod error;
pub mod types;

pub use callbacks::Callbacks;
pub use color::Color;
pub use error::{Error, Result};
pub use types::{shared, shared_vec, Shared, SharedVec};
