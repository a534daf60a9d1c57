//! Core types for Lookbook.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod product;
pub mod username;

pub use id::*;
pub use product::Product;
pub use username::{Username, UsernameError};
