//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `outfits` - Outfit creation, listing, and creator-only mutation

pub mod auth;
pub mod outfits;

pub use auth::{AuthError, AuthService};
pub use outfits::{OutfitError, OutfitService};
