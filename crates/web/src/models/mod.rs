//! Domain models for the web application.

pub mod outfit;
pub mod session;
pub mod user;

pub use outfit::{Outfit, OutfitItem, OutfitSummary};
pub use session::CurrentUser;
pub use session::keys as session_keys;
pub use user::User;
