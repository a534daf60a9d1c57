//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (optional `cat` query)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! GET  /logout                 - Logout action
//!
//! # Studio (requires auth)
//! GET  /studio                 - Blank canvas
//! GET  /studio/edit/{id}       - Canvas seeded from an existing outfit (creator only)
//! POST /studio/save            - Save the canvas as a new outfit (JSON)
//! POST /studio/import-link     - Import a product from an external page (JSON)
//!
//! # Outfits
//! GET  /outfits                - Public outfit listing
//! POST /outfits/delete/{id}    - Delete an outfit (creator only, JSON)
//! ```

pub mod auth;
pub mod home;
pub mod outfits;
pub mod studio;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the studio routes router.
pub fn studio_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(studio::index))
        .route("/edit/{id}", get(studio::edit))
        .route("/save", post(studio::save))
        .route("/import-link", post(studio::import_link))
}

/// Create the outfit routes router.
pub fn outfit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(outfits::index))
        .route("/delete/{id}", post(outfits::delete))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog page
        .route("/", get(home::home))
        // Studio routes
        .nest("/studio", studio_routes())
        // Outfit routes
        .nest("/outfits", outfit_routes())
        // Auth routes (top-level paths)
        .merge(auth_routes())
}
