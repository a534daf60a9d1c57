//! Studio route handlers.
//!
//! The canvas page, saving a composition, and importing a product from an
//! external link. Save and import are JSON endpoints used by the canvas
//! script; both require an authenticated user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lookbook_core::{OutfitId, Product};

use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::models::outfit::OutfitItem;
use crate::services::outfits::OutfitService;
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Canvas save payload.
///
/// The client also sends a `total_price`; it is deliberately not modeled
/// here — the server recomputes the total from the items and ignores the
/// client's value.
#[derive(Debug, Deserialize)]
pub struct SavePayload {
    pub items: Vec<OutfitItem>,
}

/// Canvas save response.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfit_id: Option<OutfitId>,
}

/// Link import payload.
#[derive(Debug, Deserialize)]
pub struct ImportPayload {
    pub url: String,
}

/// Link import response.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Studio canvas page template.
#[derive(Template, WebTemplate)]
#[template(path = "studio/index.html")]
pub struct StudioTemplate {
    /// JSON-serialized items to seed the canvas with (`[]` for a blank one).
    pub seed_items: String,
    pub current_user: CurrentUser,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display a blank studio canvas.
pub async fn index(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    StudioTemplate {
        seed_items: "[]".to_string(),
        current_user: user,
    }
}

/// Display a canvas seeded from an existing outfit.
///
/// Creator-only; editing replaces — a later save creates a new record.
/// Forbidden or missing outfits redirect to the public listing.
#[instrument(skip_all, fields(outfit_id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OutfitId>,
) -> Response {
    let outfits = OutfitService::new(state.pool());

    match outfits.get_for_edit(id, user.id).await {
        Ok(outfit) => {
            let seed_items = serde_json::to_string(&outfit.items)
                .unwrap_or_else(|_| "[]".to_string());

            StudioTemplate {
                seed_items,
                current_user: user,
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(outfit_id = %id, error = %e, "edit refused");
            Redirect::to("/outfits").into_response()
        }
    }
}

/// Save the canvas as a new outfit.
///
/// The total price is recomputed server-side from the submitted items.
#[instrument(skip_all)]
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<SavePayload>,
) -> Response {
    let outfits = OutfitService::new(state.pool());

    match outfits.create(user.id, payload.items).await {
        Ok(outfit) => Json(SaveResponse {
            success: true,
            outfit_id: Some(outfit.id),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to save outfit");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse {
                    success: false,
                    outfit_id: None,
                }),
            )
                .into_response()
        }
    }
}

/// Import a product from an external page.
///
/// Failures come back as a JSON payload so the canvas script can show them
/// inline.
#[instrument(skip_all)]
pub async fn import_link(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(payload): Json<ImportPayload>,
) -> Json<ImportResponse> {
    match state.importer().import_from_url(&payload.url).await {
        Ok(item) => Json(ImportResponse {
            success: true,
            item: Some(item),
            error: None,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "link import failed");
            Json(ImportResponse {
                success: false,
                item: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lookbook_core::{UserId, Username};

    #[test]
    fn test_save_payload_ignores_client_total() {
        // The wire payload carries total_price; only items are modeled.
        let payload: SavePayload = serde_json::from_str(
            r#"{"items":[{"image_url":"https://img.example.com/x.jpg","price":10.0,"x":1.0,"y":2.0}],"total_price":999.99}"#,
        )
        .unwrap();

        assert_eq!(payload.items.len(), 1);
    }

    #[test]
    fn test_save_response_omits_missing_outfit_id() {
        let json = serde_json::to_string(&SaveResponse {
            success: false,
            outfit_id: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"success":false}"#);
    }

    #[test]
    fn test_studio_template_renders_seed_items() {
        let template = StudioTemplate {
            seed_items: r#"[{"image_url":"https://img.example.com/x.jpg","price":"10.00","x":1.0,"y":2.0}]"#.to_string(),
            current_user: CurrentUser {
                id: UserId::new(1),
                username: Username::parse("alice").unwrap(),
            },
        };

        let html = template.render().unwrap();
        assert!(html.contains("img.example.com"));
        assert!(html.contains("alice"));
    }
}
