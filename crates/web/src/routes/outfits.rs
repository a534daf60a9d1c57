//! Outfit listing and deletion handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use lookbook_core::OutfitId;

use crate::error::AppError;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::CurrentUser;
use crate::models::outfit::OutfitSummary;
use crate::services::outfits::{OutfitError, OutfitService};
use crate::state::AppState;

/// Outfit display data for the listing page.
#[derive(Clone)]
pub struct OutfitView {
    pub id: OutfitId,
    pub creator: String,
    pub total_price: String,
    pub created_at: String,
    pub item_images: Vec<String>,
    /// Whether the viewer created this outfit (shows edit/delete controls).
    pub is_mine: bool,
}

impl OutfitView {
    fn from_summary(summary: &OutfitSummary, viewer: Option<&CurrentUser>) -> Self {
        let outfit = &summary.outfit;

        Self {
            id: outfit.id,
            creator: summary
                .creator_username
                .as_ref()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            total_price: outfit.total_price.round_dp(2).to_string(),
            created_at: outfit.created_at.format("%Y-%m-%d %H:%M").to_string(),
            item_images: outfit
                .items
                .iter()
                .map(|item| item.image_url.clone())
                .collect(),
            is_mine: viewer.is_some_and(|v| outfit.creator_id == Some(v.id)),
        }
    }
}

/// Outfit listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "outfits/index.html")]
pub struct OutfitsIndexTemplate {
    pub outfits: Vec<OutfitView>,
    pub current_user: Option<CurrentUser>,
}

/// Delete response payload.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Display the public outfit listing, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
) -> Result<Response, AppError> {
    let outfits = OutfitService::new(state.pool());
    let summaries = outfits.list_all().await?;

    let views = summaries
        .iter()
        .map(|summary| OutfitView::from_summary(summary, viewer.as_ref()))
        .collect();

    Ok(OutfitsIndexTemplate {
        outfits: views,
        current_user: viewer,
    }
    .into_response())
}

/// Delete an outfit.
///
/// Creator-only; the ownership check and the delete are a single conditional
/// statement at the storage layer.
#[instrument(skip_all, fields(outfit_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OutfitId>,
) -> Response {
    let outfits = OutfitService::new(state.pool());

    match outfits.delete(id, user.id).await {
        Ok(()) => Json(DeleteResponse { success: true }).into_response(),
        Err(OutfitError::Forbidden) => (
            StatusCode::FORBIDDEN,
            Json(DeleteResponse { success: false }),
        )
            .into_response(),
        Err(OutfitError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(DeleteResponse { success: false }),
        )
            .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lookbook_core::{UserId, Username};

    use crate::models::outfit::{Outfit, OutfitItem};

    fn summary(creator: Option<UserId>) -> OutfitSummary {
        OutfitSummary {
            outfit: Outfit {
                id: OutfitId::new(1),
                creator_id: creator,
                items: vec![OutfitItem {
                    image_url: "https://img.example.com/a.jpg".to_string(),
                    price: "10.00".parse().unwrap(),
                    x: 12.0,
                    y: 34.0,
                }],
                total_price: "10.00".parse().unwrap(),
                created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            },
            creator_username: creator.map(|_| Username::parse("alice").unwrap()),
        }
    }

    fn viewer(id: i32) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            username: Username::parse("alice").unwrap(),
        }
    }

    #[test]
    fn test_view_marks_own_outfit() {
        let view = OutfitView::from_summary(&summary(Some(UserId::new(7))), Some(&viewer(7)));
        assert!(view.is_mine);
    }

    #[test]
    fn test_view_does_not_mark_others_outfits() {
        let view = OutfitView::from_summary(&summary(Some(UserId::new(7))), Some(&viewer(8)));
        assert!(!view.is_mine);

        let view = OutfitView::from_summary(&summary(Some(UserId::new(7))), None);
        assert!(!view.is_mine);
    }

    #[test]
    fn test_view_absent_creator_is_nobodys() {
        // Outfits without a provable owner show as "unknown" and are not
        // editable by anyone.
        let view = OutfitView::from_summary(&summary(None), Some(&viewer(7)));
        assert!(!view.is_mine);
        assert_eq!(view.creator, "unknown");
    }

    #[test]
    fn test_listing_template_renders() {
        let views = vec![OutfitView::from_summary(
            &summary(Some(UserId::new(7))),
            None,
        )];
        let template = OutfitsIndexTemplate {
            outfits: views,
            current_user: None,
        };

        let html = template.render().unwrap();
        assert!(html.contains("alice"));
        assert!(html.contains("10.00"));
    }
}
