//! Catalog page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use lookbook_core::Product;

use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Product display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    /// External catalog id, as a string for data attributes.
    pub id: String,
    pub name: String,
    pub price_text: String,
    /// Numeric price as a plain string, consumed by the canvas script.
    pub price_value: String,
    pub image_url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_string()).unwrap_or_default(),
            name: product.name.clone(),
            price_text: product.price_text.clone(),
            price_value: product.price_value.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Category id; defaults to the configured category.
    pub cat: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub current_cat: String,
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Display the catalog page.
///
/// Upstream failure degrades to an empty grid with a notice; the page always
/// renders.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let category = query
        .cat
        .unwrap_or_else(|| state.config().catalog.default_category.clone());

    match state.catalog().list_category(&category, 0).await {
        Ok(products) => HomeTemplate {
            products: products.iter().map(ProductCardView::from).collect(),
            current_cat: category,
            error: None,
            current_user: user,
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable, rendering degraded page");
            HomeTemplate {
                products: Vec::new(),
                current_cat: category,
                error: Some("The catalog is temporarily unavailable.".to_string()),
                current_user: user,
            }
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_page_still_renders() {
        let template = HomeTemplate {
            products: Vec::new(),
            current_cat: "4209".to_string(),
            error: Some("The catalog is temporarily unavailable.".to_string()),
            current_user: None,
        };

        let html = template.render().unwrap();
        assert!(html.contains("temporarily unavailable"));
    }

    #[test]
    fn test_page_renders_product_cards() {
        let template = HomeTemplate {
            products: vec![ProductCardView {
                id: "1234".to_string(),
                name: "Linen shirt".to_string(),
                price_text: "21,99 €".to_string(),
                price_value: "21.99".to_string(),
                image_url: "https://img.example.com/x.jpg".to_string(),
            }],
            current_cat: "4209".to_string(),
            error: None,
            current_user: None,
        };

        let html = template.render().unwrap();
        assert!(html.contains("Linen shirt"));
        assert!(html.contains("https://img.example.com/x.jpg"));
    }
}
