//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::catalog::{ALL_CATEGORY, Catalog, Category, Plugin};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Plugin display data for templates.
#[derive(Clone)]
pub struct PluginCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    /// Filled portion of the five-star display (e.g., "★★★★").
    pub stars_filled: String,
    /// Remaining unfilled stars (e.g., "★").
    pub stars_empty: String,
    pub review_count: u32,
    pub features: Vec<String>,
    pub artwork: String,
}

impl From<&Plugin> for PluginCardView {
    fn from(plugin: &Plugin) -> Self {
        let filled = plugin.stars_filled();
        Self {
            id: plugin.id.as_i32(),
            name: plugin.name.clone(),
            description: plugin.description.clone(),
            price: plugin.price.to_string(),
            rating: format!("{:.1}", plugin.rating),
            stars_filled: "★".repeat(filled),
            stars_empty: "★".repeat(5usize.saturating_sub(filled)),
            review_count: plugin.review_count,
            features: plugin.features.clone(),
            artwork: plugin.artwork.clone(),
        }
    }
}

/// Category filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Plugin listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub plugins: Vec<PluginCardView>,
    pub categories: &'static [Category],
    pub active_category: String,
    pub authenticated: bool,
    pub user_name: Option<String>,
}

/// Resolve the category filter, defaulting to `all`.
pub fn active_category(query: &CategoryQuery) -> String {
    query
        .category
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORY.to_string())
}

/// Build card views for a category filter.
pub fn filtered_cards(catalog: &Catalog, category: &str) -> Vec<PluginCardView> {
    catalog
        .by_category(category)
        .into_iter()
        .map(PluginCardView::from)
        .collect()
}

/// Display plugin listing page.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    let active = active_category(&query);
    let plugins = filtered_cards(state.catalog(), &active);

    ProductsIndexTemplate {
        plugins,
        categories: Catalog::categories(),
        active_category: active,
        authenticated: auth.is_some(),
        user_name: auth.map(|a| a.user.name),
    }
}
