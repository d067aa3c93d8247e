//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::catalog::{Catalog, Category};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::products::{CategoryQuery, PluginCardView, active_category, filtered_cards};
use crate::state::AppState;

// =============================================================================
// Hero Configuration (Static content)
// =============================================================================

/// Hero section content.
#[derive(Clone)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub primary_cta: String,
    pub primary_url: String,
    pub secondary_cta: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: "Professional Music Production Plugins".to_string(),
            subtitle: "Unleash your creativity, craft perfect sounds".to_string(),
            primary_cta: "Browse Products".to_string(),
            primary_url: "#products-section".to_string(),
            secondary_cta: "Free Trial".to_string(),
        }
    }
}

// =============================================================================
// Feature Highlights
// =============================================================================

/// One entry in the feature strip under the hero.
#[derive(Clone)]
pub struct FeatureHighlight {
    pub title: String,
    pub blurb: String,
    pub icon: &'static str,
}

/// Static feature strip content.
fn feature_highlights() -> Vec<FeatureHighlight> {
    vec![
        FeatureHighlight {
            title: "High Quality Audio".to_string(),
            blurb: "32-bit floating point precision".to_string(),
            icon: "audio-lines",
        },
        FeatureHighlight {
            title: "Full Automation".to_string(),
            blurb: "Complete DAW automation support".to_string(),
            icon: "settings",
        },
        FeatureHighlight {
            title: "Universal Format".to_string(),
            blurb: "VST3, AU, AAX compatibility".to_string(),
            icon: "layers",
        },
        FeatureHighlight {
            title: "Free Updates".to_string(),
            blurb: "Continuous upgrades included".to_string(),
            icon: "download",
        },
    ]
}

// =============================================================================
// Template
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Hero section content.
    pub hero: HeroContent,
    /// Feature strip entries.
    pub highlights: Vec<FeatureHighlight>,
    /// Plugins for the grid, already filtered.
    pub plugins: Vec<PluginCardView>,
    /// Category pills.
    pub categories: &'static [Category],
    /// The active category filter.
    pub active_category: String,
    /// Whether a user is signed in.
    pub authenticated: bool,
    /// Signed-in user's name, for the header.
    pub user_name: Option<String>,
}

/// Display the home page.
#[instrument(skip(state, auth))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    let active = active_category(&query);
    let plugins = filtered_cards(state.catalog(), &active);

    HomeTemplate {
        hero: HeroContent::default(),
        highlights: feature_highlights(),
        plugins,
        categories: Catalog::categories(),
        active_category: active,
        authenticated: auth.is_some(),
        user_name: auth.map(|a| a.user.name),
    }
}
