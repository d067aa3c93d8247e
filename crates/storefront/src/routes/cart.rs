//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart lives in the session and is only writable while signed in; the
//! fragments render a sign-in prompt for guests.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dawe_audio_core::{Cart, ProductId};

use crate::catalog::{Catalog, Category};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub title: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id.as_i32(),
                    title: line.title.clone(),
                    quantity: line.quantity,
                    line_price: line.line_total().to_string(),
                })
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none is stored.
async fn get_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart into the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub categories: &'static [Category],
    pub authenticated: bool,
    pub user_name: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    pub authenticated: bool,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Sign-in prompt fragment, shown when a guest tries to use the cart.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_signin.html")]
pub struct CartSignInTemplate {}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session, auth))]
pub async fn show(OptionalAuth(auth): OptionalAuth, session: Session) -> impl IntoResponse {
    let cart = if auth.is_some() {
        CartView::from(&get_cart(&session).await)
    } else {
        CartView::empty()
    };

    CartShowTemplate {
        cart,
        categories: Catalog::categories(),
        authenticated: auth.is_some(),
        user_name: auth.map(|a| a.user.name),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Guests get the sign-in prompt instead of a cart mutation. Returns the
/// count badge with an HTMX trigger so other fragments refresh themselves.
#[instrument(skip(state, session, auth))]
pub async fn add(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    if auth.is_none() {
        return (StatusCode::UNAUTHORIZED, CartSignInTemplate {}).into_response();
    }

    let product_id = ProductId::new(form.product_id);
    let Some(plugin) = state.catalog().find(product_id) else {
        return (StatusCode::NOT_FOUND, "Unknown product").into_response();
    };

    let mut cart = get_cart(&session).await;
    cart.add(product_id, &plugin.name, plugin.price);

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Error adding to cart").into_response();
    }

    add_breadcrumb(
        "cart",
        "Added product to cart",
        Some(&[("product_id", &product_id.to_string())]),
    );

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response()
}

/// Remove a product's line from the cart (HTMX).
///
/// Removing a product that is not in the cart leaves it unchanged.
#[instrument(skip(session, auth))]
pub async fn remove(
    OptionalAuth(auth): OptionalAuth,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    if auth.is_none() {
        return (StatusCode::UNAUTHORIZED, CartSignInTemplate {}).into_response();
    }

    let mut cart = get_cart(&session).await;
    cart.remove(ProductId::new(form.product_id));

    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
            authenticated: true,
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session, auth))]
pub async fn count(OptionalAuth(auth): OptionalAuth, session: Session) -> impl IntoResponse {
    let count = if auth.is_some() {
        get_cart(&session).await.item_count()
    } else {
        0
    };

    CartCountTemplate { count }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dawe_audio_core::Price;

    #[test]
    fn test_cart_view_from_domain_cart() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Synth Master Pro", Price::usd(199));
        cart.add(ProductId::new(2), "Reverb Space", Price::usd(89));
        cart.add(ProductId::new(2), "Reverb Space", Price::usd(89));

        let view = CartView::from(&cart);

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$377.00");

        let reverb = view
            .items
            .iter()
            .find(|i| i.product_id == 2)
            .expect("line present");
        assert_eq!(reverb.quantity, 2);
        assert_eq!(reverb.line_price, "$178.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.item_count, 0);
    }
}
