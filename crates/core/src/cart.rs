//! Shopping-cart domain model.
//!
//! The cart is pure data: the storefront stores one [`Cart`] per session and
//! mutates it only through [`Cart::add`] and [`Cart::remove`]. Lines are
//! unique per product; adding a product that is already in the cart merges
//! into the existing line instead of appending a duplicate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId};

/// One product entry in the cart with an aggregated quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Product title, carried for display.
    pub title: String,
    /// Unit price at the time the line was created.
    pub unit_price: Price,
    /// Number of units; always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// The line subtotal: `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.unit_price.amount * Decimal::from(self.quantity),
            self.unit_price.currency_code,
        )
    }
}

/// A shopping cart.
///
/// Lines keep insertion order so the rendered cart is stable across
/// mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// If a line for `product_id` already exists its quantity is
    /// incremented; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, product_id: ProductId, title: &str, unit_price: Price) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(LineItem {
                product_id,
                title: title.to_owned(),
                unit_price,
                quantity: 1,
            });
        }
    }

    /// Remove the line for a product.
    ///
    /// Removing a product that is not in the cart is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Total price: the sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::USD, |l| l.unit_price.currency_code);

        let amount: Decimal = self
            .lines
            .iter()
            .map(|l| l.unit_price.amount * Decimal::from(l.quantity))
            .sum();

        Price::new(amount, currency)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_with(entries: &[(i32, &str, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, title, dollars, quantity) in entries {
            for _ in 0..quantity {
                cart.add(ProductId::new(id), title, Price::usd(dollars));
            }
        }
        cart
    }

    #[test]
    fn test_add_new_product_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Synth Master Pro", Price::usd(199));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(ProductId::new(2), "Reverb Space", Price::usd(89));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_remove_drops_line() {
        let mut cart = cart_with(&[(1, "Synth Master Pro", 199, 1)]);
        cart.remove(ProductId::new(1));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let cart_before = cart_with(&[(1, "Synth Master Pro", 199, 2)]);
        let mut cart = cart_before.clone();
        cart.remove(ProductId::new(99));

        assert_eq!(cart, cart_before);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        // 199 * 1 + 89 * 2 = 377
        let cart = cart_with(&[(1, "Synth Master Pro", 199, 1), (2, "Reverb Space", 89, 2)]);

        assert_eq!(cart.total(), Price::usd(377));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Price::zero(CurrencyCode::USD));
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(3), "Beat Maker Studio", Price::usd(149));
        cart.add(ProductId::new(3), "Beat Maker Studio", Price::usd(149));

        assert_eq!(cart.lines()[0].line_total(), Price::usd(298));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let cart = cart_with(&[
            (1, "Synth Master Pro", 199, 1),
            (2, "Reverb Space", 89, 1),
            (3, "Beat Maker Studio", 149, 1),
        ]);

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let cart = cart_with(&[(1, "Synth Master Pro", 199, 2)]);
        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
