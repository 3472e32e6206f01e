//! Cart service — line items and derived totals.
//!
//! DESIGN
//! ======
//! A line item snapshots the product's name, price, and image when it is
//! first added. Later catalog changes never reach lines already in the cart.
//!
//! Item count and total are computed from the lines on every call and are
//! never stored, so they cannot drift from the line items.

use serde::Serialize;

use super::catalog::Product;
use super::money::Cents;

/// Largest quantity a single line can hold.
pub const MAX_QUANTITY: u32 = 99;

/// One distinct product in the cart. `quantity` is between 1 and
/// [`MAX_QUANTITY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Cents,
    pub quantity: u32,
    pub image: String,
}

impl CartItem {
    #[must_use]
    pub fn subtotal(&self) -> Cents {
        self.price.times(self.quantity)
    }
}

/// Result of a quantity update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    Updated(CartItem),
    Removed(CartItem),
    Missing,
}

/// Line items in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`, creating the line if needed. A line
    /// already at [`MAX_QUANTITY`] stays there.
    pub fn add(&mut self, product: &Product) -> &CartItem {
        let index = match self.items.iter().position(|item| item.id == product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY);
                index
            }
            None => {
                self.items.push(CartItem {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    price: product.price,
                    quantity: 1,
                    image: product.image.clone(),
                });
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Set a line's quantity, capped at [`MAX_QUANTITY`]. Zero removes the
    /// line.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> CartChange {
        if quantity == 0 {
            return match self.remove(id) {
                Some(item) => CartChange::Removed(item),
                None => CartChange::Missing,
            };
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity.min(MAX_QUANTITY);
                CartChange::Updated(item.clone())
            }
            None => CartChange::Missing,
        }
    }

    /// Delete a line, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Cents {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

/// Apply a signed step to a quantity, keeping it within 0..=`MAX_QUANTITY`.
#[must_use]
pub fn clamp_quantity(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta).clamp(0, i64::from(MAX_QUANTITY));
    u32::try_from(next).unwrap_or(MAX_QUANTITY)
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
