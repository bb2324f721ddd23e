use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{OrderProduct, Product},
};

/// Product selections of one community manager session, in insertion order.
/// Every stored quantity is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Cart {
    items: Vec<OrderProduct>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[OrderProduct] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
    }

    /// Adds to an existing line or appends a new one.
    pub fn add(&mut self, product: &Product, quantity: i64) -> AppResult<()> {
        let quantity = positive(quantity)?;
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(AppError::InvalidQuantity)?;
            }
            None => self.items.push(OrderProduct {
                product_id: product.id.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Overwrites a line's quantity; zero or less drops the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> AppResult<()> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        let quantity = positive(quantity)?;
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Puts back lines taken out for an order that could not be stored. They
    /// go in front of anything added since and merge with matching lines.
    pub fn restore(&mut self, lines: Vec<OrderProduct>) {
        let added = std::mem::replace(&mut self.items, lines);
        for line in added {
            match self.items.iter_mut().find(|i| i.product_id == line.product_id) {
                Some(item) => item.quantity = item.quantity.saturating_add(line.quantity),
                None => self.items.push(line),
            }
        }
    }

    /// Sum of quantity times unit price, in cents. Lines whose product is not
    /// in the catalog contribute nothing.
    pub fn total(&self, catalog: &[Product]) -> i64 {
        line_total(&self.items, catalog)
    }

    /// Number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

pub fn line_total(items: &[OrderProduct], catalog: &[Product]) -> i64 {
    items
        .iter()
        .filter_map(|item| {
            catalog
                .iter()
                .find(|p| p.id == item.product_id)
                .map(|p| p.price * i64::from(item.quantity))
        })
        .sum()
}

fn positive(quantity: i64) -> AppResult<u32> {
    if quantity <= 0 {
        return Err(AppError::InvalidQuantity);
    }
    u32::try_from(quantity).map_err(|_| AppError::InvalidQuantity)
}
