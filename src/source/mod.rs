//! Product data sources.
//!
//! A source turns a barcode into a [`Product`]: `Ok(product)` on success,
//! [`ScanError::NotFound`] when the database has no such product and
//! [`ScanError::Upstream`] on transport or HTTP failures. Sources never retry.

use crate::error::ScanError;
use crate::models::Product;

pub mod open_food_facts;

#[allow(async_fn_in_trait)]
pub trait ProductSource {
    async fn fetch(&self, barcode: &str) -> Result<Product, ScanError>;
}
