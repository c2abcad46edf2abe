use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::cache::ResultCache;
use crate::error::{NoIngredientsReason, ScanError};
use crate::models::ScanReport;
use crate::pipeline::classify;
use crate::rules::metadata::RULES_VERSION;
use crate::source::ProductSource;

/// EAN-8, UPC-A, EAN-13 and GTIN-14.
static BARCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8,14}$").expect("barcode pattern is valid"));

pub fn validate_barcode(barcode: &str) -> bool {
    BARCODE.is_match(barcode)
}

/// Scan one barcode.
///
/// A fresh cache entry short-circuits everything and is returned with
/// `cached = true`. Otherwise the product is fetched, its ingredients are
/// classified and the report is cached before being returned.
pub async fn scan<S, C>(barcode: &str, source: &S, cache: &C) -> Result<ScanReport, ScanError>
where
    S: ProductSource,
    C: ResultCache + ?Sized,
{
    let barcode = barcode.trim();
    if !validate_barcode(barcode) {
        return Err(ScanError::InvalidBarcode {
            barcode: barcode.to_string(),
        });
    }

    if let Some(mut report) = cache.get(barcode) {
        debug!(barcode, "cache hit");
        report.cached = true;
        return Ok(report);
    }

    let product = source.fetch(barcode).await?;
    let Some(text) = product.ingredients_text.as_deref() else {
        return Err(ScanError::no_ingredients(NoIngredientsReason::Missing));
    };

    let outcome = classify(Some(text))?;
    info!(
        barcode,
        ingredients = outcome.ingredients.len(),
        overall_risk = %outcome.overall_risk,
        "classified product"
    );

    let report = ScanReport {
        barcode: barcode.to_string(),
        product_name: product.name,
        ingredients: outcome.ingredients,
        overall_risk: outcome.overall_risk,
        cached: false,
        rules_version: RULES_VERSION.to_string(),
    };

    cache.put(barcode, &report);
    Ok(report)
}
