use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::ScanError;
use crate::models::Product;

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Client for the Open Food Facts product API (`/api/v2/product/{barcode}.json`).
pub struct OpenFoodFacts {
    client: Client,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, barcode: &str) -> String {
        format!("{}/{}.json", self.base_url, barcode)
    }
}

impl super::ProductSource for OpenFoodFacts {
    async fn fetch(&self, barcode: &str) -> Result<Product, ScanError> {
        let url = self.product_url(barcode);
        debug!(%url, "fetching product");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(ScanError::upstream)?;

        let data: Value = response.json().await.map_err(ScanError::upstream)?;
        product_from_json(barcode, &data)
    }
}

/// Extract a [`Product`] from an Open Food Facts response body.
///
/// The API answers `200` with `status: 0` for unknown barcodes, so the body
/// decides between found and not found. An empty `product` object counts as
/// not found.
fn product_from_json(barcode: &str, data: &Value) -> Result<Product, ScanError> {
    let found = data.get("status").and_then(Value::as_i64) == Some(1);
    let product = data
        .get("product")
        .filter(|p| p.as_object().is_some_and(|fields| !fields.is_empty()));

    let Some(product) = product.filter(|_| found) else {
        return Err(ScanError::NotFound {
            barcode: barcode.to_string(),
        });
    };

    let name = first_non_empty(product, &["product_name", "product_name_en"])
        .unwrap_or(UNKNOWN_PRODUCT)
        .to_string();
    let ingredients_text =
        first_non_empty(product, &["ingredients_text", "ingredients_text_en"]).map(str::to_string);

    Ok(Product {
        name,
        ingredients_text,
    })
}

fn first_non_empty<'a>(product: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| product.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_name_and_ingredients() {
        let body = json!({
            "status": 1,
            "product": {
                "product_name": "Test Product",
                "ingredients_text": "water, sugar, aspartame"
            }
        });
        let product = product_from_json("1234567890128", &body).unwrap();
        assert_eq!(product.name, "Test Product");
        assert_eq!(
            product.ingredients_text.as_deref(),
            Some("water, sugar, aspartame")
        );
    }

    #[test]
    fn test_falls_back_to_english_fields() {
        let body = json!({
            "status": 1,
            "product": {
                "product_name": "",
                "product_name_en": "Cola",
                "ingredients_text_en": "carbonated water, caramel color"
            }
        });
        let product = product_from_json("1234567890128", &body).unwrap();
        assert_eq!(product.name, "Cola");
        assert_eq!(
            product.ingredients_text.as_deref(),
            Some("carbonated water, caramel color")
        );
    }

    #[test]
    fn test_unknown_name_and_missing_ingredients() {
        let body = json!({"status": 1, "product": {"product_name": "", "ingredients_text": ""}});
        let product = product_from_json("1234567890128", &body).unwrap();
        assert_eq!(product.name, UNKNOWN_PRODUCT);
        assert_eq!(product.ingredients_text, None);
    }

    #[test]
    fn test_whitespace_only_fields_are_kept() {
        let body = json!({
            "status": 1,
            "product": {"product_name": "  ", "ingredients_text": "   "}
        });
        let product = product_from_json("12345678", &body).unwrap();
        assert_eq!(product.name, "  ");
        assert_eq!(product.ingredients_text.as_deref(), Some("   "));
    }

    #[test]
    fn test_empty_product_is_not_found() {
        let body = json!({"status": 1, "product": {}});
        assert!(matches!(
            product_from_json("12345678", &body),
            Err(ScanError::NotFound { .. })
        ));
    }

    #[test]
    fn test_status_zero_is_not_found() {
        let body = json!({"status": 0, "product": null});
        assert!(matches!(
            product_from_json("1234567890128", &body),
            Err(ScanError::NotFound { .. })
        ));
    }

    #[test]
    fn test_missing_product_is_not_found() {
        let body = json!({"status": 1});
        assert!(matches!(
            product_from_json("1234567890128", &body),
            Err(ScanError::NotFound { .. })
        ));
    }

    #[test]
    fn test_product_url_trims_trailing_slash() {
        let config = SourceConfig {
            base_url: "http://localhost:8080/api/v2/product/".to_string(),
            ..SourceConfig::default()
        };
        let source = OpenFoodFacts::new(&config).unwrap();
        assert_eq!(
            source.product_url("12345678"),
            "http://localhost:8080/api/v2/product/12345678.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_upstream_failure() {
        use crate::source::ProductSource;

        let config = SourceConfig {
            // Port 9 (discard) on localhost is not an HTTP server.
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout_secs: 2,
            ..SourceConfig::default()
        };
        let source = OpenFoodFacts::new(&config).unwrap();
        assert!(matches!(
            source.fetch("12345678").await,
            Err(ScanError::Upstream { .. })
        ));
    }
}
