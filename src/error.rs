use thiserror::Error;

/// Caller-visible failures of a barcode scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid barcode {barcode:?}: must be 8-14 digits")]
    InvalidBarcode { barcode: String },
    #[error("Product {barcode} not found in Open Food Facts")]
    NotFound { barcode: String },
    #[error("Failed to fetch from Open Food Facts: {source}")]
    Upstream {
        #[source]
        source: anyhow::Error,
    },
    #[error("{reason}")]
    NoIngredients { reason: NoIngredientsReason },
}

/// Why a scan ended up with nothing to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoIngredientsReason {
    /// The product carries no ingredients text at all.
    Missing,
    /// Text was present but nothing usable survived parsing.
    Unparseable,
}

impl std::fmt::Display for NoIngredientsReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoIngredientsReason::Missing => write!(f, "Product has no ingredient information"),
            NoIngredientsReason::Unparseable => {
                write!(f, "Could not parse ingredients from product")
            }
        }
    }
}

impl ScanError {
    pub(crate) fn upstream(error: impl Into<anyhow::Error>) -> Self {
        Self::Upstream {
            source: error.into(),
        }
    }

    pub(crate) fn no_ingredients(reason: NoIngredientsReason) -> Self {
        Self::NoIngredients { reason }
    }
}
