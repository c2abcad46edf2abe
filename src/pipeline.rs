use crate::error::{NoIngredientsReason, ScanError};
use crate::ingredient::{normalizer::normalize, parser::parse};
use crate::models::{ClassificationOutcome, IngredientResult, RiskLevel};
use crate::rules::{aggregate::aggregate, table::lookup};

/// Classify a free-text ingredient list.
///
/// Parses the text, normalizes each token, looks up its rule and aggregates
/// the overall risk. Safe ingredients carry no source or notes.
///
/// Fails with [`ScanError::NoIngredients`] when nothing usable is parsed;
/// an empty outcome would otherwise read as "safe".
pub fn classify(ingredients_text: Option<&str>) -> Result<ClassificationOutcome, ScanError> {
    let tokens = parse(ingredients_text);
    if tokens.is_empty() {
        return Err(ScanError::no_ingredients(NoIngredientsReason::Unparseable));
    }

    let ingredients: Vec<IngredientResult> = tokens
        .into_iter()
        .map(|raw| {
            let canonical = normalize(&raw);
            let hit = lookup(&canonical);
            let flagged = hit.risk != RiskLevel::Safe;
            IngredientResult {
                raw,
                canonical,
                risk: hit.risk,
                source: flagged.then_some(hit.source),
                notes: hit.notes.filter(|_| flagged).map(str::to_string),
            }
        })
        .collect();

    let overall_risk = aggregate(ingredients.iter().map(|i| i.risk));

    Ok(ClassificationOutcome {
        ingredients,
        overall_risk,
    })
}
