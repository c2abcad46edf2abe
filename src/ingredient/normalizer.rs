use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias and e-number table, keyed by lowercase trimmed token.
static INGREDIENT_MAP_JSON: &str = include_str!("../data/ingredient_map.json");

static INGREDIENT_MAP: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    serde_json::from_str(INGREDIENT_MAP_JSON).expect("ingredient_map.json should be valid JSON")
});

/// Map a raw ingredient token to its canonical name.
///
/// Input is lowercased and trimmed first. Known aliases and e-numbers
/// (`e621`, `msg`, `bha`, ...) resolve to their canonical name; anything
/// else passes through as the lowercased, trimmed input.
pub fn normalize(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();
    match INGREDIENT_MAP.get(&normalized) {
        Some(canonical) => canonical.clone(),
        None => normalized,
    }
}

/// Number of aliases known to the normalizer.
pub fn alias_count() -> usize {
    INGREDIENT_MAP.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_e_number_normalization() {
        assert_eq!(normalize("e621"), "monosodium glutamate");
        assert_eq!(normalize("E621"), "monosodium glutamate");
        assert_eq!(normalize("e951"), "aspartame");
    }

    #[test]
    fn test_alias_normalization() {
        assert_eq!(normalize("msg"), "monosodium glutamate");
        assert_eq!(normalize("bha"), "butylated hydroxyanisole");
        assert_eq!(normalize("bht"), "butylated hydroxytoluene");
    }

    #[test]
    fn test_unknown_ingredient_passthrough() {
        assert_eq!(normalize("sugar"), "sugar");
        assert_eq!(normalize("  WATER  "), "water");
    }

    #[test]
    fn test_preserves_canonical_names() {
        assert_eq!(normalize("aspartame"), "aspartame");
        assert_eq!(normalize("sodium benzoate"), "sodium benzoate");
    }

    #[test]
    fn test_idempotent() {
        for input in ["E621", " msg ", "Sugar", "e150d", "unknown thing", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_map_keys_and_targets_are_normalized() {
        for (alias, canonical) in INGREDIENT_MAP.iter() {
            assert_eq!(alias, &alias.trim().to_lowercase(), "alias {alias:?}");
            assert_eq!(canonical, &canonical.trim().to_lowercase(), "target {canonical:?}");
            // A target must not itself be an alias, or normalize would not be idempotent.
            assert_eq!(normalize(canonical), *canonical, "target {canonical:?} remaps");
        }
    }

    #[test]
    fn test_map_is_loaded() {
        assert!(alias_count() > 0);
    }
}
