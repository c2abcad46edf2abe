use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::ingredient::normalizer::alias_count;
use crate::models::{ClassificationSource, IngredientResult, RiskLevel, ScanReport};
use crate::rules::metadata::RulesMetadata;
use crate::rules::table::RiskRule;

/// Render scan reports followed by a line per failed barcode.
pub fn render_scans(
    reports: &[ScanReport],
    failures: &[(String, String)],
    verbose: bool,
    quiet: bool,
) {
    if !quiet {
        println!(
            "\n {} v{}\n",
            "safeeats".bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    for report in reports {
        if quiet {
            println!(
                "{}  {}  {}{}",
                report.barcode,
                colored_risk(report.overall_risk),
                report.product_name,
                if report.cached { "  (cached)" } else { "" }
            );
            continue;
        }

        println!(" ┌────────────────────────────────────────────────────┐");
        println!(" │  {:<48} │", truncate(&report.product_name, 48).bold());
        println!(" │  {:<48} │", format!("Barcode       : {}", report.barcode));
        println!(
            " │  {:<48} │",
            format!("Overall risk  : {}", report.overall_risk)
        );
        println!(
            " │  {:<48} │",
            format!(
                "Ingredients   : {} ({} flagged)",
                report.ingredients.len(),
                flagged(&report.ingredients).count()
            )
        );
        println!(
            " │  {:<48} │",
            format!(
                "Rules version : {}{}",
                report.rules_version,
                if report.cached { "  (cached)" } else { "" }
            )
        );
        println!(" └────────────────────────────────────────────────────┘\n");

        render_ingredients(&report.ingredients, verbose);
        println!();
    }

    for (barcode, reason) in failures {
        println!(" {} {}: {}", "[ERROR]".red().bold(), barcode, reason);
    }
}

/// Render the classification of a free-text ingredient list.
pub fn render_classification(
    ingredients: &[IngredientResult],
    overall: RiskLevel,
    verbose: bool,
    quiet: bool,
) {
    if quiet {
        println!(
            "Overall: {}  Ingredients: {}  Flagged: {}",
            colored_risk(overall),
            ingredients.len(),
            flagged(ingredients).count()
        );
        return;
    }

    println!("\n Overall risk: {}\n", colored_risk(overall));
    render_ingredients(ingredients, verbose);
}

/// Render rules metadata, the source priority list and the rule table.
pub fn render_rules(
    meta: &RulesMetadata,
    rules: &[(&str, &RiskRule)],
    verbose: bool,
    quiet: bool,
) {
    if quiet {
        println!(
            "Rules: {}  Updated: {}  Entries: {}  Aliases: {}",
            meta.version,
            meta.last_updated,
            rules.len(),
            alias_count()
        );
        return;
    }

    println!("\n {} {}", "Rules version".bold(), meta.version);
    println!(" Last updated: {}", meta.last_updated);
    println!(" Entries: {}  Aliases: {}\n", rules.len(), alias_count());
    for source in &meta.sources {
        println!("   • {}", source);
    }
    println!("\n {}", meta.conflict_resolution);
    println!(" {}\n", meta.disclaimer.dimmed());

    let mut priorities = Table::new();
    priorities.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Source").add_attribute(Attribute::Bold),
        Cell::new("Priority").add_attribute(Attribute::Bold),
    ]);
    for source in ClassificationSource::ALL {
        priorities.add_row(vec![
            Cell::new(source.to_string()),
            Cell::new(source.priority()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", priorities);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Ingredient").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);
    for (name, rule) in rules {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(rule.risk.to_string()).fg(risk_color(rule.risk)),
            Cell::new(rule.source.to_string()),
            Cell::new(if verbose { rule.notes.as_str() } else { "" }),
        ]);
    }
    println!("{}", table);
}

fn render_ingredients(ingredients: &[IngredientResult], verbose: bool) {
    let shown: Vec<&IngredientResult> = if verbose {
        ingredients.iter().collect()
    } else {
        flagged(ingredients).collect()
    };

    if shown.is_empty() {
        println!(" {} No flagged ingredients.", "[SAFE]".green().bold());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Ingredient").add_attribute(Attribute::Bold),
            Cell::new("Canonical").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);

    for result in shown {
        table.add_row(vec![
            Cell::new(&result.raw),
            Cell::new(&result.canonical),
            Cell::new(result.risk.to_string())
                .fg(risk_color(result.risk))
                .set_alignment(CellAlignment::Center),
            Cell::new(result.source.map(|s| s.to_string()).unwrap_or_default()),
            Cell::new(result.notes.as_deref().unwrap_or("")),
        ]);
    }

    println!("{}", table);
}

fn flagged(ingredients: &[IngredientResult]) -> impl Iterator<Item = &IngredientResult> {
    ingredients.iter().filter(|i| i.risk != RiskLevel::Safe)
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Safe => Color::Green,
        RiskLevel::Low => Color::Cyan,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::High => Color::Red,
        RiskLevel::Critical => Color::Magenta,
    }
}

fn colored_risk(risk: RiskLevel) -> ColoredString {
    let text = risk.to_string();
    match risk {
        RiskLevel::Safe => text.green(),
        RiskLevel::Low => text.cyan(),
        RiskLevel::Moderate => text.yellow(),
        RiskLevel::High => text.red(),
        RiskLevel::Critical => text.magenta().bold(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("abcdefghij", 5).chars().count(), 5);
    }

    #[test]
    fn test_flagged_skips_safe() {
        let outcome = crate::pipeline::classify(Some("water, aspartame, salt")).unwrap();
        let names: Vec<&str> = flagged(&outcome.ingredients)
            .map(|i| i.raw.as_str())
            .collect();
        assert_eq!(names, vec!["aspartame"]);
    }
}
