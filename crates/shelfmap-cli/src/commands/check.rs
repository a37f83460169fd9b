//! Check command - list missing configuration selections and crediting sources.

use std::path::PathBuf;

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use shelfmap::config::CreditSource;
use shelfmap::{Configuration, Shelfmap, TranslationTable};

use super::header_cell;

/// Name shown for operator-entered crediting text.
const OTHER_SOURCE: &str = "OTHER";

pub fn run(
    config_path: PathBuf,
    credits_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuration::load(&config_path)?;
    let missing = config.missing_selections();

    let credits = match &credits_path {
        Some(path) => Some(Shelfmap::new().load_credits(path)?.0),
        None => None,
    };
    let unknown_source = credits
        .as_ref()
        .and_then(|table| unmatched_table_source(&config, table));

    if json_output {
        let mut status = serde_json::json!({
            "config": config_path,
            "complete": missing.is_empty(),
            "missing_selections": missing,
        });
        if let Some(table) = &credits {
            status["credit_sources"] = serde_json::json!(credit_choices(table));
            status["unknown_credit_source"] = serde_json::json!(unknown_source);
        }
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if missing.is_empty() {
        println!(
            "{} {} is complete",
            "✓".green().bold(),
            config_path.display()
        );
    } else {
        println!(
            "{} {} is missing {} selection(s):",
            "✗".red().bold(),
            config_path.display(),
            missing.len()
        );
        for name in &missing {
            println!("  • {}", name.yellow());
        }
    }

    if let Some(table) = &credits {
        println!();
        println!("{}", "Crediting sources:".yellow().bold());
        println!("{}", credit_table(table));
        if let Some(source) = unknown_source {
            println!(
                "  {} configured source '{}' has no corresponding note in the table",
                "⚠".yellow(),
                source
            );
        }
    }

    Ok(())
}

/// Names an operator can pick for the crediting note: every table source, then `OTHER`.
fn credit_choices(table: &TranslationTable) -> Vec<&str> {
    let mut choices = table.sources();
    choices.push(OTHER_SOURCE);
    choices
}

/// The configured table source, when the table has no note for it.
fn unmatched_table_source<'a>(config: &'a Configuration, table: &TranslationTable) -> Option<&'a str> {
    match config.credit_source.get() {
        Some(CreditSource::Table { source }) if table.lookup(source).is_none() => Some(source.as_str()),
        _ => None,
    }
}

fn credit_table(table: &TranslationTable) -> Table {
    let mut out = Table::new();
    out.set_header(vec![header_cell("Source"), header_cell("Crediting note")]);
    out.load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);

    for source in table.sources() {
        let note = match table.lookup(source) {
            Some(note) => Cell::new(note),
            None => Cell::new("(blank)").fg(Color::Yellow),
        };
        out.add_row(vec![Cell::new(source), note]);
    }
    out.add_row(vec![
        Cell::new(OTHER_SOURCE).add_attribute(Attribute::Bold),
        Cell::new("Operator-entered text").add_attribute(Attribute::Dim),
    ]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmap::input::TranslationEntry;

    fn table() -> TranslationTable {
        TranslationTable::new([
            TranslationEntry {
                source: "Purchase".into(),
                notes: "Purchased with the Judaica Fund".into(),
            },
            TranslationEntry {
                source: "Gift".into(),
                notes: "".into(),
            },
        ])
    }

    #[test]
    fn test_choices_end_with_other() {
        assert_eq!(credit_choices(&table()), vec!["Purchase", "Gift", "OTHER"]);
    }

    #[test]
    fn test_unmatched_source_reported() {
        let gift = Configuration::new().with_credit_source(CreditSource::Table {
            source: "Gift".into(),
        });
        assert_eq!(unmatched_table_source(&gift, &table()), Some("Gift"));

        let purchase = Configuration::new().with_credit_source(CreditSource::Table {
            source: "Purchase".into(),
        });
        assert_eq!(unmatched_table_source(&purchase, &table()), None);
    }

    #[test]
    fn test_credit_table_lists_every_source() {
        let rendered = credit_table(&table()).to_string();
        assert!(rendered.contains("Purchased with the Judaica Fund"));
        assert!(rendered.contains("(blank)"));
        assert!(rendered.contains("OTHER"));
    }

    #[test]
    fn test_check_with_credits_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("run.json");
        Configuration::new().save(&config_path).unwrap();
        let credits_path = dir.path().join("credits.csv");
        std::fs::write(&credits_path, "Source,Notes\nPurchase,Purchased\n").unwrap();

        run(config_path, Some(credits_path), true).unwrap();
    }
}
