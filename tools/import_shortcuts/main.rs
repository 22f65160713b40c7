//! Import text replacement shortcuts into a replacement table file
//!
//! Supports multiple input formats:
//! - JSON: [["shortcut", "replacement"], ...] or the table's own object form
//! - CSV: shortcut,replacement with an optional header row
//! - TXT: one `shortcut<TAB>replacement` pair per line
//!
//! Usage:
//!   cargo run -p import_shortcuts -- --table shortcuts.json --input pairs.csv --format csv
//!   cargo run -p import_shortcuts -- --table shortcuts.json --input pairs.txt --format txt --mode replace

use clap::Parser;
use softkey_core::ReplacementTable;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "import_shortcuts")]
#[command(about = "Import text replacement shortcuts into a table file")]
struct Args {
    /// Replacement table JSON file (created if missing)
    #[arg(short, long)]
    table: PathBuf,

    /// Input file containing shortcut pairs
    #[arg(short, long)]
    input: PathBuf,

    /// Input format: json, csv, or txt
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Merge mode: add (default) keeps existing entries, replace discards them
    #[arg(short, long, default_value = "add")]
    mode: String,

    /// Dry run (show what would be imported without writing the table)
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let content = std::fs::read_to_string(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read input file: {}", e))?;

    let pairs = match args.format.as_str() {
        "json" => parse_json(&content)?,
        "csv" => parse_csv(&content),
        "txt" => parse_txt(&content),
        _ => anyhow::bail!("Unsupported format: {}. Use 'json', 'csv', or 'txt'", args.format),
    };

    println!("Parsed {} shortcuts from {}", pairs.len(), args.input.display());

    if args.dry_run {
        println!("\n[DRY RUN] Would import:");
        for (shortcut, replacement) in pairs.iter().take(10) {
            println!("  {} -> {}", shortcut, replacement);
        }
        if pairs.len() > 10 {
            println!("  ... and {} more", pairs.len() - 10);
        }
        return Ok(());
    }

    let mut table = match args.mode.as_str() {
        "add" if args.table.exists() => ReplacementTable::load_json(&args.table)?,
        "add" | "replace" => ReplacementTable::new(),
        _ => anyhow::bail!("Unsupported mode: {}. Use 'add' or 'replace'", args.mode),
    };

    let before = table.len();
    for (shortcut, replacement) in pairs {
        table.insert(shortcut, replacement);
    }
    table.save_json(&args.table)?;

    println!(
        "✓ Wrote {} entries ({} new) to {}",
        table.len(),
        table.len() - before,
        args.table.display()
    );
    Ok(())
}

fn parse_json(content: &str) -> anyhow::Result<Vec<(String, String)>> {
    if let Ok(pairs) = serde_json::from_str::<Vec<(String, String)>>(content) {
        return Ok(pairs);
    }
    let table = ReplacementTable::from_json_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse JSON: {}", e))?;
    Ok(table
        .iter()
        .map(|e| (e.shortcut.clone(), e.replacement.clone()))
        .collect())
}

fn parse_csv(content: &str) -> Vec<(String, String)> {
    let mut lines = content.lines();
    let mut pairs = Vec::new();

    // Skip header if it looks like a header
    if let Some(first_line) = lines.next() {
        if !first_line.to_lowercase().contains("shortcut") {
            pairs.extend(parse_csv_line(first_line));
        }
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        pairs.extend(parse_csv_line(line));
    }
    pairs
}

fn parse_csv_line(line: &str) -> Option<(String, String)> {
    // Quoted fields may contain commas; "" inside quotes is a literal quote
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    match fields.as_slice() {
        [shortcut, replacement, ..] if !shortcut.is_empty() && !replacement.is_empty() => {
            Some((shortcut.clone(), replacement.clone()))
        }
        _ => None,
    }
}

fn parse_txt(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .filter_map(|line| {
            let (shortcut, replacement) = line.split_once('\t')?;
            let (shortcut, replacement) = (shortcut.trim(), replacement.trim());
            if shortcut.is_empty() || replacement.is_empty() {
                return None;
            }
            Some((shortcut.to_string(), replacement.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_skips_header_and_keeps_quoted_commas() {
        let csv = "shortcut,replacement\nomw,On my way!\nty,\"Thanks, you rock\"\n\n# note\n";
        let pairs = parse_csv(csv);
        assert_eq!(
            pairs,
            vec![
                ("omw".to_string(), "On my way!".to_string()),
                ("ty".to_string(), "Thanks, you rock".to_string()),
            ]
        );
    }

    #[test]
    fn test_csv_doubled_quote_is_literal() {
        let pairs = parse_csv("hq,\"She said \"\"hi\"\", then left\"\n");
        assert_eq!(
            pairs,
            vec![("hq".to_string(), "She said \"hi\", then left".to_string())]
        );
    }

    #[test]
    fn test_txt_needs_a_tab() {
        let pairs = parse_txt("brb\tbe right back\nbroken line\n");
        assert_eq!(pairs, vec![("brb".to_string(), "be right back".to_string())]);
    }

    #[test]
    fn test_json_accepts_both_shapes() {
        let tuples = parse_json(r#"[["omw", "On my way!"]]"#).expect("tuple form");
        let objects =
            parse_json(r#"[{"shortcut": "omw", "replacement": "On my way!"}]"#).expect("object form");
        assert_eq!(tuples, objects);
        assert!(parse_json("{").is_err());
    }
}
