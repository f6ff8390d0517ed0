//! `mobportals check`: compile a catalog and list what each message expects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use portal_message::{format, CompiledTemplate, MessageSet};

use super::load_catalog;

/// Arguments for `mobportals check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Catalog file to check instead of ~/.mobportals/messages.yaml.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let config = load_catalog(self.catalog.as_deref())?;
        let set = MessageSet::from_config(&config);
        let rows = build_rows(&set);

        if self.json {
            print_json(&set, rows)?;
            return Ok(());
        }

        print_table(rows);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct MessageRow {
    key: String,
    tokens: usize,
    directives: Vec<String>,
    /// Directives containing anything besides formatting codes.
    suspicious: Vec<String>,
    template: CompiledTemplate,
}

#[derive(Tabled)]
struct MessageTableRow {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "TOKENS")]
    tokens: usize,
    #[tabled(rename = "DIRECTIVES")]
    directives: String,
}

#[derive(Serialize)]
struct CheckReportJson {
    loaded_at: String,
    messages: Vec<MessageRow>,
}

fn build_rows(set: &MessageSet) -> Vec<MessageRow> {
    set.keys()
        .into_iter()
        .filter_map(|key| set.get(key).map(|template| (key, template)))
        .map(|(key, template)| {
            let directives: Vec<String> = template
                .directives()
                .flatten()
                .map(str::to_string)
                .collect();
            let suspicious = directives
                .iter()
                .filter(|d| !is_code_only(d))
                .cloned()
                .collect();
            MessageRow {
                key: key.to_string(),
                tokens: template.token_count(),
                directives,
                suspicious,
                template: template.clone(),
            }
        })
        .collect()
}

/// True when `directive` consists of formatting codes only.
fn is_code_only(directive: &str) -> bool {
    format::strip(&format::translate(directive)).is_empty()
}

fn print_json(set: &MessageSet, messages: Vec<MessageRow>) -> Result<()> {
    let payload = CheckReportJson {
        loaded_at: set.loaded_at().to_rfc3339(),
        messages,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize check JSON")?
    );
    Ok(())
}

fn print_table(rows: Vec<MessageRow>) {
    let token_total: usize = rows.iter().map(|r| r.tokens).sum();
    println!(
        "mobportals v{} | {} messages | {} tokens",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        token_total,
    );

    if rows.is_empty() {
        println!("No messages in catalog.");
        return;
    }

    let warnings: Vec<(String, String)> = rows
        .iter()
        .flat_map(|r| r.suspicious.iter().map(|d| (r.key.clone(), d.clone())))
        .collect();

    let table_rows: Vec<MessageTableRow> = rows
        .into_iter()
        .map(|row| MessageTableRow {
            key: row.key,
            tokens: row.tokens,
            directives: if row.directives.is_empty() {
                "-".to_string()
            } else {
                row.directives.join(" ")
            },
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    for (key, directive) in &warnings {
        println!(
            "{} {}: directive '{}' is not made of formatting codes",
            "warning:".yellow().bold(),
            key,
            directive
        );
    }
    if warnings.is_empty() {
        println!("{}", "All messages compiled.".green());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
