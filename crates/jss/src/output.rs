use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub schema: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemaEntry {
    pub name: String,
    pub builtin: bool,
}

#[derive(Debug, Serialize)]
pub struct SchemaListing {
    pub count: usize,
    pub schemas: Vec<SchemaEntry>,
}

pub fn print_check(report: &CheckReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SCHEMA", "VALID", "ERROR"]);
            if report.errors.is_empty() {
                table.add_row(vec![report.schema.clone(), "yes".to_string(), String::new()]);
            }
            for error in &report.errors {
                table.add_row(vec![report.schema.clone(), "no".to_string(), error.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if report.valid {
                println!("valid: {}", report.schema);
            } else {
                println!("invalid: {}", report.schema);
                for error in &report.errors {
                    println!("  {error}");
                }
            }
        }
    }
}

pub fn print_schemas(listing: &SchemaListing, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(listing),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NAME", "ORIGIN"]);
            for entry in &listing.schemas {
                table.add_row(vec![entry.name.clone(), origin(entry).to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in &listing.schemas {
                println!("{} ({})", entry.name, origin(entry));
            }
        }
    }
}

fn origin(entry: &SchemaEntry) -> &'static str {
    if entry.builtin {
        "builtin"
    } else {
        "registered"
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
