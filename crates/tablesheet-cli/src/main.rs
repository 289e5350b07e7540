//! Tablesheet CLI - table documents to workbook JSON

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tablesheet::prelude::*;

#[derive(Parser)]
#[command(name = "tablesheet")]
#[command(
    author,
    version,
    about = "Turn table documents into spreadsheet workbook JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the tables of a JSON document into a workbook
    Export {
        /// Input document: {"tables": [...]} or a single table
        input: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shift every sheet by ROWS,COLS
        #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
        offset: Option<Offset>,

        /// Outline the occupied cells of every sheet
        #[arg(long)]
        frame: bool,

        /// Sheet name for a single-table document without a name
        #[arg(short, long)]
        sheet_name: Option<String>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Convert between A1 addresses and zero-based ROW,COL pairs
    #[command(alias = "addr")]
    Address {
        /// "B3", "A1:C4" or "2,1"
        value: String,
    },
}

/// A document listing several tables under "tables"
#[derive(Deserialize)]
struct TableList {
    tables: Vec<TableSource>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            offset,
            frame,
            sheet_name,
            pretty,
        } => {
            let options = ExportOptions { offset, frame };
            let json = export(&input, options, sheet_name, pretty)?;
            write_output(output.as_deref(), &json)
        }
        Commands::Address { value } => {
            println!("{}", convert_address(&value)?);
            Ok(())
        }
    }
}

/// Parse "ROWS,COLS" into an offset
fn parse_offset(s: &str) -> std::result::Result<Offset, String> {
    let (rows, cols) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROWS,COLS, got '{}'", s))?;
    let rows = rows
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid row offset '{}': {}", rows, e))?;
    let cols = cols
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid column offset '{}': {}", cols, e))?;
    Ok(Offset::new(rows, cols))
}

fn read_tables(input: &Path, sheet_name: Option<String>) -> Result<Vec<TableSource>> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;

    // A "tables" key always selects the list form
    let is_list = document
        .as_object()
        .is_some_and(|object| object.contains_key("tables"));
    if is_list {
        let list: TableList = serde_json::from_value(document)
            .with_context(|| format!("Failed to parse '{}'", input.display()))?;
        return Ok(list.tables);
    }

    let mut table: TableSource = serde_json::from_value(document)
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;
    if table.name.is_none() {
        table.name = sheet_name;
    }
    Ok(vec![table])
}

fn export(
    input: &Path,
    options: ExportOptions,
    sheet_name: Option<String>,
    pretty: bool,
) -> Result<String> {
    let tables = read_tables(input, sheet_name)?;
    let report = WorkbookExporter::new().with_options(options).export(tables);

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    for failure in &report.failures {
        eprintln!("Skipped {}", failure);
    }
    eprintln!(
        "Exported {} sheet(s), {} skipped",
        report.workbook.sheet_count(),
        report.failures.len()
    );

    let json = if pretty {
        serde_json::to_string_pretty(&report.workbook)
    } else {
        serde_json::to_string(&report.workbook)
    };
    json.context("Failed to serialize workbook")
}

fn write_output(output: Option<&Path>, json: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(json.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("Failed to write to stdout")
        }
    }
}

/// Convert one address, range or ROW,COL pair into the other form
fn convert_address(value: &str) -> Result<String> {
    let value = value.trim();

    if value.contains(':') {
        let range = CellRange::parse(value)?;
        return Ok(format!(
            "{} ({},{} to {},{}; {} rows x {} columns)",
            range, range.start.row, range.start.col, range.end.row, range.end.col,
            range.row_count(),
            range.col_count()
        ));
    }

    if let Some((row, col)) = value.split_once(',') {
        let row: i64 = row
            .trim()
            .parse()
            .with_context(|| format!("Invalid row '{}'", row))?;
        let col: i64 = col
            .trim()
            .parse()
            .with_context(|| format!("Invalid column '{}'", col))?;
        return Ok(CellAddress::try_from((row, col))?.to_string());
    }

    if value.is_empty() {
        bail!("Expected an address such as B3 or a ROW,COL pair");
    }

    let addr = CellAddress::parse(value)?;
    Ok(format!("{},{}", addr.row, addr.col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn write_input(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("tables.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("2,3"), Ok(Offset::new(2, 3)));
        assert_eq!(parse_offset("-1, 0"), Ok(Offset::new(-1, 0)));
        assert!(parse_offset("2").is_err());
        assert!(parse_offset("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_export_flags() {
        let cli = Cli::try_parse_from([
            "tablesheet", "export", "in.json", "--offset", "-1,2", "--frame", "-o", "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                offset,
                frame,
                output,
                ..
            } => {
                assert_eq!(offset, Some(Offset::new(-1, 2)));
                assert!(frame);
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            Commands::Address { .. } => panic!("expected export"),
        }
    }

    #[test]
    fn test_convert_address() {
        assert_eq!(convert_address("AA1").unwrap(), "0,26");
        assert_eq!(convert_address("1,25").unwrap(), "Z2");
        assert_eq!(
            convert_address("C4:A1").unwrap(),
            "A1:C4 (0,0 to 3,2; 4 rows x 3 columns)"
        );
        assert!(convert_address("-1,0").is_err());
        assert!(convert_address("A0").is_err());
        assert!(convert_address("").is_err());
    }

    #[test]
    fn test_export_multiple_tables() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            r#"{"tables": [
                {"name": "First", "rows": [["a", "1"]]},
                {"rows": [["x"], ["y"]], "merges": ["A1:A2"]}
            ]}"#,
        );

        let json = export(&input, ExportOptions::default(), None, false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["SheetNames"], serde_json::json!(["First", "2"]));
        assert_eq!(value["Sheets"]["First"]["B1"]["t"], "n");
        assert_eq!(value["Sheets"]["2"]["!ref"], "A1:A2");
    }

    #[test]
    fn test_export_single_table_with_options() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, r#"{"rows": [["a", "b"]]}"#);

        let options = ExportOptions {
            offset: Some(Offset::new(1, 1)),
            frame: true,
        };
        let json = export(&input, options, Some("Data".to_string()), true).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let sheet = &value["Sheets"]["Data"];
        assert_eq!(sheet["!ref"], "A1:C2");
        assert!(sheet["B2"]["s"]["border"]["left"].is_object());
        assert!(sheet["A1"].is_null());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, r#"{"tables": []}"#);
        let output = dir.path().join("out.json");

        let json = export(&input, ExportOptions::default(), None, false).unwrap();
        write_output(Some(&output), &json).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, r#"{"SheetNames":[],"Sheets":{}}"#);
    }

    #[test]
    fn test_export_reports_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, r#"{"rows": [["a"]], "merges": ["nope"]}"#);
        let err = export(&input, ExportOptions::default(), None, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));

        let missing = dir.path().join("missing.json");
        assert!(export(&missing, ExportOptions::default(), None, false).is_err());
    }

    #[test]
    fn test_export_rejects_bad_table_in_list() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            r#"{"tables": [
                {"name": "Good", "rows": [["a"]]},
                {"rows": [["b"]], "merges": ["nope"]}
            ]}"#,
        );

        let err = export(&input, ExportOptions::default(), None, false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));

        let not_a_list = write_input(&dir, r#"{"tables": {"rows": [["a"]]}}"#);
        assert!(export(&not_a_list, ExportOptions::default(), None, false).is_err());
        let missing = dir.path().join("missing.json");
        assert!(export(&missing, ExportOptions::default(), None, false).is_err());
    }
}
