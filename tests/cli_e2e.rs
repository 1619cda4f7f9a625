//! End-to-end CLI tests for chatsheet.
//!
//! These tests run the actual binary against small transcript exports and
//! check both the console report and the files it writes.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Both modes via CLI, mode aliases
//! - **Output formats**: XLSX, CSV, JSON, JSONL and default naming
//! - **Filters**: Speaker types and date ranges
//! - **Flags**: Preview, bounds-only, strict, delimiter, sheet
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const EXPORT_CSV: &str = "\
First Name,Last Name,UserID,bot.0,agent.0,user.0,created_at.0,bot.1,agent.1,user.1,created_at.1,bot.2,agent.2,user.2,created_at.2
Jo,Doe,17,Welcome!,,,2024-01-05 09:00:00,,,hi,2024-01-05 09:01:00,hello,,,2024-01-05 09:01:30
Ana,Lee,18,Hey,,,2024-02-10 14:00:00,,,need a human,2024-02-10 14:01:00,,Agent Sam here,,2024-02-10 14:05:00
";

/// Creates a temporary directory with test exports.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("export.csv"), EXPORT_CSV).unwrap();
    fs::write(
        dir.path().join("export_semicolon.csv"),
        EXPORT_CSV.replace(',', ";"),
    )
    .unwrap();

    // Five turn columns: irregular layout
    fs::write(
        dir.path().join("irregular.csv"),
        "bot.0,agent.0,user.0,created_at.0,bot.1\nHi,,,2024-01-05,\n",
    )
    .unwrap();

    // Same sessions as a workbook, with a second sheet
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for sheet_name in ["Other", "Transcripts"] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        if sheet_name == "Other" {
            sheet.write_string(0, 0, "nothing here").unwrap();
            continue;
        }
        for (r, line) in EXPORT_CSV.lines().enumerate() {
            for (c, value) in line.split(',').enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, value).unwrap();
                }
            }
        }
    }
    workbook.save(dir.path().join("export.xlsx")).unwrap();

    dir
}

fn chatsheet_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatsheet"));
    Command::from_std(cmd)
}

fn input_path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn csv_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_basic_mode_csv() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Found 2 sessions"))
            .stdout(predicate::str::contains("Written:       6"));

        let rows = csv_rows(&output);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], ["bot", "Welcome!", "2024-01-05"]);
        assert_eq!(rows[5], ["agent", "Agent Sam here", "2024-02-10"]);
    }

    #[test]
    fn test_paired_mode_csv() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "pairs.csv");

        chatsheet_cmd()
            .args([
                "paired",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Pairing"))
            .stdout(predicate::str::contains("Unanswered:    1"));

        let rows = csv_rows(&output);
        assert_eq!(
            rows,
            vec![vec!["Jo", "Doe", "17", "hi", "hello", "2024-01-05", "09:01:30"]]
        );
    }

    #[test]
    fn test_mode_aliases() {
        let fixtures = setup_fixtures();
        for (alias, expected) in [("flat", "Basic"), ("advanced", "Paired"), ("pairs", "Paired")] {
            let output = output_path(&fixtures, &format!("{alias}.csv"));
            chatsheet_cmd()
                .args([
                    alias,
                    &input_path(&fixtures, "export.csv"),
                    "-o",
                    output.to_str().unwrap(),
                ])
                .assert()
                .success()
                .stdout(predicate::str::contains(format!("Mode:    {expected}")));
        }
    }

    #[test]
    fn test_xlsx_input_with_sheet() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "paired",
                &input_path(&fixtures, "export.xlsx"),
                "--sheet",
                "Transcripts",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert_eq!(csv_rows(&output).len(), 1);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export_semicolon.csv"),
                "--delimiter",
                ";",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert_eq!(csv_rows(&output).len(), 6);
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_default_output_names() {
        let fixtures = setup_fixtures();
        let input = input_path(&fixtures, "export.csv");

        chatsheet_cmd()
            .current_dir(fixtures.path())
            .args(["basic", &input])
            .assert()
            .success()
            .stdout(predicate::str::contains("processed_conversation_data.xlsx"));
        assert!(output_path(&fixtures, "processed_conversation_data.xlsx").exists());

        chatsheet_cmd()
            .current_dir(fixtures.path())
            .args(["paired", &input, "--format", "jsonl"])
            .assert()
            .success();
        assert!(output_path(&fixtures, "processed_conversation_data_advanced.jsonl").exists());
    }

    #[test]
    fn test_xlsx_output() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.xlsx");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("XLSX"));

        let bytes = fs::read(&output).unwrap();
        // XLSX is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_json_output() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.json");

        chatsheet_cmd()
            .args([
                "paired",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed[0]["UserID"], "17");
        assert_eq!(parsed[0]["time"], "09:01:30");
    }

    #[test]
    fn test_format_flag_overrides_extension() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.data");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
                "-f",
                "jsonl",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 6);
    }

    #[test]
    fn test_no_matches_writes_headers() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--start",
                "2030-01-01",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("No records matched"));

        assert_eq!(fs::read_to_string(&output).unwrap(), "type,text,time\n");
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_types_filter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--types",
                "bot",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Types:   bot"));

        let rows = csv_rows(&output);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r[0] == "bot"));
    }

    #[test]
    fn test_types_comma_separated() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--types",
                "user,agent",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let kinds: Vec<String> = csv_rows(&output).into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(kinds, ["user", "user", "agent"]);
    }

    #[test]
    fn test_start_filter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--start",
                "2024-02-01",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Out of range:  3"));

        assert_eq!(csv_rows(&output).len(), 3);
    }

    #[test]
    fn test_start_and_end_inclusive() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "paired",
                &input_path(&fixtures, "export.csv"),
                "--start",
                "2024-01-05",
                "--end",
                "2024-01-05",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        assert_eq!(csv_rows(&output).len(), 1);
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_bounds_only() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .current_dir(fixtures.path())
            .args(["basic", &input_path(&fixtures, "export.csv"), "--bounds-only"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2024-01-05 → 2024-02-10"))
            .stdout(predicate::str::contains("Done").not());

        assert!(!output_path(&fixtures, "processed_conversation_data.xlsx").exists());
    }

    #[test]
    fn test_preview_shown_by_default() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "paired",
                &input_path(&fixtures, "export.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Preview (first 1 of 1)"))
            .stdout(predicate::str::contains("Jo | Doe | 17 | hi | hello"));
    }

    #[test]
    fn test_preview_disabled() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--preview",
                "0",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Preview").not());
    }

    #[test]
    fn test_irregular_layout_lenient_by_default() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "irregular.csv"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("irregular turn layout"));

        assert_eq!(csv_rows(&output).len(), 1);
    }

    #[test]
    fn test_strict_rejects_irregular_layout() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "irregular.csv"),
                "--strict",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"))
            .stderr(predicate::str::contains("not a multiple of 4"));

        assert!(!output.exists());
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_nonexistent_file() {
        chatsheet_cmd()
            .args(["basic", "nonexistent_file.csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_invalid_date_format() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--start",
                "05/01/2024",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("❌ Error"));
    }

    #[test]
    fn test_reversed_range() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "--start",
                "2024-03-01",
                "--end",
                "2024-01-01",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_unknown_output_extension() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.csv"),
                "-o",
                "out.txt",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown file extension"));
    }

    #[test]
    fn test_unknown_input_extension() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("export.pdf");
        fs::write(&input, "%PDF").unwrap();

        chatsheet_cmd()
            .args(["basic", input.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown file extension"));
    }

    #[test]
    fn test_missing_sheet() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .args([
                "basic",
                &input_path(&fixtures, "export.xlsx"),
                "--sheet",
                "Nope",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Transcripts"));
    }

    #[test]
    fn test_invalid_mode() {
        chatsheet_cmd()
            .args(["sideways", "export.csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_missing_identity_columns() {
        let fixtures = setup_fixtures();

        chatsheet_cmd()
            .args(["paired", &input_path(&fixtures, "irregular.csv")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing column 'First Name'"))
            .stderr(predicate::str::contains("(file: "))
            .stderr(predicate::str::contains("irregular.csv"));
    }
}

// ============================================================================
// Help and Version Tests
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        chatsheet_cmd()
            .args(["--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("chatsheet"))
            .stdout(predicate::str::contains("basic"))
            .stdout(predicate::str::contains("paired"))
            .stdout(predicate::str::contains("--start"));
    }

    #[test]
    fn test_version_flag() {
        chatsheet_cmd()
            .args(["--version"])
            .assert()
            .success()
            .stdout(predicate::str::contains("chatsheet"));
    }
}
