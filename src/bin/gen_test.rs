//! Toxic test data generator for stress testing chatsheet.
//!
//! Writes a wide transcript export: identity columns followed by
//! `bot.N, agent.N, user.N, created_at.N` for every turn.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [sessions] [turns] [output]
//! Example: cargo run --features gen-test --bin gen_test -- 50000 30 heavy_test.xlsx

use std::env;
use std::path::Path;
use std::process;
use std::time::Instant;

use chrono::DateTime;
use rand::Rng;
use rust_xlsxwriter::{Format, Workbook};

use chatsheet::ChatsheetError;
use chatsheet::schema::Role;

/// 2024-01-01T00:00:00Z
const BASE_UNIX: i64 = 1_704_067_200;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Иван", "Мария", "村上", "محمد", "Jo", "", "   ", "O'Brien", "Anne-Marie",
];

const LAST_NAMES: &[&str] = &["Smith", "Doe", "Петров", "田中", "", "van der Berg", "\"Quoted\""];

const GREETINGS: &[&str] = &[
    "Hi! How can I help you today?",
    "Welcome back 👋",
    "Hello, I'm the virtual assistant.",
];

const EMOJIS: &[&str] = &["😀", "🤔", "🔥", "👍", "❤️", "🤖", "👨‍👩‍👧‍👦", "🏳️‍🌈"];

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatsheetError> {
    let args: Vec<String> = env::args().collect();

    let sessions: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000);
    let turns: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20).max(2);
    let output = args.get(3).map_or("gen_test.xlsx", |s| s.as_str());

    println!("🧪 Toxic Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Sessions: {}", sessions);
    println!("   Turns:    {}", turns);
    println!("   Output:   {}", output);
    println!();

    let start = Instant::now();
    let mut rng = rand::thread_rng();

    let header = build_header(turns);
    let rows: Vec<Vec<String>> = (0..sessions)
        .map(|i| generate_session(&mut rng, i, turns))
        .collect();
    eprintln!(
        "   Generated {} sessions ({:.2}s)",
        rows.len(),
        start.elapsed().as_secs_f64()
    );

    let ext = Path::new(output)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "xlsx" => write_xlsx(output, &header, &rows)?,
        "csv" => write_csv(output, &header, &rows)?,
        _ => {
            return Err(ChatsheetError::invalid_format(
                "output",
                format!("Unknown file extension: '.{}'. Use .xlsx or .csv", ext),
            ));
        }
    }

    let elapsed = start.elapsed();
    let size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);

    println!("\n✅ Done!");
    println!("   Size: {:.2} MB", size as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} sessions/s",
        sessions as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}

fn build_header(turns: usize) -> Vec<String> {
    let mut header = vec![
        "First Name".to_string(),
        "Last Name".to_string(),
        "UserID".to_string(),
    ];
    for i in 0..turns {
        for role in Role::ALL {
            header.push(role.column_name(i));
        }
    }
    header
}

/// One row: bot greeting at turn 0, then user and bot alternating, with
/// occasional agent takeovers, blank cells and broken timestamps.
fn generate_session(rng: &mut impl Rng, index: usize, turns: usize) -> Vec<String> {
    let mut row = vec![
        pick(rng, FIRST_NAMES).to_string(),
        pick(rng, LAST_NAMES).to_string(),
        if rng.gen_bool(0.02) {
            String::new()
        } else {
            (10_000 + index).to_string()
        },
    ];

    let used_turns = rng.gen_range(2..=turns);
    let session_start = BASE_UNIX + rng.gen_range(0..365 * 86_400);
    let mut clock = session_start;

    for turn in 0..turns {
        let mut cells = [String::new(), String::new(), String::new(), String::new()];
        if turn < used_turns {
            let slot = match turn {
                0 => 0,
                t if t % 2 == 1 => 2,
                _ if rng.gen_bool(0.05) => 1,
                _ => 0,
            };
            cells[slot] = if turn == 0 {
                pick(rng, GREETINGS).to_string()
            } else {
                generate_message(rng, index * turns + turn)
            };
            clock += rng.gen_range(1..600);
            cells[3] = generate_timestamp(rng, clock);
        }
        row.extend(cells);
    }
    row
}

fn generate_message(rng: &mut impl Rng, index: usize) -> String {
    match index % 16 {
        0..=6 => format!("Normal message #{} with some text", index),
        7 => format!("Commas, \"quotes\" and 'apostrophes' #{}", index),
        8 => format!("Multi\nline\nmessage #{}", index),
        9 => {
            let emojis: String = (0..10).map(|_| pick(rng, EMOJIS)).collect();
            format!("Emoji spam: {} #{}", emojis, index)
        }
        10 => format!("Кириллица: Привет мир! #{}", index),
        11 => format!("日本語: こんにちは #{}", index),
        12 => format!("{}", index),
        13 => "   ".to_string(),
        14 => format!("=SUM(A1:A{}) looks like a formula", index % 100),
        _ => format!("Fallback message #{}", index),
    }
}

fn generate_timestamp(rng: &mut impl Rng, unix: i64) -> String {
    let Some(ts) = DateTime::from_timestamp(unix, 0) else {
        return String::new();
    };
    match rng.gen_range(0..100) {
        0..=1 => String::new(),
        2 => "not a date".to_string(),
        3 => "2024-13-45 25:61:00".to_string(),
        4..=9 => ts.to_rfc3339(),
        10..=14 => ts.format("%m/%d/%Y %H:%M").to_string(),
        _ => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn write_xlsx(output: &str, header: &[String], rows: &[Vec<String>]) -> Result<(), ChatsheetError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string((i + 1) as u32, col as u16, value)?;
            }
        }
    }

    workbook.save(output)?;
    Ok(())
}

fn write_csv(output: &str, header: &[String], rows: &[Vec<String>]) -> Result<(), ChatsheetError> {
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
