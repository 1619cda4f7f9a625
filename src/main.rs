//! # chatsheet CLI
//!
//! Command-line interface for the chatsheet library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsheet::ChatsheetError;
use chatsheet::cli::{Args, Mode};
use chatsheet::config::{BasicConfig, PairedConfig, ReadConfig};
use chatsheet::core::{
    DateBounds, DateRange, Extraction, OutputRecord, flatten, pair_exchanges,
};
use chatsheet::format::{OutputFormat, write_to_format};
use chatsheet::input::read_table;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Library diagnostics go to stderr; `RUST_LOG` overrides the level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ChatsheetError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let format = args.output_format()?;
    let output_path = args.output_path()?;

    // Print header
    println!("📦 chatsheet v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🧭 Mode:    {}", args.mode);
    println!("📂 Input:   {}", args.input);
    if !args.bounds_only {
        println!("💾 Output:  {}", output_path.display());
        println!("📄 Format:  {}", format);
    }

    // Build the date range (validated here; the library treats start > end as empty)
    let mut range = DateRange::new();
    if let Some(ref start) = args.start {
        range = range.with_start(start)?;
        println!("📅 Start:   {}", start);
    }
    if let Some(ref end) = args.end {
        range = range.with_end(end)?;
        println!("📅 End:     {}", end);
    }
    let range = range.validated()?;

    if args.mode == Mode::Basic {
        let speakers: Vec<String> = args.speakers().iter().map(|s| s.to_string()).collect();
        println!("👥 Types:   {}", speakers.join(", "));
    }
    if args.strict {
        println!("🔒 Strict:  on");
    }

    println!();

    // Step 1: Read
    println!("⏳ Reading {}...", args.input);
    let read_start = Instant::now();
    let mut read_config = ReadConfig::new().with_delimiter(args.delimiter);
    if let Some(ref sheet) = args.sheet {
        read_config = read_config.with_sheet(sheet.clone());
    }
    let table = read_table(&args.input, &read_config).map_err(|e| e.with_path(&args.input))?;
    println!(
        "   Found {} sessions, {} columns ({:.2}s)",
        table.len(),
        table.columns().len(),
        read_start.elapsed().as_secs_f64()
    );

    // Step 2: Suggested bounds
    match DateBounds::from_table(&table) {
        Some(bounds) => println!("📅 Dates in file: {}", bounds),
        None => println!("📅 Dates in file: none found"),
    }
    if args.bounds_only {
        return Ok(());
    }

    // Step 3: Transform, then write
    let ctx = RunContext {
        args: &args,
        output_path: &output_path,
        format,
        total_start,
    };
    match args.mode {
        Mode::Basic => {
            println!("🔄 Flattening utterances...");
            let transform_start = Instant::now();
            let config = BasicConfig::new()
                .with_speakers(args.speakers())
                .with_range(range)
                .with_strict(args.strict);
            let extraction = flatten(&table, &config).map_err(|e| e.with_path(&args.input))?;
            println!(
                "   {} records ({:.2}s)",
                extraction.len(),
                transform_start.elapsed().as_secs_f64()
            );
            ctx.finish(&extraction)
        }
        Mode::Paired => {
            println!("🔗 Pairing questions with answers...");
            let transform_start = Instant::now();
            let config = PairedConfig::new()
                .with_range(range)
                .with_strict(args.strict);
            let extraction =
                pair_exchanges(&table, &config).map_err(|e| e.with_path(&args.input))?;
            println!(
                "   {} pairs ({:.2}s)",
                extraction.len(),
                transform_start.elapsed().as_secs_f64()
            );
            ctx.finish(&extraction)
        }
    }
}

struct RunContext<'a> {
    args: &'a Args,
    output_path: &'a Path,
    format: OutputFormat,
    total_start: Instant,
}

impl RunContext<'_> {
    /// Previews, writes and summarizes an extraction.
    fn finish<R: OutputRecord>(&self, extraction: &Extraction<R>) -> Result<(), ChatsheetError> {
        print_preview(extraction, self.args.preview);

        println!("💾 Writing {}...", self.format);
        let write_start = Instant::now();
        write_to_format(&extraction.records, self.output_path, self.format)?;
        println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

        println!();
        if extraction.is_empty() {
            println!("⚠️  No records matched; wrote headers only");
        }
        println!("✅ Done! Output saved to {}", self.output_path.display());

        let stats = &extraction.stats;
        println!();
        println!("📊 Summary:");
        println!("   Sessions:      {}", stats.rows);
        println!("   Candidates:    {}", stats.candidates);
        println!("   Written:       {}", stats.emitted);
        println!("   Bad/no time:   {}", stats.invalid_time);
        println!("   Out of range:  {}", stats.out_of_range);
        match self.args.mode {
            Mode::Basic => println!("   Shadowed:      {}", stats.shadowed),
            Mode::Paired => println!("   Unanswered:    {}", stats.unanswered),
        }

        println!();
        println!("⚡ Performance:");
        println!(
            "   Total time:  {:.2}s",
            self.total_start.elapsed().as_secs_f64()
        );

        Ok(())
    }
}

fn print_preview<R: OutputRecord>(extraction: &Extraction<R>, limit: usize) {
    let preview = extraction.preview(limit);
    if preview.is_empty() {
        return;
    }

    println!();
    println!("👀 Preview (first {} of {}):", preview.len(), extraction.len());
    println!("   {}", R::HEADERS.join(" | "));
    for record in preview {
        let line: Vec<String> = record
            .values()
            .into_iter()
            .map(|v| v.replace('\n', " "))
            .collect();
        println!("   {}", line.join(" | "));
    }
    println!();
}
