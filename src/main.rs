//! labelforge - command-line label sheet generator.
//!
//! Usage:
//!   labelforge [output.pdf] [--count N] [--article N] [--date W/Y] [--lot NAME]
//!
//! Generates a sequence of labels from the stored preferences (overridable
//! per run with the flags below), lays them out on A4 pages, and writes the
//! PDF. Overrides are persisted like an accepted dialog, so the next run
//! starts from the same values.

use std::{env, fs, path::PathBuf, process};

use label_forge::config::AppConfig;
use label_forge::pipeline::Session;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut count: Option<u32> = None;
    let mut article: Option<u32> = None;
    let mut date_code: Option<String> = None;
    let mut lot_code: Option<String> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-n" => count = Some(parse_number(&args[0], iter.next(), "--count")),
            "--article" | "-a" => {
                article = Some(parse_number(&args[0], iter.next(), "--article"))
            }
            "--date" | "-d" => date_code = next_value(&args[0], iter.next(), "--date"),
            "--lot" | "-l" => lot_code = next_value(&args[0], iter.next(), "--lot"),
            "--config" | "-c" => {
                config_path = next_value(&args[0], iter.next(), "--config").map(PathBuf::from)
            }
            "--title" | "-t" => title = next_value(&args[0], iter.next(), "--title"),
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if output_path.is_some() {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                output_path = Some(PathBuf::from(path));
            }
        }
    }

    let output = output_path.unwrap_or_else(|| PathBuf::from("labels.pdf"));
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("labelforge.json"));

    let mut session = match Session::open(&config_path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error loading preferences: {e}");
            process::exit(1);
        }
    };

    // Flag overrides replace the stored generate settings wholesale, like an
    // accepted dialog.
    if count.is_some() || article.is_some() || date_code.is_some() || lot_code.is_some() {
        let mut config: AppConfig = session.config().clone();
        if let Some(n) = count {
            config.generate.count = n;
        }
        if let Some(n) = article {
            config.generate.first_article_number = n;
        }
        if let Some(d) = date_code {
            config.generate.date_code = d;
        }
        if let Some(l) = lot_code {
            config.generate.lot_code = l;
        }
        if let Err(e) = session.update_config(config) {
            eprintln!("Error updating preferences: {e}");
            process::exit(1);
        }
    }

    let labels = match session.generate() {
        Ok(labels) => labels,
        Err(e) => {
            eprintln!("Error generating labels: {e}");
            process::exit(1);
        }
    };

    // Default title: stem of the output filename.
    let title = title.unwrap_or_else(|| {
        output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("labels")
            .to_string()
    });

    match session.print_to_pdf(&labels, &title) {
        Ok(bytes) => {
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            let capacity = session.config().layout.page_capacity();
            let pages = if labels.is_empty() {
                1
            } else {
                (labels.len() + capacity - 1) / capacity
            };
            eprintln!(
                "Wrote '{}' ({} labels, {} bytes, {} page{})",
                output.display(),
                labels.len(),
                bytes.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error rendering sheet: {e}");
            process::exit(1);
        }
    }
}

fn next_value(prog: &str, value: Option<&String>, flag: &str) -> Option<String> {
    match value {
        Some(v) => Some(v.clone()),
        None => {
            eprintln!("Missing value for {flag}");
            print_usage(prog);
            process::exit(1);
        }
    }
}

fn parse_number(prog: &str, value: Option<&String>, flag: &str) -> u32 {
    let raw = match value {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {flag}");
            print_usage(prog);
            process::exit(1);
        }
    };
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid number for {flag}: {raw}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("labelforge - grid label sheet generator (label-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} [output.pdf] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [output.pdf]   Output path (default: labels.pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --count, -n    Number of labels to generate");
    eprintln!("  --article, -a  Serial counter for the first label");
    eprintln!("  --date, -d     Week/year date code (e.g. \"40/20\")");
    eprintln!("  --lot, -l      Lot name");
    eprintln!("  --config, -c   Preference file (default: labelforge.json)");
    eprintln!("  --title, -t    Document title in PDF metadata");
    eprintln!("  --help         Print this message");
}
