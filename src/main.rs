//! Dev Envelope CLI
//!
//! Usage:
//!   dev-envelope [OPTIONS] [FILE]
//!
//! Options:
//!   -r, --rules <FILE>      Rule book file (TOML format)
//!   -c, --citations <FILE>  Regulation reference file (TOML format)
//!   -f, --format <FORMAT>   Output format: text or json
//!   --print-rules           Print the effective rule book and exit
//!   -v, --verbose           Debug logging on stderr
//!   -h, --help              Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dev_envelope::{
    calculate_with_repository, render_text, sanitize, EmptyRepository, InputError,
    RawProjectInput, ReferenceRegistry, RuleBook, RuleRepository,
};

#[derive(Parser)]
#[command(name = "dev-envelope")]
#[command(about = "Permissible development envelope for an urban plot")]
struct Cli {
    /// Project input, TOML or JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Rule book file (TOML format)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Regulation reference file (TOML format)
    #[arg(short, long)]
    citations: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the effective rule book as TOML and exit
    #[arg(long)]
    print_rules: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load rule book
    let rules = match &cli.rules {
        Some(path) => match RuleBook::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading rule book '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RuleBook::default(),
    };

    if cli.print_rules {
        match rules.to_toml_string() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error serializing rule book: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load references
    let registry = match &cli.citations {
        Some(path) => match ReferenceRegistry::from_file(path) {
            Ok(r) => Some(r),
            Err(e) => {
                eprintln!("Error loading references '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };
    let repository: &dyn RuleRepository = match &registry {
        Some(r) => r,
        None => &EmptyRepository,
    };

    // Read and normalize input
    let input = match read_input(cli.input.as_deref()).and_then(|raw| sanitize(&raw)) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = calculate_with_repository(&input, &rules, repository);
    match cli.format {
        Format::Text => print!("{}", render_text(&result)),
        Format::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "dev_envelope=debug"
    } else {
        "dev_envelope=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read a raw project record from a file, or from stdin when no path is given
///
/// Files ending in `.json` are JSON; other files are TOML. Stdin is JSON
/// when it starts with `{`.
fn read_input(path: Option<&Path>) -> Result<RawProjectInput, InputError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                RawProjectInput::from_json_str(&content)
            } else {
                RawProjectInput::from_toml_str(&content)
            }
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            if buffer.trim_start().starts_with('{') {
                RawProjectInput::from_json_str(&buffer)
            } else {
                RawProjectInput::from_toml_str(&buffer)
            }
        }
    }
}

fn print_intro() {
    println!(
        r#"Dev Envelope - permissible development envelope for an urban plot

USAGE:
    dev-envelope [OPTIONS] [FILE]
    echo '<json>' | dev-envelope

OPTIONS:
    -r, --rules        Alternative rule book (TOML file)
    -c, --citations    Regulation references (TOML file)
    -f, --format       Output format: text (default) or json
    --print-rules      Print the effective rule book
    -v, --verbose      Debug logging on stderr
    -h, --help         Print help

INPUT FIELDS:
    jurisdiction            mumbai, mumbai-suburban, thane, pune, nagpur, nashik,
                            aurangabad, kolhapur, solapur, amravati
    zoneType                residential, commercial, industrial, mixed
    landUse                 residential, commercial, retail-mall, restaurant,
                            industrial, mixed (defaults from zoneType)
    plotArea, roadWidth     square meters, meters
    proposedFloors          optional
    proposedHeight          optional, meters
    isTransitOrientedZone   true/false
    isHeritageBuilding      true/false
    dwellingUnitCount       optional, residential parking
    carpetAreaPerUnit       optional, square meters

QUICK START:
    echo '{{"jurisdiction":"pune","zoneType":"residential","plotArea":500,"roadWidth":12}}' | dev-envelope"#
    );
}
