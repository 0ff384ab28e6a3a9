//! Command-line interface for gridfmt
//!
//! Usage:
//!   gridfmt format [path] [--write] [--width <n>]   - Format a file (or stdin) and print or rewrite it
//!   gridfmt check <paths>...                        - Verify files are already formatted
//!   gridfmt inspect <path> [--stage <stage>]        - Dump an intermediate pipeline stage as JSON

use clap::{Arg, ArgAction, ArgMatches, Command};
use gridfmt::gridfmt::config;
use gridfmt::gridfmt::inspect::{inspect_source, InspectStage};
use gridfmt::gridfmt::options::FormatOptions;
use gridfmt::gridfmt::pipeline::format_source;
use std::io::Read;
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("gridfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A formatter for array-heavy data scripts with marker-driven table alignment")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("format")
                .about("Format a file, or stdin when the path is '-'")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to format, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                )
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .help("Rewrite the file in place instead of printing to stdout")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("require-pragma")
                        .long("require-pragma")
                        .help("Leave sources without a format pragma untouched")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("insert-pragma")
                        .long("insert-pragma")
                        .help("Insert a format pragma at the top of the output")
                        .action(ArgAction::SetTrue),
                )
                .args(formatting_args()),
        )
        .subcommand(
            Command::new("check")
                .about("Verify files are already formatted; lists unformatted files and exits nonzero")
                .arg(
                    Arg::new("paths")
                        .help("Files to check")
                        .required(true)
                        .num_args(1..),
                )
                .args(formatting_args()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump an intermediate pipeline stage as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to inspect, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .short('s')
                        .help("Stage to dump: 'tokens', 'ast' or 'doc'")
                        .default_value("doc"),
                )
                .args(formatting_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("format", format_matches)) => handle_format_command(format_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches),
        _ => unreachable!(),
    }
}

/// Options shared by every subcommand: config selection and overrides for
/// the values a config file could also set
fn formatting_args() -> Vec<Arg> {
    vec![
        Arg::new("width")
            .long("width")
            .help("Maximum line width")
            .value_name("COLUMNS"),
        Arg::new("trailing-comma")
            .long("trailing-comma")
            .help("Trailing comma policy: 'all', 'es5' or 'none'")
            .value_name("POLICY"),
        Arg::new("config")
            .long("config")
            .help("Config file to use instead of discovery")
            .value_name("PATH"),
    ]
}

/// Handle the format command
fn handle_format_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let write = matches.get_flag("write");
    if write && path == "-" {
        eprintln!("Error: --write requires a file path");
        std::process::exit(1);
    }

    let source = read_source(path);
    let mut options = load_options(matches, path);
    if matches.get_flag("require-pragma") {
        options.require_pragma = true;
    }
    if matches.get_flag("insert-pragma") {
        options.insert_pragma = true;
    }

    let formatted = format_source(&source, &options).unwrap_or_else(|e| {
        eprintln!("Error formatting {}: {}", path, e);
        std::process::exit(1);
    });

    if write {
        std::fs::write(path, &formatted).unwrap_or_else(|e| {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        });
    } else {
        print!("{}", formatted);
    }
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) {
    let paths = matches.get_many::<String>("paths").unwrap();
    let mut clean = true;

    for path in paths {
        let source = read_source(path);
        let options = load_options(matches, path);
        match format_source(&source, &options) {
            Ok(formatted) if formatted == source => {}
            Ok(_) => {
                println!("{}", path);
                clean = false;
            }
            Err(e) => {
                eprintln!("Error formatting {}: {}", path, e);
                clean = false;
            }
        }
    }

    if !clean {
        std::process::exit(1);
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let stage: InspectStage = matches
        .get_one::<String>("stage")
        .unwrap()
        .parse()
        .unwrap_or_else(|e: String| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let source = read_source(path);
    let options = load_options(matches, path);
    let dump = inspect_source(&source, stage, &options).unwrap_or_else(|e| {
        eprintln!("Error inspecting {}: {}", path, e);
        std::process::exit(1);
    });
    println!("{}", dump);
}

/// Read a file, or stdin when the path is "-"
fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            });
        source
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        })
    }
}

/// Resolve options for one input: an explicit --config wins, otherwise
/// discovery walks up from the file's directory (the working directory for
/// stdin). Command-line flags override values from the file.
fn load_options(matches: &ArgMatches, path: &str) -> FormatOptions {
    let mut options = match matches.get_one::<String>("config") {
        Some(config_path) => config::load(Path::new(config_path)),
        None => config::load_for(&discovery_start(path)),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    if let Some(width) = matches.get_one::<String>("width") {
        options.print_width = width.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid width {:?}", width);
            std::process::exit(1);
        });
    }
    if let Some(policy) = matches.get_one::<String>("trailing-comma") {
        options.trailing_comma = policy.parse().unwrap_or_else(|e: String| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }
    options
}

fn discovery_start(path: &str) -> PathBuf {
    if path == "-" {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }
    Path::new(path)
        .canonicalize()
        .ok()
        .and_then(|resolved| resolved.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
