use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use token_scanner::logging::{self, codes};
use token_scanner::pipeline::{self, OutputFormat, PipelineError};

/// Command-line switches layered over the runtime configuration
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    no_bracket: bool,
    no_boundary: bool,
    original: bool,
    summary: bool,
    format: OutputFormat,
    config_path: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return;
    }

    let options = parse_options(&args[2..]);

    if let Err(error) = run(&args[1], &options) {
        eprintln!("FAILED [{}]: {}", error.error_code(), error);
        let action = codes::get_action(error.error_code().as_str());
        eprintln!("  help: {}", action);
        std::process::exit(1);
    }
}

fn run(file_path: &str, options: &CliOptions) -> Result<(), PipelineError> {
    let mut config = pipeline::load_config(options.config_path.as_deref())?;

    if let Err(message) = logging::config::init_runtime_preferences(config.logging.clone()) {
        eprintln!("Warning: {}", message);
    }
    if let Err(message) = logging::init_global_logging() {
        eprintln!("Warning: logging unavailable: {}", message);
    }
    if let Err(message) = pipeline::validate_pipeline() {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &message);
    }

    if options.no_bracket {
        config.display.bracket_tokens = false;
    }
    if options.no_boundary {
        config.display.show_boundary = false;
    }
    if options.original {
        config.display.show_original = true;
    }
    if options.summary {
        config.scanner.collect_metrics = true;
        config.scanner.track_operator_usage = true;
    }

    let result = pipeline::scan_file(file_path, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pipeline::write_result(
        &mut out,
        &result,
        &config.display,
        options.format,
        options.summary,
    )?;
    out.flush()?;

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Token Scanner v{}", env!("CARGO_PKG_VERSION"));
    println!("Splits C-family source text into classified tokens, line by line");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --no-bracket        Print lexemes without [ ] around them");
    println!("    --no-boundary       Omit the banner lines");
    println!("    --original          Print the input before the tokens");
    println!("    --summary           Print category counts and top operators");
    println!("    --json              Print lines, tokens and metrics as JSON");
    println!("    --config <path>     Load runtime preferences from a TOML file");
    println!();
    println!("EXAMPLES:");
    println!("    {} main.c", program_name);
    println!("    {} main.c --no-bracket --summary", program_name);
    println!("    {} main.c --config scanner.toml --json", program_name);
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--no-bracket" => options.no_bracket = true,
            "--no-boundary" => options.no_boundary = true,
            "--original" => options.original = true,
            "--summary" => options.summary = true,
            "--json" => options.format = OutputFormat::Json,
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&strings(&[
            "--no-bracket",
            "--summary",
            "--config",
            "scanner.toml",
            "--json",
        ]));

        assert!(options.no_bracket);
        assert!(options.summary);
        assert!(!options.no_boundary);
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.config_path, Some(PathBuf::from("scanner.toml")));
    }

    #[test]
    fn test_unknown_and_dangling_options_are_ignored() {
        let options = parse_options(&strings(&["--bogus", "--config"]));
        assert_eq!(options, CliOptions::default());
    }
}
