// fungetty: Time-Travel Befunge Interpreter with Grid Visualization

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use fungetty::interpreter::constants::DEFAULT_RECORD_STEPS;
use fungetty::ui::App;
use fungetty::{Interpreter, RuntimeError};

/// Parsed command-line options
struct Options {
    file: String,
    run_only: bool,
    max_steps: Option<usize>,
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--run] [--steps N] <file.bf>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --run        Print the program's output instead of opening the TUI");
    eprintln!(
        "  --steps N    Stop after N steps (TUI default: {})",
        DEFAULT_RECORD_STEPS
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/hello.bf            # Step through in the TUI", program_name);
    eprintln!("  {} --run demos/hello.bf      # Just print the output", program_name);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut file = None;
    let mut run_only = false;
    let mut max_steps = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--run" => run_only = true,
            "--steps" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--steps needs a value".to_string())?;
                let steps = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid step count '{}'", value))?;
                max_steps = Some(steps);
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{}'", other));
            }
            other => {
                if file.replace(other.to_string()).is_some() {
                    return Err("Only one input file may be given".to_string());
                }
            }
        }
    }

    let file = file.ok_or_else(|| "No input file provided".to_string())?;
    Ok(Options {
        file,
        run_only,
        max_steps,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("fungetty");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&options.file).exists() {
        eprintln!("Error: File '{}' not found", options.file);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(&options.file)?;

    let mut interpreter = match Interpreter::new(&source) {
        Ok(interpreter) => interpreter,
        Err(RuntimeError::EmptyProgram) => {
            // Nothing to run, nothing to print
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if options.run_only {
        return run_to_stdout(interpreter, options.max_steps);
    }

    // Run execution to build history
    let max_steps = options.max_steps.unwrap_or(DEFAULT_RECORD_STEPS);
    eprintln!(
        "Executing {} ({}×{} grid)...",
        options.file,
        interpreter.grid().rows(),
        interpreter.grid().cols()
    );
    match interpreter.record(max_steps) {
        Ok(()) => {
            eprintln!("Program halted after {} steps.", interpreter.steps());
            eprintln!("Total snapshots: {}", interpreter.total_snapshots());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Entering TUI with partial execution history...");
        }
    }

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Execute without recording and write the output to stdout
fn run_to_stdout(
    mut interpreter: Interpreter,
    max_steps: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = match max_steps {
        Some(limit) => interpreter.run_with_limit(limit),
        None => {
            interpreter.run();
            Ok(())
        }
    };

    let mut stdout = io::stdout();
    stdout.write_all(interpreter.output().as_bytes())?;
    stdout.flush()?;

    if let Err(e) = result {
        eprintln!();
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("fungetty")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_file_only() {
        let options = parse_args(&args(&["prog.bf"])).unwrap();
        assert_eq!(options.file, "prog.bf");
        assert!(!options.run_only);
        assert_eq!(options.max_steps, None);
    }

    #[test]
    fn test_parse_run_with_steps() {
        let options = parse_args(&args(&["--run", "--steps", "50", "prog.bf"])).unwrap();
        assert!(options.run_only);
        assert_eq!(options.max_steps, Some(50));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--steps"])).is_err());
        assert!(parse_args(&args(&["--steps", "x", "a.bf"])).is_err());
        assert!(parse_args(&args(&["--fast", "a.bf"])).is_err());
        assert!(parse_args(&args(&["a.bf", "b.bf"])).is_err());
    }
}
