//! sourcefetch: terminal host
//!
//! Plays the editor's part: the selection and language come from the command
//! line, inserted text goes to stdout, notifications to stderr.

use anyhow::Result;
use sourcefetch::{config, Extension, Host, Notification, Outcome, Pipeline, Severity, FETCH_COMMAND};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    language: Option<String>,
    query: Vec<String>,
}

enum Parsed {
    Run(Args),
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Parsed> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Parsed::Help),
            "-V" | "--version" => return Ok(Parsed::Version),
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a file argument", arg))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "-l" | "--language" => {
                let language = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a language argument", arg))?;
                parsed.language = Some(language);
            }
            _ => parsed.query.push(arg),
        }
    }

    Ok(Parsed::Run(parsed))
}

/// Editor stand-in backed by the terminal
struct TerminalHost {
    selection: String,
    language: String,
}

impl Host for TerminalHost {
    fn selected_text(&self) -> Option<String> {
        Some(self.selection.clone())
    }

    fn language(&self) -> String {
        self.language.clone()
    }

    fn insert_text(&mut self, text: &str) {
        println!("{}", text);
    }

    fn notify(&mut self, notification: Notification) {
        let tag = match notification.severity {
            Severity::Success => "success",
            Severity::Warning => "warning",
        };
        eprintln!("[{}] {}", tag, notification.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Version => {
            println!("sourcefetch {}", sourcefetch::VERSION);
            return Ok(());
        }
    };

    // Load configuration
    let settings = config::load(args.config.as_deref())?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting sourcefetch v{}", sourcefetch::VERSION);

    let pipeline = Pipeline::from_settings(&settings)?;
    let mut extension = Extension::new(pipeline);
    extension.activate();

    let mut host = TerminalHost {
        selection: args.query.join(" "),
        language: args.language.unwrap_or_else(|| "Rust".to_string()),
    };

    let outcome = extension.dispatch(FETCH_COMMAND, &mut host).await?;
    extension.deactivate();

    match outcome {
        Outcome::Failed(_) => std::process::exit(1),
        Outcome::Skipped => {
            print_usage();
            std::process::exit(2);
        }
        _ => Ok(()),
    }
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
sourcefetch v{}
Fetch the accepted answer for a question from a Q&A site

USAGE:
    sourcefetch [OPTIONS] <QUERY>...

OPTIONS:
    -l, --language <NAME>  Language of the document (default: Rust)
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SOURCEFETCH_SETTINGS_PATH  Path to sourcefetch.yml
    SOURCEFETCH_DEBUG          Enable debug logging (true/false)
    SOURCEFETCH_ENGINE         Search engine (duckduckgo, google)
    SOURCEFETCH_TARGET_DOMAIN  Site to restrict searches to
    SOURCEFETCH_TIMEOUT        Request timeout in seconds
    RUST_LOG                   Log filter, overrides the debug setting
"#,
        sourcefetch::VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Parsed> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_query_and_options() {
        match args(&["-l", "Python", "reverse", "a", "list", "--config", "sf.yml"]).unwrap() {
            Parsed::Run(parsed) => {
                assert_eq!(parsed.language.as_deref(), Some("Python"));
                assert_eq!(parsed.query.join(" "), "reverse a list");
                assert_eq!(parsed.config, Some(PathBuf::from("sf.yml")));
            }
            _ => panic!("expected a run"),
        }
    }

    #[test]
    fn test_missing_option_value() {
        assert!(args(&["query", "--language"]).is_err());
    }

    #[test]
    fn test_help() {
        assert!(matches!(args(&["x", "--help"]).unwrap(), Parsed::Help));
    }
}
