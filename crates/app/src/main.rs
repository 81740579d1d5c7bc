use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::trivia_core::model::Difficulty;
use services::{ConfigError, QuizConfig, QuizLoopService};
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "services=info,ui=info,app=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAmount { raw: String },
    InvalidDifficulty { raw: String },
    InvalidRestartMs { raw: String },
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAmount { raw } => write!(f, "invalid --amount value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (expected easy, medium or hard)")
            }
            ArgsError::InvalidRestartMs { raw } => write!(f, "invalid --restart-ms value: {raw}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--api-url <url>] [--amount <n>] [--difficulty <level>] [--restart-ms <ms>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url https://opentdb.com/api.php");
    eprintln!("  --amount 5");
    eprintln!("  --difficulty easy");
    eprintln!("  --restart-ms 1000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_API_URL, TRIVIA_AMOUNT, TRIVIA_DIFFICULTY, TRIVIA_RESTART_MS, RUST_LOG");
}

#[derive(Debug)]
enum Invocation {
    Run(QuizConfig),
    Help,
}

/// Apply command-line flags on top of `config` (already seeded from the environment).
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    mut config: QuizConfig,
) -> Result<Invocation, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                config = config.with_api_url(&value)?;
            }
            "--amount" => {
                let value = require_value(args, "--amount")?;
                let amount: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| ArgsError::InvalidAmount { raw: value.clone() })?;
                config = config.with_amount(amount)?;
            }
            "--difficulty" => {
                let value = require_value(args, "--difficulty")?;
                let difficulty: Difficulty = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                config = config.with_difficulty(difficulty);
            }
            "--restart-ms" => {
                let value = require_value(args, "--restart-ms")?;
                let millis: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ArgsError::InvalidRestartMs { raw: value.clone() })?;
                config = config.with_restart_delay(Duration::from_millis(millis));
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Invocation::Run(config))
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = QuizConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let config = match parse_args(&mut argv, config).inspect_err(|_| print_usage())? {
        Invocation::Run(config) => config,
        Invocation::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();
    tracing::info!(
        api_url = %config.api_url,
        amount = config.options.amount(),
        difficulty = %config.options.difficulty(),
        restart_ms = config.restart_delay.as_millis(),
        "starting trivia"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(QuizLoopService::from_config(&config)),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        parse_args(&mut iter, QuizConfig::default())
    }

    fn config(args: &[&str]) -> QuizConfig {
        match parse(args).unwrap() {
            Invocation::Run(config) => config,
            Invocation::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn no_flags_keep_the_base_config() {
        assert_eq!(config(&[]), QuizConfig::default());
    }

    #[test]
    fn flags_override_each_setting() {
        let config = config(&[
            "--api-url",
            "http://localhost:9000/api.php",
            "--amount",
            "10",
            "--difficulty",
            "Hard",
            "--restart-ms",
            "0",
        ]);

        assert_eq!(config.api_url.as_str(), "http://localhost:9000/api.php");
        assert_eq!(config.options.amount(), 10);
        assert_eq!(config.options.difficulty(), Difficulty::Hard);
        assert_eq!(config.restart_delay, Duration::ZERO);
    }

    #[test]
    fn help_short_circuits() {
        assert!(matches!(parse(&["--amount", "3", "--help"]), Ok(Invocation::Help)));
    }

    #[test]
    fn reports_bad_input() {
        assert!(matches!(
            parse(&["--amount"]),
            Err(ArgsError::MissingValue { flag: "--amount" })
        ));
        assert!(matches!(
            parse(&["--amount", "lots"]),
            Err(ArgsError::InvalidAmount { .. })
        ));
        assert!(matches!(parse(&["--amount", "99"]), Err(ArgsError::Config(_))));
        assert!(matches!(
            parse(&["--difficulty", "brutal"]),
            Err(ArgsError::InvalidDifficulty { .. })
        ));
        assert!(matches!(
            parse(&["--restart-ms", "-1"]),
            Err(ArgsError::InvalidRestartMs { .. })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }
}
