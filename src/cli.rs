use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calcmenu::{Session, SettingsStore, evaluate};
use clap::{Parser, ValueEnum};
use log::{debug, info};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Calcmenu - An interactive menu calculator with a safe expression evaluator
#[derive(Parser, Debug)]
#[command(name = "calcmenu")]
#[command(about = "Menu calculator: expressions, powers, rounding, percentages, roots and divisors")]
#[command(version)]
pub struct CliArgs {
    /// Evaluate this expression once and exit instead of opening the menu
    #[arg(allow_hyphen_values = true)]
    pub expression: Option<String>,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Directory holding settings.json (default: the user config directory)
    #[arg(short, long)]
    pub config_dir: Option<PathBuf>,
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

fn settings_store(config_dir: Option<PathBuf>) -> Result<SettingsStore> {
    match config_dir {
        Some(dir) => Ok(SettingsStore::new(dir)),
        None => SettingsStore::default_location().context("Cannot locate settings directory"),
    }
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level)?;

    if let Some(expression) = args.expression {
        debug!("Evaluating '{}' from the command line", expression);
        let result = evaluate(&expression)?;
        println!("{}", result);
        return Ok(());
    }

    let store = settings_store(args.config_dir)?;
    info!("Using settings at {}", store.path().display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), store)
        .context("Failed to start session")?;
    session.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["calcmenu", "2+2", "--log-level", "debug"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression.as_deref(), Some("2+2"));
            assert!(matches!(args.log_level, LogLevel::Debug));
            assert!(args.config_dir.is_none());
        }
    }

    #[test]
    fn test_cli_args_expression_with_leading_minus() {
        let args = CliArgs::try_parse_from(["calcmenu", "-3+5"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression.as_deref(), Some("-3+5"));
            assert!(matches!(args.log_level, LogLevel::Warn));
        }

        let args = CliArgs::try_parse_from(["calcmenu", "--log-level", "debug", "-2**2"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression.as_deref(), Some("-2**2"));
            assert!(matches!(args.log_level, LogLevel::Debug));
        }

        let args = CliArgs::try_parse_from(["calcmenu", "-3+5", "--log-level", "debug"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression.as_deref(), Some("-3+5"));
            assert!(matches!(args.log_level, LogLevel::Debug));
        }
    }

    #[test]
    fn test_cli_args_defaults_to_menu() {
        let args = CliArgs::try_parse_from(["calcmenu", "--config-dir", "/tmp/calcmenu"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(args.expression.is_none());
            assert!(matches!(args.log_level, LogLevel::Warn));
            assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/calcmenu")));
        }
    }

    #[test]
    fn test_settings_store_override() {
        let store = settings_store(Some(PathBuf::from("/tmp/calcmenu")));
        assert!(store.is_ok());
        if let Ok(store) = store {
            assert_eq!(store.path(), PathBuf::from("/tmp/calcmenu/settings.json").as_path());
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}
