use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use prepcoach_core::load_config;
use prepcoach_schema::Category;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod repl;
mod ui;

#[derive(Parser)]
#[command(name = "prepcoach", version, about = "Mock interview practice with AI feedback")]
struct Cli {
    #[arg(
        long,
        default_value = "~/.prepcoach",
        help = "Config root directory (contains config/ and logs/)"
    )]
    config_root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start an interactive practice session")]
    Start {
        #[arg(long, help = "Days until the interview (overrides config)")]
        days: Option<u32>,
    },
    #[command(about = "List the question bank")]
    Questions {
        #[arg(long, short = 'c', help = "Only show one category")]
        category: Option<Category>,
    },
    #[command(about = "List the leadership principles")]
    Principles,
    #[command(about = "Show preparation resources")]
    Resources,
    #[command(about = "Validate config files")]
    Validate,
}

fn expand_home(path: PathBuf) -> PathBuf {
    if !path.starts_with("~") {
        return path;
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(path.strip_prefix("~").unwrap_or(&path)),
        None => path,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    cli.config_root = expand_home(cli.config_root);

    let log_dir = cli.config_root.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "prepcoach.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config_dir = cli.config_root.join("config");
    let term = console::Term::stdout();
    match command {
        Commands::Start { days } => {
            repl::run_practice(&config_dir, days).await?;
        }
        Commands::Questions { category } => {
            let categories = match category {
                Some(c) => vec![c],
                None => Category::ALL.to_vec(),
            };
            ui::render_catalog(&term, &categories);
        }
        Commands::Principles => ui::render_principles(&term),
        Commands::Resources => ui::render_resources(&term),
        Commands::Validate => {
            let config = load_config(&config_dir)?;
            println!(
                "Config valid. provider: {:?}, model: {}, api key: {}, rotation: {:?}.",
                config.provider.provider_type,
                config.provider.model,
                if config.api_key().is_some() { "set" } else { "missing" },
                config.practice.rotation
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_start_with_days() {
        let cli = Cli::try_parse_from(["prepcoach", "start", "--days", "7"]).unwrap();
        assert!(matches!(
            cli.command.unwrap(),
            Commands::Start { days: Some(7) }
        ));
    }

    #[test]
    fn parses_questions_category_alias() {
        let cli = Cli::try_parse_from(["prepcoach", "questions", "--category", "sd"]).unwrap();
        assert!(matches!(
            cli.command.unwrap(),
            Commands::Questions {
                category: Some(Category::SystemDesign)
            }
        ));
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["prepcoach", "questions", "-c", "frontend"]).is_err());
    }

    #[test]
    fn config_root_defaults_to_home_dir() {
        let cli = Cli::try_parse_from(["prepcoach", "validate"]).unwrap();
        assert_eq!(cli.config_root, PathBuf::from("~/.prepcoach"));
        assert!(matches!(cli.command.unwrap(), Commands::Validate));
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(expand_home(dir.path().to_path_buf()), dir.path());
    }
}
