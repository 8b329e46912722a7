//! Autom - command-executing AI bot
//!
//! CLI entry point: runs prompts through the agent loop, or previews shell
//! quoting.

use std::fs;
use std::io;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Report, Result};
use tracing::{debug, info};

use autom::agent::Agent;
use autom::cli::{Cli, Command, generate_after_help, get_log_path, read_prompts};
use autom::config::Config;
use autom::llm::create_client;
use autom::quote::quote_command;

/// Shown when the model client cannot be set up from config and environment
const SETUP_HINT: &str = "LLM settings are incomplete (see `autom --help` for config file locations)";

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Pure string utility: no config, logging or network
    if let Command::Quote { args } = &cli.command {
        println!("{}", quote_command(args.as_slice()));
        return Ok(());
    }

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("autom loaded config: provider={}, model={}", config.llm.provider, config.llm.model);

    debug!(command = ?cli.command, "main: dispatching command");
    match &cli.command {
        Command::Chat { prompt, file, .. } => {
            debug!("main: matched Chat command");
            let prompts = read_prompts(prompt.as_deref(), file.as_deref())?;
            cmd_chat(&config, &cli.command, prompts).await
        }
        Command::Quote { .. } => Ok(()),
    }
}

/// Run the prompts through the agent, streaming replies to stdout
async fn cmd_chat(config: &Config, command: &Command, prompts: Vec<String>) -> Result<()> {
    debug!(prompt_count = prompts.len(), "cmd_chat: called");
    let agent_config = config.agent_config(&command.agent_overrides())?;
    config.validate().context(SETUP_HINT)?;

    let llm = match create_client(&config.llm) {
        Ok(llm) => llm,
        Err(e) if e.is_config_error() => return Err(Report::new(e).wrap_err(SETUP_HINT)),
        Err(e) => return Err(Report::new(e).wrap_err("Failed to create LLM client")),
    };
    let agent = Agent::new(llm, agent_config);

    let report = agent.run(&prompts, &mut io::stdout()).await?;

    for (idx, outcome) in report.outcomes.iter().enumerate() {
        if outcome.is_turn_limit() {
            let notice = format!(
                "Turn limit ({}) reached for prompt {} before the model replied.",
                outcome.turns(),
                idx + 1
            );
            eprintln!("{}", notice.yellow());
        }
    }

    info!(
        prompts = report.outcomes.len(),
        turn_limited = report.turn_limited(),
        total_tokens = report.usage.total(),
        "cmd_chat: complete"
    );
    Ok(())
}
