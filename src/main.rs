use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;
mod commands;

use cli_style::{get_prompt, get_styles, print_command_echo, print_error, print_goodbye, print_welcome};
use commands::{execute_command, CommandExecutionResult, InnerCli};

use minitube::config::{CliConfig, EngineSettings, FileConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_OWNER};
use minitube::engine::{Engine, SharedEngine};
use minitube::suggestion::SuggestionEndPolicy;

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Editor, Helper};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), version, about = "Interactive shell for the MiniTube media engine")]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Number of playback events kept in the history.
    #[clap(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_capacity: usize,

    /// What happens when advancing past the last suggestion.
    #[clap(long, value_enum, default_value_t = SuggestionEndPolicy::Hold)]
    pub suggestion_end: SuggestionEndPolicy,

    /// Viewer acting in the shell and owning the playlists.
    #[clap(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Start with an empty catalog instead of the sample data.
    #[clap(long)]
    pub no_seed: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            history_capacity: self.history_capacity,
            suggestion_end: self.suggestion_end,
            owner: self.owner.clone(),
            seed_sample_data: !self.no_seed,
        }
    }
}

/// Completes the first word of a line with a shell command name.
#[derive(rustyline_derive::Hinter)]
struct ShellHelper {
    command_names: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        let mut command_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        command_names.sort();
        Self { command_names }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let typed = &line[..pos];
        let start = typed.len() - typed.trim_start().len();
        let word = &typed[start..];
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let candidates = self
            .command_names
            .iter()
            .filter(|name| name.starts_with(word))
            .cloned()
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install the tracing subscriber")
}

fn build_engine(cli_args: &CliArgs) -> Result<Engine> {
    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let settings = EngineSettings::resolve(&cli_args.to_cli_config(), file_config)?;
    info!(
        "Starting engine for {} (history {}, suggestions {:?})",
        settings.owner, settings.history_capacity, settings.suggestion_end
    );

    let seed = settings.seed_sample_data;
    let mut engine = Engine::new(settings).context("Failed to create the engine")?;
    if seed {
        engine
            .seed_sample_data()
            .context("Failed to load the sample catalog")?;
    }
    Ok(engine)
}

fn run_shell(engine: SharedEngine) -> Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(true)
        .build();
    let mut editor = Editor::<ShellHelper, DefaultHistory>::with_config(config)?;
    editor.set_helper(Some(ShellHelper::new()));

    let prompt = get_prompt();
    loop {
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                print_error(&format!("Failed to read input: {}", err));
                break;
            }
        };

        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        print_command_echo(command);

        match engine.with(|engine| execute_command(command, engine)) {
            CommandExecutionResult::Ok => {}
            CommandExecutionResult::Exit => break,
            CommandExecutionResult::Error(err) => {
                warn!("Command '{}' failed: {}", command, err);
                print_error(&err);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_tracing()?;

    let engine = build_engine(&cli_args)?;
    let seeded = engine.settings().seed_sample_data;
    print_welcome(engine.owner().as_str(), seeded);

    run_shell(SharedEngine::new(engine))?;
    print_goodbye();
    Ok(())
}
