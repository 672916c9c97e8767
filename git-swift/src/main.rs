mod cli;
mod logging;

use clap::Parser;
use cli::{CliError, CliResult};
use git_swift_core::{
    config::{self, Config, LogLevel},
    direct::{DirectSwitch, try_direct_switch},
    git::{CliGitProvider, GitProvider},
    outcome::SessionOutcome,
    session::Session,
};
use git_swift_tui::Theme;
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(version, about = "Fuzzy interactive git branch switcher")]
struct Cli {
    /// Branch name or fuzzy query. Switches directly when it resolves to a single branch
    branch: Option<String>,

    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace); overrides the config file
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(outcome) => crate::cli::report(&outcome),
        Err(error) => {
            crate::cli::print_error(&error);
            ExitCode::from(error.code())
        }
    }
}

fn run(cli: Cli) -> CliResult<SessionOutcome> {
    let config = config::load_config(cli.config.as_deref())?;

    let level = cli.log_level.unwrap_or(config.log.level);
    if let Err(e) = logging::setup_logging(level.to_level_filter()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let git = CliGitProvider::new();
    let listing = git.list_branches()?;

    let (initial_query, error) = match cli.branch.as_deref() {
        Some(arg) => match try_direct_switch(&git, &listing, arg) {
            DirectSwitch::Done(outcome) => return Ok(outcome),
            DirectSwitch::Interactive {
                initial_query,
                error,
            } => (initial_query, error),
        },
        None => (String::new(), None),
    };

    let mut session = Session::new(listing, &initial_query).with_error(error);
    run_tui(&config, &git, &mut session)
}

fn run_tui(
    config: &Config,
    git: &dyn GitProvider,
    session: &mut Session,
) -> CliResult<SessionOutcome> {
    let theme = Theme::from_config(&config.theme);
    let height = git_swift_tui::viewport_height(session, config.ui.max_height);

    let mut terminal = ratatui::try_init_with_options(ratatui::TerminalOptions {
        viewport: ratatui::Viewport::Inline(height),
    })
    .map_err(|e| CliError::new(format!("failed to initialise terminal: {e}")))?;
    let result = git_swift_tui::run(&mut terminal, session, git, &theme, &config.keys);
    ratatui::restore();

    Ok(result?)
}
