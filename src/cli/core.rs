use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use spend_config::{paths, Config, ConfigError, ConfigManager};
use spend_core::CoreError;
use thiserror::Error;

use crate::{
    cli::{commands, help, output, registry::CommandRegistry},
    errors::TrackerError,
    session::Session,
};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single command; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Tracker(TrackerError::Core(err))
    }
}

/// Failure that stops the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Runtime state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration from the application directory and opens the session.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = paths::app_data_dir();
        let config_manager = ConfigManager::with_base_dir(&base)?;
        let config = config_manager.load()?;
        if !config_manager.config_path().exists() {
            config_manager.save(&config)?;
        }
        let session = Session::open(&config, &base)?;
        for warning in session.load_warnings() {
            output::warning(warning);
        }
        Ok(Self::with_session(mode, session, config))
    }

    pub fn with_session(mode: CliMode, session: Session, config: Config) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            session,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!(
            "spend [{} {}] > ",
            self.session.granularity().to_string().to_lowercase(),
            self.session.reference()
        )
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input, SUGGESTION_DISTANCE) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Tracker(err) if err.is_validation() => {
                output::error(&err);
                output::hint("Nothing was saved. Correct the listed fields and try again.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn print_help(&self, command: Option<&str>) {
        match command.map(str::to_lowercase) {
            Some(name) => match self.registry.get(&name) {
                Some(entry) => help::print_command(entry),
                None => self.suggest_command(&name),
            },
            None => help::print_overview(&self.registry),
        }
    }
}
