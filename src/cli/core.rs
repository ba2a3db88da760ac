use std::{future::Future, io};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    advisor::AdvisoryClient,
    cli::{
        commands,
        io as cli_io,
        output,
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::FinanceTracker,
    errors::LedgerError,
    ledger::Transaction,
    storage::JsonStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Shell session state: the tracker, the advisor and the runtime that
/// drives advisor calls.
pub struct ShellContext {
    mode: CliMode,
    pub(crate) running: bool,
    tracker: FinanceTracker,
    advisor: AdvisoryClient,
    config: Config,
    runtime: tokio::runtime::Runtime,
    registry: CommandRegistry,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = match ConfigManager::new().and_then(|manager| manager.load_or_init()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "configuration unreadable, using defaults");
                Config::default()
            }
        };
        let store = JsonStore::new_default().map_err(|err| CliError::Setup(err.to_string()))?;
        tracing::debug!(path = %store.base_dir().display(), "using data directory");
        let tracker = FinanceTracker::with_system_clock(Box::new(store))
            .with_undo_window(config.undo_window());
        let advisor = AdvisoryClient::from_config(&config.advisor);
        Self::with_parts(mode, tracker, advisor, config)
    }

    pub fn with_parts(
        mode: CliMode,
        tracker: FinanceTracker,
        advisor: AdvisoryClient,
        config: Config,
    ) -> Result<Self, CliError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Ok(Self {
            mode,
            running: true,
            tracker,
            advisor,
            config,
            runtime,
            registry,
        })
    }

    pub fn tracker(&self) -> &FinanceTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut FinanceTracker {
        &mut self.tracker
    }

    pub fn advisor(&self) -> &AdvisoryClient {
        &self.advisor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs an advisor future to completion on the shell's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn prompt(&self) -> String {
        format!("fintrack ({} txns)> ", self.tracker.transactions().len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn commands(&self) -> Vec<&CommandEntry> {
        self.registry.list()
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

        let needle = input.to_lowercase();
        let closest = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = closest {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true).map_err(|err| CliError::Setup(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Validation(message)) => {
                output::error(message);
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub fn format_money(&self, amount: f64) -> String {
        crate::cli::format::money(&self.config.currency_symbol, amount)
    }

    /// Finds a transaction whose id starts with `prefix`.
    pub(crate) fn transaction_by_prefix(&self, prefix: &str) -> Result<Transaction, CommandError> {
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments("transaction id is required".into()));
        }
        let matches: Vec<&Transaction> = self
            .tracker
            .transactions()
            .iter()
            .filter(|txn| txn.id.simple().to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [single] => Ok((*single).clone()),
            [] => Err(CommandError::InvalidArguments(format!(
                "no transaction matches `{}`",
                prefix
            ))),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches {} transactions; use a longer id",
                prefix,
                matches.len()
            ))),
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<DateTime<Utc>, CommandError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })?;
    Ok(Utc.from_utc_datetime(&midnight))
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Setup(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}
