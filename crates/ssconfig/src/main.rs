//! ssconfig: inspect and edit the proxy client settings document.
//!
//! This binary is a thin front end over [`ConfigManager`].  It loads the
//! document exactly the way the client does at start-up, applies one edit,
//! and saves it back, so the repair and clamping rules can be observed without
//! the GUI.
//!
//! # Usage
//!
//! ```text
//! ssconfig [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show              Print the loaded (repaired) document as JSON
//!   list              Print the server list with the active entry marked
//!   current           Print the active server
//!   add-server        Validate a server profile and append it
//!   select            Make the server at INDEX active
//!   set-local-port    Change the local listener port
//!   check-port        Validate a remote port
//!   check-local-port  Validate a local listener port
//!   check-timeout     Validate a timeout against a maximum
//!   key               Print the store key of this installation
//!
//! Options:
//!   --store-dir <DIR>     Directory holding settings files [env: SSCONFIG_STORE_DIR]
//!   --install-dir <DIR>   Installation directory seeding the key [env: SSCONFIG_INSTALL_DIR]
//!   --ephemeral           Use an in-memory store; nothing is written to disk
//! ```
//!
//! Logs go to stderr.  The level comes from `RUST_LOG`; when it is unset the
//! level is `warn`, raised to `debug` if the loaded document has
//! `isVerboseLogging` set.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use ssconfig::infrastructure::installation::current_store_key;
use ssconfig::infrastructure::storage::{FileStore, MemoryStore};
use ssconfig::{
    check_local_port, check_port, check_timeout, ConfigManager, ConfigurationDocument,
    PersistenceStore, ServerProfile, StoreKey,
};
use ssconfig_core::{DEFAULT_SERVER_TIMEOUT_SECS, MAX_SERVER_TIMEOUT_SECS};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit the proxy client settings document.
#[derive(Debug, Parser)]
#[command(name = "ssconfig", version)]
struct Cli {
    /// Directory holding the settings files.
    ///
    /// Defaults to the platform config directory.
    #[arg(long, env = "SSCONFIG_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Installation directory whose path seeds the store key.
    ///
    /// Defaults to the directory of this executable.
    #[arg(long, env = "SSCONFIG_INSTALL_DIR")]
    install_dir: Option<PathBuf>,

    /// Use an in-memory store instead of the settings directory.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the loaded (repaired) document as JSON.
    Show,
    /// Print the server list with the active entry marked.
    List,
    /// Print the active server.
    Current,
    /// Validate a server profile and append it to the list.
    AddServer(AddServerArgs),
    /// Make the server at INDEX active and clear any selection strategy.
    Select {
        #[arg(allow_negative_numbers = true)]
        index: i32,
    },
    /// Change the local listener port.
    SetLocalPort {
        #[arg(allow_negative_numbers = true)]
        port: i32,
    },
    /// Validate a remote port.
    CheckPort {
        #[arg(allow_negative_numbers = true)]
        port: i32,
    },
    /// Validate a local listener port.
    CheckLocalPort {
        #[arg(allow_negative_numbers = true)]
        port: i32,
    },
    /// Validate a timeout (seconds) against a maximum.
    CheckTimeout {
        #[arg(allow_negative_numbers = true)]
        timeout: i32,
        #[arg(long, default_value_t = MAX_SERVER_TIMEOUT_SECS)]
        max: i32,
    },
    /// Print the store key of this installation.
    Key,
}

#[derive(Debug, Args)]
struct AddServerArgs {
    #[arg(long)]
    address: String,
    #[arg(long, default_value_t = 8388, allow_negative_numbers = true)]
    port: i32,
    #[arg(long)]
    password: String,
    #[arg(long, default_value = "aes-256-cfb")]
    method: String,
    #[arg(long, default_value = "")]
    remarks: String,
    #[arg(long, default_value_t = DEFAULT_SERVER_TIMEOUT_SECS, allow_negative_numbers = true)]
    timeout: i32,
    /// Make the new server the active one.
    #[arg(long)]
    select: bool,
}

impl AddServerArgs {
    fn into_profile(self) -> ServerProfile {
        ServerProfile {
            address: self.address,
            port: self.port,
            password: self.password,
            method: self.method,
            remarks: self.remarks,
            timeout: self.timeout,
        }
    }
}

impl Cli {
    /// Builds the manager for the configured store and installation.
    ///
    /// # Errors
    ///
    /// Fails when no installation directory or store directory can be
    /// determined.
    fn build_manager(&self) -> anyhow::Result<ConfigManager> {
        let key = match &self.install_dir {
            Some(dir) => StoreKey::for_installation(dir),
            None => current_store_key().context("resolving the installation directory")?,
        };

        let store: Arc<dyn PersistenceStore> = if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            match &self.store_dir {
                Some(dir) => Arc::new(FileStore::new(dir)),
                None => Arc::new(
                    FileStore::in_platform_dir()
                        .context("locating the platform config directory")?,
                ),
            }
        };

        Ok(ConfigManager::new(store, key))
    }
}

// ── Output DTOs ───────────────────────────────────────────────────────────────

/// One row of `ssconfig list`.
#[derive(Debug, Serialize)]
struct ServerListEntry {
    index: usize,
    name: String,
    active: bool,
}

fn server_list(doc: &ConfigurationDocument) -> Vec<ServerListEntry> {
    doc.servers
        .iter()
        .enumerate()
        .map(|(index, server)| ServerListEntry {
            index,
            name: server.friendly_name(),
            active: !doc.uses_strategy() && usize::try_from(doc.active_index) == Ok(index),
        })
        .collect()
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Lets the loaded document raise the log level when `RUST_LOG` is unset.
struct LogControl {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogControl {
    fn disabled() -> Self {
        Self { handle: None }
    }

    fn apply_document(&self, doc: &ConfigurationDocument) {
        let Some(handle) = &self.handle else {
            return;
        };
        if doc.verbose_logging {
            if let Err(e) = handle.reload(EnvFilter::new("debug")) {
                warn!("could not raise log level: {e}");
            }
        }
    }
}

/// Installs the stderr subscriber.  Level is overridden by `RUST_LOG`.
fn init_logging() -> LogControl {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_is_set = from_env.is_some();
    let (filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    LogControl {
        handle: (!env_is_set).then_some(handle),
    }
}

// ── Command execution ─────────────────────────────────────────────────────────

fn load(manager: &ConfigManager, logging: &LogControl) -> ConfigurationDocument {
    let doc = manager.load();
    logging.apply_document(&doc);
    doc
}

/// Runs one command, writing its result to `out`.
///
/// # Errors
///
/// Validation failures, failed saves, and output errors.
fn run(
    command: Command,
    manager: &ConfigManager,
    logging: &LogControl,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            let doc = load(manager, logging);
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        Command::List => {
            let doc = load(manager, logging);
            writeln!(out, "{}", serde_json::to_string_pretty(&server_list(&doc))?)?;
        }
        Command::Current => {
            let doc = load(manager, logging);
            match &doc.selection_strategy {
                Some(strategy) => writeln!(out, "selected by strategy {strategy}")?,
                None => writeln!(out, "{}", doc.current_server().friendly_name())?,
            }
        }
        Command::AddServer(args) => {
            let select = args.select;
            let profile = args.into_profile();
            ConfigManager::check_server_profile(&profile)?;

            let mut doc = load(manager, logging);
            let name = profile.friendly_name();
            doc.servers.push(profile);
            if select {
                doc.selection_strategy = None;
                doc.active_index = i32::try_from(doc.servers.len() - 1)?;
            }
            manager.try_save(&mut doc).context("saving settings")?;
            writeln!(out, "added {name}")?;
        }
        Command::Select { index } => {
            let mut doc = load(manager, logging);
            doc.selection_strategy = None;
            doc.active_index = index;
            manager.try_save(&mut doc).context("saving settings")?;
            writeln!(
                out,
                "active server {}: {}",
                doc.active_index,
                doc.current_server().friendly_name()
            )?;
        }
        Command::SetLocalPort { port } => {
            check_local_port(port)?;
            let mut doc = load(manager, logging);
            doc.local_port = port;
            manager.try_save(&mut doc).context("saving settings")?;
            writeln!(out, "local port {port}")?;
        }
        Command::CheckPort { port } => {
            check_port(port)?;
            writeln!(out, "ok")?;
        }
        Command::CheckLocalPort { port } => {
            check_local_port(port)?;
            writeln!(out, "ok")?;
        }
        Command::CheckTimeout { timeout, max } => {
            check_timeout(timeout, max)?;
            writeln!(out, "ok")?;
        }
        Command::Key => writeln!(out, "{}", manager.key())?,
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let logging = init_logging();
    let cli = Cli::parse();
    let manager = cli.build_manager()?;

    let mut stdout = std::io::stdout().lock();
    run(cli.command, &manager, &logging, &mut stdout)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
