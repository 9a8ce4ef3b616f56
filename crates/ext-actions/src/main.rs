//! Extension Actions CLI
//!
//! Lists the actions registered from the plugin directory and runs
//! command-capable actions as management commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wildmatch::WildMatch;

use ext_actions::plugin::{handler, handler_names};
use ext_actions::{ActionClass, ActionRegistry, ExtActionsConfig, ExtensionAction};

/// Extension action management
#[derive(Parser, Debug)]
#[command(name = "ext-actions")]
#[command(about = "Manage translation server extension actions", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = ext_actions::config::CONFIG_FILE)]
    config: PathBuf,

    /// Plugin directory (overrides the configuration)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered actions
    List {
        /// Only actions of this class (e.g. ProjectAction)
        #[arg(long, default_value = "ExtensionAction")]
        class: String,

        /// Only titles matching this glob
        #[arg(long)]
        filter: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List imported plugin modules
    Modules,

    /// List compiled-in handlers plugin modules can refer to
    Handlers,

    /// Validate a plugin module file without registering it
    Check {
        /// Module file
        file: PathBuf,
    },

    /// Run a command action
    Run {
        /// Command name (the action title in lowercase, dash-separated)
        name: String,

        /// Arguments passed to the action
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Row of `list` output
#[derive(Debug, Serialize)]
struct ActionSummary<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    category: &'a str,
    title: &'a str,
    classes: &'a [ActionClass],
    command: Option<String>,
}

impl<'a> ActionSummary<'a> {
    fn new(action: &'a dyn ExtensionAction) -> Self {
        Self {
            type_name: action.type_name(),
            category: action.category(),
            title: action.title(),
            classes: action.classes(),
            command: action.as_command().map(|c| c.command_name()),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ext_actions=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse command line arguments
    let args = Args::parse();

    let mut config = ExtActionsConfig::load_from(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(dir) = args.dir {
        config = config.with_plugin_dir(dir);
    }
    let registry = ActionRegistry::new(&config);
    debug!(
        "Extension action directory: {}",
        registry.plugin_dir().display()
    );

    match args.command {
        Command::List {
            class,
            filter,
            json,
        } => list(&registry, &class, filter.as_deref(), json),
        Command::Modules => {
            registry.scan(false);
            for module in registry.imported_modules() {
                println!("{}", module);
            }
            Ok(())
        }
        Command::Handlers => {
            for name in handler_names() {
                match handler::lookup(name) {
                    Some(entry) => println!("{}  ({})", name, entry.class),
                    None => println!("{}", name),
                }
            }
            Ok(())
        }
        Command::Check { file } => {
            let actions = ext_actions::plugin::check_module(&file)?;
            for action in &actions {
                let action: &dyn ExtensionAction = action;
                println!("{}", action);
            }
            println!("{}: {} action(s) OK", file.display(), actions.len());
            Ok(())
        }
        Command::Run { name, args } => run(&registry, &name, &args),
    }
}

fn list(registry: &ActionRegistry, class: &str, filter: Option<&str>, json: bool) -> Result<()> {
    let Some(class) = resolve_class(registry, class) else {
        println!("No {} registered", class);
        return Ok(());
    };
    let pattern = filter.map(WildMatch::new);

    let actions: Vec<_> = registry
        .instances(class, false)
        .into_iter()
        .filter(|action| {
            pattern
                .as_ref()
                .is_none_or(|pattern| pattern.matches(action.title()))
        })
        .collect();

    let summaries: Vec<_> = actions.iter().map(|a| ActionSummary::new(&**a)).collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &summaries)?;
        writeln!(out)?;
    } else if summaries.is_empty() {
        writeln!(out, "No {} registered", class)?;
    } else {
        for (action, summary) in actions.iter().zip(&summaries) {
            match &summary.command {
                Some(command) => writeln!(out, "{}  [{}]", action, command)?,
                None => writeln!(out, "{}", action)?,
            }
        }
    }

    Ok(())
}

/// Map a class name from the command line to a registry key
///
/// Custom classes are only known once their actions have registered.
fn resolve_class(registry: &ActionRegistry, name: &str) -> Option<ActionClass> {
    if let Some(class) = ActionClass::builtin(name) {
        return Some(class);
    }
    registry.scan(false);
    registry
        .classes()
        .into_iter()
        .find(|class| class.name() == name)
}

fn run(registry: &ActionRegistry, name: &str, args: &[String]) -> Result<()> {
    let action = registry
        .find_command(name, false)
        .ok_or_else(|| ext_actions::Error::NotFound(format!("command action '{}'", name)))?;
    let command = action
        .as_command()
        .ok_or_else(|| ext_actions::Error::NotFound(format!("command action '{}'", name)))?;

    let target = command.parseargs(args)?;
    info!(
        "Running {} for proj {} lang {} store {}",
        action, target.project, target.language, target.store
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    command.runcmd(&target, &mut out)?;
    Ok(())
}
