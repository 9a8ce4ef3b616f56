//! Handler catalog
//!
//! Behavior compiled into the server and referenced by name from plugin
//! modules (`handler = "export-csv"`). Handlers register themselves at link
//! time with [`register_action_handler!`](crate::register_action_handler).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::action::{ActionClass, ActionInfo};
use crate::types::{ActionOutput, ActionTarget, Presentation, Result};

/// Behavior behind a plugin-declared action
pub trait ActionHandler: Send + Sync {
    fn run(&self, info: &ActionInfo, target: &ActionTarget) -> Result<ActionOutput>;

    /// How the output is presented
    fn presentation(&self) -> Presentation {
        Presentation::ShowOutput
    }
}

/// Constructor for a handler, called once per declaring action
pub type HandlerBuildFn = fn() -> Result<Box<dyn ActionHandler>>;

/// Catalog entry for a handler
pub struct HandlerEntry {
    /// Name plugin modules refer to
    pub name: &'static str,
    /// Class of the actions using this handler
    pub class: ActionClass,
    pub build: HandlerBuildFn,
}

inventory::collect!(HandlerEntry);

static HANDLERS: Lazy<HashMap<&'static str, &'static HandlerEntry>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for entry in inventory::iter::<HandlerEntry>() {
        if map.insert(entry.name, entry).is_some() {
            tracing::warn!("Duplicate extension action handler: {}", entry.name);
        }
    }
    map
});

/// Look up a handler by name
pub fn lookup(name: &str) -> Option<&'static HandlerEntry> {
    HANDLERS.get(name).copied()
}

/// Names of every registered handler, sorted
pub fn handler_names() -> Vec<&'static str> {
    let mut names: Vec<_> = HANDLERS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Register a handler with the catalog
///
/// ```rust,ignore
/// fn build_export() -> ext_actions::Result<Box<dyn ActionHandler>> {
///     Ok(Box::new(ExportCsv))
/// }
///
/// register_action_handler!("export-csv", ActionClass::new("ExportCsv"), build_export);
/// ```
#[macro_export]
macro_rules! register_action_handler {
    ($name:expr, $class:expr, $build:expr) => {
        $crate::inventory::submit! {
            $crate::plugin::HandlerEntry { name: $name, class: $class, build: $build }
        }
    };
}
