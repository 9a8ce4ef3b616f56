// Action Registry - Live extension action instances keyed by action class
//
// Every action is stored under each class of its chain, so asking for a
// general class (e.g. ExtensionAction) also returns the instances of more
// specific types. Plugin modules are imported lazily on first query.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::action::{ActionClass, ActionType, ExtensionAction, PageLevel};
use crate::config::ExtActionsConfig;
use crate::plugin::PluginLoader;

/// Registered actions, in registration order
pub type ActionList = Vec<Arc<dyn ExtensionAction>>;

/// Loader plus whether anything has been queried yet. Held across a scan,
/// which serializes lazy population.
struct LoadState {
    loader: PluginLoader,
    queried: bool,
}

static GLOBAL: Lazy<ActionRegistry> = Lazy::new(|| {
    let config = ExtActionsConfig::load().unwrap_or_else(|e| {
        warn!("{}; using default extension action settings", e);
        ExtActionsConfig::default()
    });
    ActionRegistry::new(&config)
});

/// Registry of live extension actions
///
/// # Example
///
/// ```rust,ignore
/// let registry = ActionRegistry::with_plugin_dir("/srv/pootle/ext_actions");
///
/// // Created actions register themselves
/// let export = ProjectAction::create(&registry, "Translate offline", "Export CSV");
///
/// // First query also imports the plugin modules
/// let project_actions = registry.instances(ActionClass::PROJECT, false);
/// ```
pub struct ActionRegistry {
    instances: RwLock<HashMap<ActionClass, ActionList>>,
    state: Mutex<LoadState>,
}

impl ActionRegistry {
    pub fn new(config: &ExtActionsConfig) -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            state: Mutex::new(LoadState {
                loader: PluginLoader::new(&config.plugin_dir, &config.module_extension),
                queried: false,
            }),
        }
    }

    /// Registry scanning `dir` with the default module extension
    pub fn with_plugin_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(&ExtActionsConfig::default().with_plugin_dir(dir))
    }

    /// The process-wide registry, configured from `ext-actions.toml` and the
    /// environment on first use
    pub fn global() -> &'static ActionRegistry {
        &GLOBAL
    }

    /// Register an action under every class of its chain
    pub fn register<A: ExtensionAction>(&self, action: A) -> Arc<A> {
        let action = Arc::new(action);
        self.register_shared(action.clone());
        action
    }

    /// Register an already shared action
    pub fn register_shared(&self, action: Arc<dyn ExtensionAction>) {
        let mut instances = self.instances.write();
        for class in action.classes() {
            let list = instances.entry(*class).or_default();
            list.push(action.clone());
            debug!("instances[{}] = {} actions", class, list.len());
        }
    }

    /// Import plugin modules if this is the first query, the registry is
    /// empty, or `rescan` is set
    ///
    /// Returns the number of modules imported.
    pub fn scan(&self, rescan: bool) -> usize {
        let mut state = self.state.lock();
        let first = !state.queried;
        state.queried = true;

        let empty = self.instances.read().is_empty();
        if first || empty || rescan {
            state.loader.scan(self)
        } else {
            0
        }
    }

    /// All instances of `class`, including those of more specific types
    ///
    /// Unknown classes yield an empty list.
    pub fn instances(&self, class: ActionClass, rescan: bool) -> ActionList {
        self.scan(rescan);
        self.instances.write().entry(class).or_default().clone()
    }

    /// All instances of the action type `T`
    pub fn instances_of<T: ActionType>(&self, rescan: bool) -> ActionList {
        self.instances(T::CLASS, rescan)
    }

    /// Scoped actions that attach to `page`, in registration order
    pub fn for_page(&self, page: PageLevel, rescan: bool) -> ActionList {
        self.instances(ActionClass::EXTENSION, rescan)
            .into_iter()
            .filter(|action| action.scope().is_some_and(|scope| scope.attaches_to(page)))
            .collect()
    }

    /// Find a command-line capable action by its command name
    pub fn find_command(&self, name: &str, rescan: bool) -> Option<Arc<dyn ExtensionAction>> {
        self.instances(ActionClass::COMMAND, rescan)
            .into_iter()
            .find(|action| {
                action
                    .as_command()
                    .is_some_and(|command| command.command_name() == name)
            })
    }

    /// Classes that currently have a key, sorted
    pub fn classes(&self) -> Vec<ActionClass> {
        let mut classes: Vec<_> = self.instances.read().keys().copied().collect();
        classes.sort();
        classes
    }

    /// Fully-qualified names of the imported plugin modules
    pub fn imported_modules(&self) -> Vec<String> {
        self.state.lock().loader.imported()
    }

    pub fn plugin_dir(&self) -> std::path::PathBuf {
        self.state.lock().loader.plugin_dir().to_path_buf()
    }
}
