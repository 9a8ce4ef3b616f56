// Plugin Loader - Discovers and imports plugin modules from a directory

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, error, info};

use crate::action::{ActionClass, ExtensionAction, Scope};
use crate::registry::ActionRegistry;

use super::action::PluginAction;
use super::handler;
use super::manifest::{ActionDecl, PluginModule};

/// Failure to import a single plugin module
///
/// Never aborts a scan: the module is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("action '{title}' has unknown scope '{scope}'")]
    UnknownScope { title: String, scope: String },

    #[error("action '{title}' uses unknown handler '{handler}'")]
    UnknownHandler { title: String, handler: String },

    #[error("handler '{handler}' failed to build: {reason}")]
    HandlerBuild { handler: String, reason: String },

    #[error("invalid action '{title}': {reason}")]
    InvalidAction { title: String, reason: String },
}

/// A plugin module found in the plugin directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCandidate {
    /// File stem, e.g. `export_csv`
    pub name: String,
    pub path: PathBuf,
}

/// Scans the plugin directory and imports each module at most once
///
/// ```text
/// ext_actions/
/// ├── export_csv.toml   <- imported as <namespace>.export_csv
/// ├── validate.toml     <- imported as <namespace>.validate
/// ├── .swp.toml         <- hidden, skipped
/// └── drafts/           <- not scanned
/// ```
#[derive(Debug)]
pub struct PluginLoader {
    plugin_dir: PathBuf,
    extension: String,
    namespace: String,
    imported: HashSet<String>,
}

impl PluginLoader {
    pub fn new(plugin_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let plugin_dir = plugin_dir.into();
        let namespace = namespace_of(&plugin_dir);
        Self {
            plugin_dir,
            extension: extension.into(),
            namespace,
            imported: HashSet::new(),
        }
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    /// Dotted name of the plugin directory itself
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully-qualified name of a module in the plugin directory
    pub fn module_path(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        }
    }

    pub fn is_imported(&self, module_path: &str) -> bool {
        self.imported.contains(module_path)
    }

    /// Every name imported so far (the directory namespace included), sorted
    pub fn imported(&self) -> Vec<String> {
        let mut names: Vec<_> = self.imported.iter().cloned().collect();
        names.sort();
        names
    }

    /// List candidate modules directly inside the plugin directory
    ///
    /// Order follows the filesystem listing and is not stable across
    /// platforms.
    pub fn discover(&self) -> std::io::Result<Vec<ModuleCandidate>> {
        let mut candidates = Vec::new();

        for entry in std::fs::read_dir(&self.plugin_dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!(
                        "Cannot read entry in extension action directory {}: {}",
                        self.plugin_dir.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();

            // Skip subdirectories
            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if name.is_empty() || name.starts_with('.') {
                continue;
            }

            let matches_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == self.extension);
            if !matches_extension {
                continue;
            }

            candidates.push(ModuleCandidate {
                name: name.to_string(),
                path,
            });
        }

        Ok(candidates)
    }

    /// Import every module not imported yet, registering its actions
    ///
    /// Returns the number of modules imported by this scan.
    pub fn scan(&mut self, registry: &ActionRegistry) -> usize {
        if !self.import_namespace() {
            return 0;
        }

        let candidates = match self.discover() {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(
                    "Failed to list extension action directory {}: {}",
                    self.plugin_dir.display(),
                    e
                );
                return 0;
            }
        };

        let mut loaded = 0;
        for candidate in candidates {
            let module_path = self.module_path(&candidate.name);
            if self.imported.contains(&module_path) {
                continue;
            }

            match load_module(&module_path, &candidate.path) {
                Ok(actions) => {
                    for action in actions {
                        registry.register(action);
                    }
                    self.imported.insert(module_path.clone());
                    info!("Loaded extension action module {}", module_path);
                    loaded += 1;
                }
                Err(e) => {
                    error!("Bad extension action module {}: {}", candidate.name, e);
                }
            }
        }

        loaded
    }

    /// Make sure the plugin directory itself is known. A missing directory
    /// is not recorded so it is picked up once it appears.
    fn import_namespace(&mut self) -> bool {
        if self.imported.contains(&self.namespace) {
            return true;
        }

        if !self.plugin_dir.is_dir() {
            debug!(
                "Extension action directory does not exist: {}",
                self.plugin_dir.display()
            );
            return false;
        }

        self.imported.insert(self.namespace.clone());
        true
    }
}

/// Dotted form of a directory path: `/srv/pootle/ext_actions` becomes
/// `srv.pootle.ext_actions`
fn namespace_of(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Read a module and build every action it declares
///
/// All declarations are resolved before anything is returned, so a module
/// with one bad declaration contributes no actions at all.
pub fn load_module(module_path: &str, path: &Path) -> Result<Vec<PluginAction>, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let module = PluginModule::from_toml(&content).map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    module
        .actions
        .iter()
        .map(|decl| build_action(module_path, decl))
        .collect()
}

/// Validate a module file without registering its actions
pub fn check_module(path: &Path) -> crate::types::Result<Vec<PluginAction>> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(load_module(&name, path)?)
}

fn build_action(module_path: &str, decl: &ActionDecl) -> Result<PluginAction, ImportError> {
    if decl.title.trim().is_empty() {
        return Err(ImportError::InvalidAction {
            title: decl.title.clone(),
            reason: "title is empty".to_string(),
        });
    }

    let mut action = PluginAction::new(module_path, decl.category.as_str(), decl.title.as_str());

    match decl.scope.as_deref() {
        Some(name) => {
            let scope = Scope::parse(name).ok_or_else(|| ImportError::UnknownScope {
                title: decl.title.clone(),
                scope: name.to_string(),
            })?;
            action = action.with_scope(scope);
        }
        None if decl.command => {
            return Err(ImportError::InvalidAction {
                title: decl.title.clone(),
                reason: "command actions need a scope".to_string(),
            });
        }
        None => {}
    }

    if decl.command {
        action = action.with_command();
    }

    if let Some(name) = &decl.handler {
        let entry = handler::lookup(name).ok_or_else(|| ImportError::UnknownHandler {
            title: decl.title.clone(),
            handler: name.clone(),
        })?;
        if ActionClass::builtin(entry.class.name()).is_some() {
            return Err(ImportError::InvalidAction {
                title: decl.title.clone(),
                reason: format!("handler '{}' reuses builtin class {}", name, entry.class),
            });
        }
        let built = (entry.build)().map_err(|e| ImportError::HandlerBuild {
            handler: name.clone(),
            reason: e.to_string(),
        })?;
        action = action.with_handler(entry.class, built);
    }

    debug!("{}::new {}", action.type_name(), action.title());
    Ok(action)
}
