// Plugin System - administrator-installed extension action modules
//
// Plugin modules are TOML files in the ext_actions directory. Each declares
// one or more actions, optionally backed by a compiled-in handler.
//
// Plugin Lifecycle:
// 1. Discovery: List module files directly inside the plugin directory
// 2. Import: Parse a module and build every action it declares
// 3. Registration: Each built action registers under its class chain
// 4. Isolation: A module that fails to import is logged and skipped

pub mod action;
pub mod handler;
pub mod loader;
pub mod manifest;

// Plugin-declared actions
pub use action::PluginAction;

// Handler catalog
pub use handler::{ActionHandler, HandlerEntry, handler_names};

// Plugin loader
pub use loader::{ImportError, PluginLoader, check_module, load_module};

// Module format
pub use manifest::{ActionDecl, PluginModule};
