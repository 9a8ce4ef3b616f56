//! Extension Actions
//!
//! Administrator-provided actions that attach to the pages of a translation
//! server (projects, languages, translation projects, stores):
//! - Plugin modules discovered by scanning the `ext_actions` directory
//! - A registry of live action instances keyed by action class
//! - Scope variants deciding which pages an action attaches to
//! - A command-line capability for actions usable as management commands

pub mod action;
pub mod config;
pub mod plugin;
pub mod registry;
pub mod types;

#[doc(hidden)]
pub use inventory;

pub use action::{
    ActionClass, ActionInfo, ActionType, BaseAction, CommandAction, ExtensionAction,
    LanguageAction, PageLevel, ProjectAction, Scope, StoreAction, TranslationProjectAction,
};
pub use config::ExtActionsConfig;
pub use plugin::{ActionHandler, HandlerEntry, ImportError, PluginAction, PluginLoader};
pub use registry::ActionRegistry;
pub use types::{ActionOutput, ActionTarget, Error, Presentation, Result};
