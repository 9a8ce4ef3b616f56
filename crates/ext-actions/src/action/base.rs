//! Extension action base
//!
//! Every extension action implements [`ExtensionAction`]. Actions are
//! registered with an [`ActionRegistry`] when they are created, so plugin
//! code only has to construct them.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::registry::ActionRegistry;
use crate::types::{ActionOutput, ActionTarget, Presentation, Result};

use super::class::{ActionClass, ActionType};
use super::command::CommandAction;
use super::scope::Scope;

/// Category and title shared by every action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionInfo {
    /// Heading for action grouping
    ///
    /// The (unlocalized) text of the category in which the action is placed,
    /// e.g. "Translate offline" for an action shown next to the download and
    /// upload actions.
    pub category: String,
    /// The (unlocalized) text for the action link
    pub title: String,
}

impl ActionInfo {
    pub fn new(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
        }
    }
}

/// User (administrator) provided action executed from the server UI
pub trait ExtensionAction: Send + Sync + 'static {
    fn info(&self) -> &ActionInfo;

    /// Name of the concrete type, used in log lines and descriptions
    fn type_name(&self) -> &str;

    /// Classes this action is registered under, most specific first
    fn classes(&self) -> &[ActionClass];

    /// Scope deciding which pages the action attaches to
    fn scope(&self) -> Option<Scope> {
        None
    }

    fn category(&self) -> &str {
        &self.info().category
    }

    fn title(&self) -> &str {
        &self.info().title
    }

    /// Run the action. Actions that do not override this only log.
    fn run(&self, target: &ActionTarget) -> Result<ActionOutput> {
        log_unimplemented_run(self.type_name(), self.title(), target);
        Ok(ActionOutput::empty())
    }

    /// Which presentation hook this action implements
    fn presentation(&self) -> Option<Presentation> {
        None
    }

    /// Display results of the action in the current page
    fn showoutput(&self, _output: &ActionOutput, _page: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Display results of the action on a results page
    fn newpage(&self, _output: &ActionOutput, _page: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Display a link to a file containing the results
    fn returnfile(&self, _output: &ActionOutput, _page: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Dispatch to the presentation hook named by [`presentation`](Self::presentation)
    fn present(&self, output: &ActionOutput, page: &mut dyn Write) -> io::Result<()> {
        match self.presentation() {
            Some(Presentation::ShowOutput) => self.showoutput(output, page),
            Some(Presentation::NewPage) => self.newpage(output, page),
            Some(Presentation::ReturnFile) => self.returnfile(output, page),
            None => Ok(()),
        }
    }

    /// The command-line capability, for actions that have it
    fn as_command(&self) -> Option<&dyn CommandAction> {
        None
    }
}

/// Warning logged when an action without behavior is run
pub fn log_unimplemented_run(type_name: &str, title: &str, target: &ActionTarget) {
    warn!(
        "{} lacks run(): {} for proj {} lang {} store {}",
        type_name, title, target.project, target.language, target.store
    );
}

impl fmt::Display for dyn ExtensionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.classes() == [ActionClass::EXTENSION] {
            write!(f, "{}({:?}, {:?})", self.type_name(), self.category(), self.title())
        } else {
            write!(
                f,
                "{}(category={:?}, title={:?})",
                self.type_name(),
                self.category(),
                self.title()
            )
        }
    }
}

impl fmt::Debug for dyn ExtensionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Base-level action with no scope
///
/// Registering one does not put anything in a page menu; it only exists in
/// the [`ActionClass::EXTENSION`] sequence.
#[derive(Debug)]
pub struct BaseAction {
    info: ActionInfo,
}

impl BaseAction {
    pub fn new(category: impl Into<String>, title: impl Into<String>) -> Self {
        let info = ActionInfo::new(category, title);
        debug!("{}::new {}", Self::CLASS, info.title);
        Self { info }
    }

    /// Create the action and register it
    pub fn create(
        registry: &ActionRegistry,
        category: impl Into<String>,
        title: impl Into<String>,
    ) -> Arc<Self> {
        registry.register(Self::new(category, title))
    }
}

impl ActionType for BaseAction {
    const CLASS: ActionClass = ActionClass::EXTENSION;
    const CHAIN: &'static [ActionClass] = &[ActionClass::EXTENSION];
}

impl ExtensionAction for BaseAction {
    fn info(&self) -> &ActionInfo {
        &self.info
    }

    fn type_name(&self) -> &str {
        Self::CLASS.name()
    }

    fn classes(&self) -> &[ActionClass] {
        Self::CHAIN
    }
}
