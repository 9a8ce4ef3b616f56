//! Actions declared by plugin modules

use std::io::{self, Write};

use crate::action::{
    ActionClass, ActionInfo, CommandAction, ExtensionAction, Scope, log_unimplemented_run,
};
use crate::types::{ActionOutput, ActionTarget, Presentation, Result};

use super::handler::ActionHandler;

/// Action declared in a plugin module
///
/// Its class chain is built from the declaration: the handler's class (if
/// any), the scope class (if any), `CommandAction` when invocable from the
/// command line, and finally `ExtensionAction`.
pub struct PluginAction {
    info: ActionInfo,
    module: String,
    scope: Option<Scope>,
    command: bool,
    handler: Option<(ActionClass, Box<dyn ActionHandler>)>,
    classes: Vec<ActionClass>,
}

impl PluginAction {
    pub fn new(
        module: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let mut action = Self {
            info: ActionInfo::new(category, title),
            module: module.into(),
            scope: None,
            command: false,
            handler: None,
            classes: Vec::new(),
        };
        action.classes = action.chain();
        action
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self.classes = self.chain();
        self
    }

    pub fn with_command(mut self) -> Self {
        self.command = true;
        self.classes = self.chain();
        self
    }

    pub fn with_handler(mut self, class: ActionClass, handler: Box<dyn ActionHandler>) -> Self {
        self.handler = Some((class, handler));
        self.classes = self.chain();
        self
    }

    /// Fully-qualified name of the declaring module
    pub fn module(&self) -> &str {
        &self.module
    }

    fn chain(&self) -> Vec<ActionClass> {
        let mut classes = Vec::with_capacity(4);
        if let Some((class, _)) = &self.handler {
            classes.push(*class);
        }
        if let Some(scope) = self.scope {
            classes.push(scope.class());
        }
        if self.command {
            classes.push(ActionClass::COMMAND);
        }
        classes.push(ActionClass::EXTENSION);
        classes
    }
}

impl ExtensionAction for PluginAction {
    fn info(&self) -> &ActionInfo {
        &self.info
    }

    fn type_name(&self) -> &str {
        self.classes
            .first()
            .map(ActionClass::name)
            .unwrap_or(ActionClass::EXTENSION.name())
    }

    fn classes(&self) -> &[ActionClass] {
        &self.classes
    }

    fn scope(&self) -> Option<Scope> {
        self.scope
    }

    fn run(&self, target: &ActionTarget) -> Result<ActionOutput> {
        match &self.handler {
            Some((_, handler)) => handler.run(&self.info, target),
            None => {
                log_unimplemented_run(self.type_name(), self.title(), target);
                Ok(ActionOutput::empty())
            }
        }
    }

    fn presentation(&self) -> Option<Presentation> {
        self.handler.as_ref().map(|(_, handler)| handler.presentation())
    }

    fn showoutput(&self, output: &ActionOutput, page: &mut dyn Write) -> io::Result<()> {
        page.write_all(output.as_bytes())
    }

    fn newpage(&self, output: &ActionOutput, page: &mut dyn Write) -> io::Result<()> {
        writeln!(page, "{}", self.title())?;
        page.write_all(output.as_bytes())
    }

    fn returnfile(&self, output: &ActionOutput, page: &mut dyn Write) -> io::Result<()> {
        match &output.file_name {
            Some(name) => writeln!(page, "{}", name),
            None => writeln!(page, "{}.out", crate::action::slug(self.title())),
        }
    }

    fn as_command(&self) -> Option<&dyn CommandAction> {
        if self.command { Some(self) } else { None }
    }
}

impl CommandAction for PluginAction {}

impl std::fmt::Debug for PluginAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginAction")
            .field("info", &self.info)
            .field("module", &self.module)
            .field("classes", &self.classes)
            .finish()
    }
}
