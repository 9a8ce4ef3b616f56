//! Action classes
//!
//! Registry keys. Every concrete action type declares the ordered chain of
//! classes it belongs to, most specific first and always ending with
//! [`ActionClass::EXTENSION`]. An instance is registered under each class of
//! its chain, so a query for a general class also returns the instances of
//! every more specific type.

use serde::Serialize;

/// Type-level key of the instance registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActionClass(&'static str);

impl ActionClass {
    /// Base of every extension action
    pub const EXTENSION: Self = Self("ExtensionAction");
    /// Operates on a project across all languages
    pub const PROJECT: Self = Self("ProjectAction");
    /// Operates on a language across all projects
    pub const LANGUAGE: Self = Self("LanguageAction");
    /// Operates on one project in one language
    pub const TRANSLATION_PROJECT: Self = Self("TranslationProjectAction");
    /// Operates on a single store (translation file)
    pub const STORE: Self = Self("StoreAction");
    /// Invocable as a management command
    pub const COMMAND: Self = Self("CommandAction");

    /// Classes predefined by this crate
    pub const BUILTIN: &'static [ActionClass] = &[
        Self::EXTENSION,
        Self::PROJECT,
        Self::LANGUAGE,
        Self::TRANSLATION_PROJECT,
        Self::STORE,
        Self::COMMAND,
    ];

    /// Define a class for a concrete action type
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }

    /// Look up a predefined class by name
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTIN.iter().copied().find(|class| class.0 == name)
    }
}

impl std::fmt::Display for ActionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Concrete action types with a statically known class and chain
pub trait ActionType {
    /// The type's own class
    const CLASS: ActionClass;
    /// Own class followed by every class the type belongs to
    const CHAIN: &'static [ActionClass];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(ActionClass::builtin("StoreAction"), Some(ActionClass::STORE));
        assert_eq!(ActionClass::builtin("CommandAction"), Some(ActionClass::COMMAND));
        assert_eq!(ActionClass::builtin("ExportCsv"), None);
    }

    #[test]
    fn test_custom_class_is_distinct() {
        const EXPORT: ActionClass = ActionClass::new("ExportCsv");
        assert_ne!(EXPORT, ActionClass::PROJECT);
        assert_eq!(EXPORT.to_string(), "ExportCsv");
    }
}
