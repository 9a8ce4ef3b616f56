//! Scope variants
//!
//! The scope of an action decides which pages it attaches to. A project
//! action shows up on every page below a project, a store action only on
//! store pages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::ActionRegistry;

use super::base::{ActionInfo, ExtensionAction};
use super::class::{ActionClass, ActionType};

/// Page levels of the translation server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLevel {
    Project,
    Language,
    TranslationProject,
    Store,
}

/// Granularity an action operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// A project across all languages
    Project,
    /// A language across all projects
    Language,
    /// One project in one language
    TranslationProject,
    /// A single store (translation file)
    Store,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::Project,
        Scope::Language,
        Scope::TranslationProject,
        Scope::Store,
    ];

    /// Pages an action of this scope attaches to
    pub fn pages(&self) -> &'static [PageLevel] {
        match self {
            Scope::Project => &[
                PageLevel::Project,
                PageLevel::Language,
                PageLevel::TranslationProject,
                PageLevel::Store,
            ],
            Scope::Language => &[
                PageLevel::Language,
                PageLevel::TranslationProject,
                PageLevel::Store,
            ],
            Scope::TranslationProject => &[PageLevel::TranslationProject, PageLevel::Store],
            Scope::Store => &[PageLevel::Store],
        }
    }

    pub fn attaches_to(&self, page: PageLevel) -> bool {
        self.pages().contains(&page)
    }

    /// Registry class of the scope variant
    pub fn class(&self) -> ActionClass {
        match self {
            Scope::Project => ActionClass::PROJECT,
            Scope::Language => ActionClass::LANGUAGE,
            Scope::TranslationProject => ActionClass::TRANSLATION_PROJECT,
            Scope::Store => ActionClass::STORE,
        }
    }

    /// Parse the name used in plugin modules
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "project" => Some(Scope::Project),
            "language" => Some(Scope::Language),
            "translation_project" | "translationproject" => Some(Scope::TranslationProject),
            "store" | "file" => Some(Scope::Store),
            _ => None,
        }
    }
}

macro_rules! scope_action {
    ($(#[$meta:meta])* $name:ident, $scope:expr, $class:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            info: ActionInfo,
        }

        impl $name {
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

        impl ActionType for $name {
            const CLASS: ActionClass = $class;
            const CHAIN: &'static [ActionClass] = &[$class, ActionClass::EXTENSION];
        }

        impl ExtensionAction for $name {
            fn info(&self) -> &ActionInfo {
                &self.info
            }

            fn type_name(&self) -> &str {
                Self::CLASS.name()
            }

            fn classes(&self) -> &[ActionClass] {
                Self::CHAIN
            }

            fn scope(&self) -> Option<Scope> {
                Some($scope)
            }
        }
    };
}

scope_action!(
    /// Project-level action, operating on a project across all languages
    ProjectAction,
    Scope::Project,
    ActionClass::PROJECT
);

scope_action!(
    /// Language-global action, operating on a language across all projects
    LanguageAction,
    Scope::Language,
    ActionClass::LANGUAGE
);

scope_action!(
    /// Project + language action, operating on one translation of a project
    TranslationProjectAction,
    Scope::TranslationProject,
    ActionClass::TRANSLATION_PROJECT
);

scope_action!(
    /// Individual store (file) action
    StoreAction,
    Scope::Store,
    ActionClass::STORE
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_narrow_with_scope() {
        assert_eq!(Scope::Project.pages().len(), 4);
        assert_eq!(Scope::Language.pages().len(), 3);
        assert_eq!(Scope::TranslationProject.pages().len(), 2);
        assert_eq!(Scope::Store.pages(), &[PageLevel::Store]);

        assert!(!Scope::Language.attaches_to(PageLevel::Project));
        assert!(Scope::Language.attaches_to(PageLevel::Store));
        assert!(!Scope::TranslationProject.attaches_to(PageLevel::Language));
    }

    #[test]
    fn test_every_scope_reaches_store_pages() {
        for scope in Scope::ALL {
            assert!(scope.attaches_to(PageLevel::Store), "{:?}", scope);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Scope::parse("project"), Some(Scope::Project));
        assert_eq!(
            Scope::parse("translation_project"),
            Some(Scope::TranslationProject)
        );
        assert_eq!(Scope::parse("file"), Some(Scope::Store));
        assert_eq!(Scope::parse("galaxy"), None);
    }

    #[test]
    fn test_variant_descriptions() {
        let actions: Vec<Box<dyn ExtensionAction>> = vec![
            Box::new(ProjectAction::new("cat", "dog")),
            Box::new(LanguageAction::new("cat", "dog")),
            Box::new(TranslationProjectAction::new("cat", "dog")),
            Box::new(StoreAction::new("cat", "dog")),
        ];
        let described: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
        assert_eq!(
            described,
            vec![
                r#"ProjectAction(category="cat", title="dog")"#,
                r#"LanguageAction(category="cat", title="dog")"#,
                r#"TranslationProjectAction(category="cat", title="dog")"#,
                r#"StoreAction(category="cat", title="dog")"#,
            ]
        );
    }

    #[test]
    fn test_variant_chain() {
        let action = StoreAction::new("Validate", "Check placeables");
        assert_eq!(action.classes(), &[ActionClass::STORE, ActionClass::EXTENSION]);
        assert_eq!(action.scope(), Some(Scope::Store));
        assert_eq!(action.scope().map(|s| s.class()), Some(StoreAction::CLASS));
    }
}
