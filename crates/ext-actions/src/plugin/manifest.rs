//! Plugin module format
//!
//! A plugin module is a TOML file in the plugin directory declaring one or
//! more actions:
//!
//! ```toml
//! [[action]]
//! scope = "project"
//! category = "Translate offline"
//! title = "Export CSV"
//! handler = "export-csv"
//! command = true
//! ```

use serde::Deserialize;

/// Parsed plugin module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginModule {
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionDecl>,
}

/// One declared action
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDecl {
    /// `project`, `language`, `translation_project` or `store`; omitted
    /// for a base-level action
    pub scope: Option<String>,
    pub category: String,
    pub title: String,
    /// Name of a compiled-in handler providing the behavior
    pub handler: Option<String>,
    /// Also invocable as a management command
    #[serde(default)]
    pub command: bool,
}

impl PluginModule {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module() {
        let module = PluginModule::from_toml(
            r#"
            [[action]]
            scope = "project"
            category = "Translate offline"
            title = "Export CSV"
            handler = "export-csv"
            command = true

            [[action]]
            category = "Misc"
            title = "Ping"
            "#,
        )
        .unwrap();

        assert_eq!(module.actions.len(), 2);
        let export = &module.actions[0];
        assert_eq!(export.scope.as_deref(), Some("project"));
        assert_eq!(export.handler.as_deref(), Some("export-csv"));
        assert!(export.command);

        let ping = &module.actions[1];
        assert!(ping.scope.is_none());
        assert!(ping.handler.is_none());
        assert!(!ping.command);
    }

    #[test]
    fn test_empty_module() {
        let module = PluginModule::from_toml("").unwrap();
        assert!(module.actions.is_empty());
    }

    #[test]
    fn test_missing_title_rejected() {
        let result = PluginModule::from_toml(
            r#"
            [[action]]
            category = "Misc"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = PluginModule::from_toml(
            r#"
            [[action]]
            category = "Misc"
            title = "Ping"
            colour = "red"
            "#,
        );
        assert!(result.is_err());
    }
}
