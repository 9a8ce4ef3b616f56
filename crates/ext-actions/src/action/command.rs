//! Command-line capability
//!
//! Extension actions that can also be invoked as management commands. This
//! is not a scope of its own; an action combines it with exactly one scope
//! by listing [`ActionClass::COMMAND`](super::ActionClass::COMMAND) in its
//! class chain and returning itself from `as_command`.

use std::io::Write;

use clap::Parser;
use tracing::debug;

use crate::types::{ANY, ActionTarget, Result};

use super::base::ExtensionAction;

/// Arguments accepted by every command action
#[derive(Parser, Debug)]
#[command(name = "ext-action", no_binary_name = true)]
struct TargetArgs {
    /// Project code
    #[arg(long, default_value = ANY)]
    project: String,

    /// Language code
    #[arg(long, default_value = ANY)]
    language: String,

    /// Store path
    #[arg(long, default_value = ANY)]
    store: String,
}

pub trait CommandAction: ExtensionAction {
    /// Name the command is invoked by
    fn command_name(&self) -> String {
        slug(self.title())
    }

    /// Parse command line arguments into an invocation target
    fn parseargs(&self, args: &[String]) -> Result<ActionTarget> {
        let parsed = TargetArgs::try_parse_from(args)?;
        Ok(ActionTarget::new(parsed.project, parsed.language, parsed.store))
    }

    /// Run as a management command, presenting the result to `out`
    fn runcmd(&self, target: &ActionTarget, out: &mut dyn Write) -> Result<()> {
        debug!("Running command {} ({})", self.command_name(), self.title());
        let output = self.run(target)?;
        self.present(&output, out)?;
        out.flush()?;
        Ok(())
    }
}

/// Lowercase, dash-separated form of a title
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionClass, ActionInfo, Scope};
    use crate::types::{ActionOutput, Error, Presentation};
    use std::io;

    const RECOUNT_CHAIN: &[ActionClass] = &[
        ActionClass::TRANSLATION_PROJECT,
        ActionClass::COMMAND,
        ActionClass::EXTENSION,
    ];

    struct Recount {
        info: ActionInfo,
    }

    impl ExtensionAction for Recount {
        fn info(&self) -> &ActionInfo {
            &self.info
        }

        fn type_name(&self) -> &str {
            "Recount"
        }

        fn classes(&self) -> &[ActionClass] {
            RECOUNT_CHAIN
        }

        fn scope(&self) -> Option<Scope> {
            Some(Scope::TranslationProject)
        }

        fn run(&self, target: &ActionTarget) -> Result<ActionOutput> {
            Ok(format!("recounted {}/{}", target.project, target.language).into())
        }

        fn presentation(&self) -> Option<Presentation> {
            Some(Presentation::ShowOutput)
        }

        fn showoutput(&self, output: &ActionOutput, page: &mut dyn Write) -> io::Result<()> {
            page.write_all(output.as_bytes())?;
            writeln!(page)
        }

        fn as_command(&self) -> Option<&dyn CommandAction> {
            Some(self)
        }
    }

    impl CommandAction for Recount {}

    fn recount() -> Recount {
        Recount {
            info: ActionInfo::new("Statistics", "Recount Stats"),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Export CSV"), "export-csv");
        assert_eq!(slug("  Check -- placeables!"), "check-placeables");
        assert_eq!(slug("Recount Stats"), "recount-stats");
    }

    #[test]
    fn test_parseargs_defaults_to_wildcards() {
        let target = recount().parseargs(&[]).unwrap();
        assert_eq!(target, ActionTarget::any());
    }

    #[test]
    fn test_parseargs_values() {
        let target = recount()
            .parseargs(&args(&["--project", "tutorial", "--language", "fr"]))
            .unwrap();
        assert_eq!(target, ActionTarget::new("tutorial", "fr", "*"));
    }

    #[test]
    fn test_parseargs_rejects_unknown() {
        let err = recount().parseargs(&args(&["--galaxy", "far"])).unwrap_err();
        assert!(matches!(err, Error::Args(_)));
    }

    #[test]
    fn test_runcmd_writes_output() {
        let action = recount();
        let command = action.as_command().unwrap();
        assert_eq!(command.command_name(), "recount-stats");

        let target = command
            .parseargs(&args(&["--project", "tutorial", "--language", "de"]))
            .unwrap();
        let mut out = Vec::new();
        command.runcmd(&target, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "recounted tutorial/de\n");
    }

    struct Silent {
        info: ActionInfo,
    }

    impl ExtensionAction for Silent {
        fn info(&self) -> &ActionInfo {
            &self.info
        }

        fn type_name(&self) -> &str {
            "Silent"
        }

        fn classes(&self) -> &[ActionClass] {
            RECOUNT_CHAIN
        }

        fn run(&self, _target: &ActionTarget) -> Result<ActionOutput> {
            Ok("hidden".into())
        }
    }

    impl CommandAction for Silent {}

    #[test]
    fn test_runcmd_without_presentation_writes_nothing() {
        let action = Silent {
            info: ActionInfo::new("Statistics", "Silent"),
        };
        let mut out = Vec::new();
        action.runcmd(&ActionTarget::any(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
