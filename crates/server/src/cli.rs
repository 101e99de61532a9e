use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Returns true for [`OutputFormat::Json`].
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Document kinds accepted by `aosm validate`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ValidateKind {
    /// Skill markdown with a YAML header.
    Skill,
    /// Agent markdown with a YAML header.
    Agent,
    /// Project `config.yml`.
    Config,
}

/// Command-line interface for the `aosm` application.
#[derive(Debug, Parser)]
#[command(
    name = "aosm",
    version,
    about = "Layered global/project manager for Agent OS skills, agents, templates, and config"
)]
pub struct Cli {
    /// Project root to use instead of searching upward from the working directory.
    #[arg(long, global = true, env = "AOSM_PROJECT_ROOT", value_name = "DIR")]
    pub project: Option<PathBuf>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `aosm` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Shows the resolved global and project directories.
    Paths,
    /// Manages skills (`skills/**/*.md`).
    Skills {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manages agents (`agents/*.md`).
    Agents {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Manages templates (`templates/**/*.md`).
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Reads or replaces the project `config.yml`.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Validates a document without writing it.
    Validate {
        /// Kind of document.
        #[arg(value_enum)]
        kind: ValidateKind,
        /// File to validate (`-` reads stdin).
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Serves line-delimited JSON requests over stdio.
    Serve,
}

/// Operations on header-named resources (skills and agents).
#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Lists merged global and project entries.
    List,
    /// Shows one entry.
    Show { name: String },
    /// Writes a project entry from a file (`-` reads stdin).
    Write {
        name: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Removes a project entry.
    Delete { name: String },
    /// Copies a global entry into the project.
    Override { name: String },
    /// Drops the project copy so the global entry applies again.
    Revert { name: String },
    /// Compares the global and project copies.
    Diff {
        name: String,
        /// Unchanged lines shown around each change.
        #[arg(long, default_value_t = 3)]
        context: usize,
    },
}

/// Operations on templates, addressed by path under `templates/`.
#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// Lists merged templates grouped by system and category.
    List,
    /// Shows one template.
    Show { path: String },
    /// Writes a project template from a file (`-` reads stdin).
    Write {
        path: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Copies a global template into the project.
    Override { path: String },
    /// Compares the global and project copies.
    Diff {
        path: String,
        /// Unchanged lines shown around each change.
        #[arg(long, default_value_t = 3)]
        context: usize,
    },
}

/// Operations on the project config document.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Prints the config document.
    Show,
    /// Validates and replaces the config document from a YAML file (`-` reads stdin).
    Write {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aosm", "skills", "diff", "testing", "--format", "json", "--context", "1",
        ])
        .unwrap();
        assert!(cli.format.is_json());
        match cli.command {
            Commands::Skills {
                action: ResourceAction::Diff { name, context },
            } => {
                assert_eq!(name, "testing");
                assert_eq!(context, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_takes_kind_and_file() {
        let cli = Cli::try_parse_from(["aosm", "validate", "config", "-"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate {
                kind: ValidateKind::Config,
                ..
            }
        ));
    }
}
