use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;
use thiserror::Error;

use crate::classifier::{DeclarationGroup, SyntaxGroup};
use crate::comparator::GroupDimension;
use crate::module_path::{Environment, ModuleType};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate entry '{entry}' in {option}")]
    DuplicateEntry { option: &'static str, entry: String },
    #[error("Invalid internal pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Blank-line policy between statements of different groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlinesBetween {
    #[default]
    Always,
    Never,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Name,
    Path,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// User-facing options. Every field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    pub ignore_case: bool,
    pub ignore_declaration_sort: bool,
    pub ignore_property_sort: bool,
    pub newlines_between: NewlinesBetween,
    pub property_syntax_order: Vec<SyntaxGroup>,
    pub module_type_order: Vec<ModuleType>,
    pub declaration_order: Vec<DeclarationGroup>,
    pub group_order: Vec<GroupDimension>,
    pub environment: Environment,
    pub internal_pattern: Vec<String>,
    pub sort_mode: SortMode,
    pub sort_order: SortOrder,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ignore_case: false,
            ignore_declaration_sort: false,
            ignore_property_sort: false,
            newlines_between: NewlinesBetween::Always,
            property_syntax_order: vec![
                SyntaxGroup::None,
                SyntaxGroup::Single,
                SyntaxGroup::Multiple,
            ],
            module_type_order: vec![
                ModuleType::Builtin,
                ModuleType::NestedBuiltin,
                ModuleType::Subpath,
                ModuleType::External,
                ModuleType::NestedExternal,
                ModuleType::Internal,
                ModuleType::Relative,
            ],
            declaration_order: vec![DeclarationGroup::Member, DeclarationGroup::Static],
            group_order: vec![
                GroupDimension::Syntax,
                GroupDimension::Declaration,
                GroupDimension::Module,
            ],
            environment: Environment::Node,
            internal_pattern: vec!["^~/".to_string(), "^@/".to_string()],
            sort_mode: SortMode::Name,
            sort_order: SortOrder::Asc,
        }
    }
}

impl Configuration {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Resolved, immutable options for one run: the configuration plus its compiled patterns.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Configuration,
    internal_patterns: Vec<Regex>,
}

impl Settings {
    pub fn new(config: Configuration) -> Result<Self, ConfigError> {
        ensure_unique("propertySyntaxOrder", &config.property_syntax_order)?;
        ensure_unique("moduleTypeOrder", &config.module_type_order)?;
        ensure_unique("declarationOrder", &config.declaration_order)?;
        ensure_unique("groupOrder", &config.group_order)?;

        let internal_patterns = config
            .internal_pattern
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            internal_patterns,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::new(Configuration::from_path(path)?)
    }

    pub fn internal_patterns(&self) -> &[Regex] {
        &self.internal_patterns
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Configuration::default()).expect("default configuration is valid")
    }
}

fn ensure_unique<T: Eq + Hash + Debug>(option: &'static str, values: &[T]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ConfigError::DuplicateEntry {
                option,
                entry: format!("{value:?}"),
            });
        }
    }
    Ok(())
}
