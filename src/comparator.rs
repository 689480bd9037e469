use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::classifier::SortingNode;
use crate::config::{Settings, SortMode, SortOrder};

/// One of the independent axes statements are grouped along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDimension {
    Syntax,
    Declaration,
    Module,
}

impl fmt::Display for GroupDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupDimension::Syntax => "syntax",
            GroupDimension::Declaration => "declaration",
            GroupDimension::Module => "module",
        })
    }
}

/// Orders classified statements: group dimensions in configured priority, then the key.
pub struct Comparator<'s> {
    settings: &'s Settings,
}

impl<'s> Comparator<'s> {
    pub fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    /// Position of the node's tag in the configured order for `dimension`,
    /// counted from 1. Tags missing from the list rank 0, before every listed one.
    pub fn rank(&self, dimension: GroupDimension, node: &SortingNode<'_>) -> usize {
        let config = &self.settings.config;
        let position = match dimension {
            GroupDimension::Syntax => position_of(&config.property_syntax_order, &node.syntax_group),
            GroupDimension::Declaration => {
                position_of(&config.declaration_order, &node.declaration_group)
            }
            GroupDimension::Module => position_of(&config.module_type_order, &node.module_group),
        };
        position.map_or(0, |position| position + 1)
    }

    /// The tag of `node` along `dimension`, as it appears in messages.
    pub fn label(dimension: GroupDimension, node: &SortingNode<'_>) -> &'static str {
        match dimension {
            GroupDimension::Syntax => node.syntax_group.as_str(),
            GroupDimension::Declaration => node.declaration_group.as_str(),
            GroupDimension::Module => node.module_group.as_str(),
        }
    }

    /// The highest-priority dimension whose ranks differ between `a` and `b`.
    pub fn deciding_dimension(
        &self,
        a: &SortingNode<'_>,
        b: &SortingNode<'_>,
    ) -> Option<GroupDimension> {
        self.settings
            .config
            .group_order
            .iter()
            .copied()
            .find(|&dimension| self.rank(dimension, a) != self.rank(dimension, b))
    }

    pub fn compare(&self, a: &SortingNode<'_>, b: &SortingNode<'_>) -> Ordering {
        match self.deciding_dimension(a, b) {
            Some(dimension) => self.rank(dimension, a).cmp(&self.rank(dimension, b)),
            None => self.compare_names(&a.name, &b.name),
        }
    }

    pub fn compare_names(&self, a: &str, b: &str) -> Ordering {
        let config = &self.settings.config;

        let ordering = match config.sort_mode {
            SortMode::Length => a
                .chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b)),
            SortMode::Name | SortMode::Path if config.ignore_case => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            SortMode::Name | SortMode::Path => a.cmp(b),
        };

        match config.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn position_of<T: PartialEq>(order: &[T], value: &T) -> Option<usize> {
    order.iter().position(|candidate| candidate == value)
}
