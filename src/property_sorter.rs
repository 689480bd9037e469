use std::cmp::Ordering;
use swc_common::Spanned;
use swc_ecma_ast::{ObjectPatProp, PropName};
use tracing::debug;

use crate::classifier::local_binding_name;
use crate::collector::DestructuredRequire;
use crate::config::Settings;
use crate::diagnostic::{Diagnostic, Fix, MessageId};
use crate::source::{SourceError, SourceFile, TextRange};

struct Property {
    range: TextRange,
    key: String,
    name: Option<String>,
}

/// Checks that the names bound by a destructuring load are in alphabetical order.
pub struct PropertySorter<'s> {
    settings: &'s Settings,
    source: &'s SourceFile,
}

impl<'s> PropertySorter<'s> {
    pub fn new(settings: &'s Settings, source: &'s SourceFile) -> Self {
        Self { settings, source }
    }

    /// Report the first property that should come before its predecessor.
    pub fn check(
        &self,
        destructured: &DestructuredRequire<'_>,
    ) -> Result<Option<Diagnostic>, SourceError> {
        let properties = destructured
            .pattern
            .props
            .iter()
            .map(|prop| self.property(prop))
            .collect::<Result<Vec<_>, _>>()?;

        let inversion = properties.windows(2).find_map(|pair| {
            let (prev, curr) = (pair[0].name.as_deref()?, pair[1].name.as_deref()?);
            (self.compare(prev, curr) == Ordering::Greater).then_some(&pair[1])
        });
        let Some(unsorted) = inversion else {
            return Ok(None);
        };

        let pattern_range = self.source.range_of(destructured.pattern.span);
        let fix = self.reorder(&properties, pattern_range)?;

        Ok(Some(Diagnostic::new(
            MessageId::PropertyOrder,
            unsorted.range,
            self.source,
            vec![("propertyName", unsorted.key.clone())],
            fix,
        )))
    }

    fn property(&self, prop: &ObjectPatProp) -> Result<Property, SourceError> {
        let key = match prop {
            ObjectPatProp::Assign(assign) => assign.key.sym.to_string(),
            ObjectPatProp::KeyValue(kv) => match &kv.key {
                PropName::Ident(ident) => ident.sym.to_string(),
                other => self.source.slice(self.source.range_of(other.span()))?.to_string(),
            },
            ObjectPatProp::Rest(rest) => self.source.slice(self.source.range_of(rest.span))?.to_string(),
        };

        Ok(Property {
            range: self.source.range_of(prop.span()),
            key,
            name: local_binding_name(prop),
        })
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        if self.settings.config.ignore_case {
            a.to_lowercase().cmp(&b.to_lowercase())
        } else {
            a.cmp(b)
        }
    }

    /// Reprint the property list in sorted order, keeping the separator that stood
    /// at each position. Abstains when a comment sits outside the properties
    /// themselves or a property has no name to sort by.
    fn reorder(
        &self,
        properties: &[Property],
        pattern_range: TextRange,
    ) -> Result<Option<Fix>, SourceError> {
        if properties.iter().any(|property| property.name.is_none()) {
            debug!("destructuring contains rest or nested patterns, not offering a fix");
            return Ok(None);
        }

        let attached_comment = self
            .source
            .comments_within(pattern_range)
            .any(|comment| !properties.iter().any(|p| p.range.contains_range(comment)));
        if attached_comment {
            debug!(
                start = pattern_range.start,
                end = pattern_range.end,
                "comment attached to destructured names, not offering a fix"
            );
            return Ok(None);
        }

        let (Some(first), Some(last)) = (properties.first(), properties.last()) else {
            return Ok(None);
        };

        let separators = properties
            .windows(2)
            .map(|pair| self.source.slice(TextRange::new(pair[0].range.end, pair[1].range.start)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sorted: Vec<&Property> = properties.iter().collect();
        sorted.sort_by(|a, b| {
            self.compare(
                a.name.as_deref().unwrap_or_default(),
                b.name.as_deref().unwrap_or_default(),
            )
        });

        let mut text = String::new();
        for (index, property) in sorted.iter().enumerate() {
            if index > 0 {
                text.push_str(separators[index - 1]);
            }
            text.push_str(self.source.slice(property.range)?);
        }

        Ok(Some(Fix {
            range: TextRange::new(first.range.start, last.range.end),
            text,
        }))
    }
}
