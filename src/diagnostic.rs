use serde::Serialize;
use std::fmt;

use crate::source::{Position, SourceFile, TextRange};

/// Categorical reason a diagnostic was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageId {
    GroupOrder,
    NameOrder,
    MissingSpacing,
    ExtraSpacing,
    PropertyOrder,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::GroupOrder => "group-order",
            MessageId::NameOrder => "name-order",
            MessageId::MissingSpacing => "missing-spacing",
            MessageId::ExtraSpacing => "extra-spacing",
            MessageId::PropertyOrder => "property-order",
        }
    }

    fn template(self) -> &'static str {
        match self {
            MessageId::GroupOrder => "Expected '{rightGroup}' group to come before '{leftGroup}' group.",
            MessageId::NameOrder => "Expected '{right}' to come before '{left}'.",
            MessageId::MissingSpacing => "Missed spacing between '{left}' and '{right}'.",
            MessageId::ExtraSpacing => "Extra spacing between '{left}' and '{right}'.",
            MessageId::PropertyOrder => {
                "Property '{propertyName}' of the require declaration should be sorted alphabetically."
            }
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A replacement of `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fix {
    pub range: TextRange,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message_id: MessageId,
    pub range: TextRange,
    pub position: Position,
    pub data: Vec<(&'static str, String)>,
    pub message: String,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(
        message_id: MessageId,
        range: TextRange,
        source: &SourceFile,
        data: Vec<(&'static str, String)>,
        fix: Option<Fix>,
    ) -> Self {
        let message = render(message_id.template(), &data);
        Self {
            message_id,
            range,
            position: source.position_of(range.start),
            data,
            message,
            fix,
        }
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

fn render(template: &str, data: &[(&'static str, String)]) -> String {
    data.iter().fold(template.to_string(), |message, (key, value)| {
        message.replace(&format!("{{{key}}}"), value)
    })
}
