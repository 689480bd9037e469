use swc_ecma_ast::{ObjectPat, Program, Stmt};
use tracing::debug;

use crate::classifier::{classify, Binding, RequireStatement, SortingNode};
use crate::config::Settings;
use crate::source::{SourceFile, TextRange};

/// A destructuring load whose property list is checked on its own.
#[derive(Debug, Clone, Copy)]
pub struct DestructuredRequire<'a> {
    pub range: TextRange,
    pub pattern: &'a ObjectPat,
}

/// Eligible statements of one file, in source order.
#[derive(Debug, Default)]
pub struct CollectedSequence<'a> {
    pub nodes: Vec<SortingNode<'a>>,
    pub destructured: Vec<DestructuredRequire<'a>>,
}

/// Walk the top level of `program` and classify every load statement.
/// Nested statements (inside functions, blocks, exports) are not eligible.
pub fn collect_sequence<'a>(
    program: &'a Program,
    source: &SourceFile,
    settings: &Settings,
) -> CollectedSequence<'a> {
    let mut sequence = CollectedSequence::default();

    for stmt in top_level_statements(program) {
        let Some(statement) = RequireStatement::recognize(stmt) else {
            continue;
        };
        let node = classify(statement, source, settings);

        if let Binding::Destructured(pattern) = statement.binding {
            sequence.destructured.push(DestructuredRequire {
                range: node.range,
                pattern,
            });
        }
        sequence.nodes.push(node);
    }

    debug!(
        statements = sequence.nodes.len(),
        destructured = sequence.destructured.len(),
        "collected require statements"
    );

    sequence
}

fn top_level_statements(program: &Program) -> Box<dyn Iterator<Item = &Stmt> + '_> {
    match program {
        Program::Script(script) => Box::new(script.body.iter()),
        Program::Module(module) => Box::new(module.body.iter().filter_map(|item| item.as_stmt())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SyntaxGroup;
    use crate::parser::ScriptParser;

    #[test]
    fn test_collects_top_level_in_source_order() {
        let source = r#"
"use strict";
const b = require("b");
function load() {
    const nested = require("nested");
}
require("a");
const { x, y } = require("c");
const value = 42;
if (process.env.DEBUG) {
    require("debug");
}
"#;
        let parsed = ScriptParser::new().parse(source, "test.js").unwrap();
        let settings = Settings::default();
        let sequence = collect_sequence(&parsed.program, &parsed.source, &settings);

        let names: Vec<_> = sequence.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "x"]);
        assert_eq!(sequence.destructured.len(), 1);
        assert_eq!(sequence.nodes[2].syntax_group, SyntaxGroup::Multiple);

        let ranges: Vec<_> = sequence.nodes.iter().map(|n| n.range).collect();
        assert!(ranges.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn test_collects_from_modules() {
        let source = r#"
import path from "path";
const fs = require("fs");
export const util = require("util");
"#;
        let parsed = ScriptParser::new().parse(source, "test.mjs").unwrap();
        let settings = Settings::default();
        let sequence = collect_sequence(&parsed.program, &parsed.source, &settings);

        assert_eq!(sequence.nodes.len(), 1);
        assert_eq!(sequence.nodes[0].name, "fs");
    }

    #[test]
    fn test_member_destructuring_is_checked_for_properties() {
        let source = r#"const { b, a } = require("x").y;"#;
        let parsed = ScriptParser::new().parse(source, "test.js").unwrap();
        let settings = Settings::default();
        let sequence = collect_sequence(&parsed.program, &parsed.source, &settings);

        assert_eq!(sequence.destructured.len(), 1);
        assert_eq!(sequence.destructured[0].pattern.props.len(), 2);
    }
}
