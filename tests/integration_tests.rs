use pretty_assertions::assert_eq;
use require_sort::{
    comparator::GroupDimension,
    config::{NewlinesBetween, SortMode, SortOrder},
    fix_source, lint_source, Configuration, Diagnostic, MessageId, Settings,
};

fn settings(config: Configuration) -> Settings {
    Settings::new(config).unwrap()
}

fn lint(input: &str, config: Configuration) -> Vec<Diagnostic> {
    lint_source(input, "test.js", &settings(config)).unwrap()
}

fn fix(input: &str, config: Configuration) -> String {
    let report = fix_source(input, "test.js", &settings(config)).unwrap();
    assert!(
        report.remaining.is_empty(),
        "unexpected diagnostics after fixing: {:?}",
        report.remaining
    );
    report.output
}

fn message_ids(diagnostics: &[Diagnostic]) -> Vec<MessageId> {
    diagnostics.iter().map(|d| d.message_id).collect()
}

#[test]
fn test_end_to_end_default_configuration() {
    let input = r#"require("./local");
require("fs");
const { z, a } = require("lodash");
"#;

    let diagnostics = lint(input, Configuration::default());
    assert_eq!(
        message_ids(&diagnostics),
        vec![
            MessageId::GroupOrder,
            MessageId::MissingSpacing,
            MessageId::MissingSpacing,
            MessageId::PropertyOrder,
        ]
    );
    assert_eq!(
        diagnostics[0].message,
        "Expected 'builtin' group to come before 'relative' group."
    );

    let report = fix_source(input, "test.js", &Settings::default()).unwrap();
    assert_eq!(
        report.output,
        r#"require("fs");

require("./local");

const { a, z } = require("lodash");
"#
    );
    assert_eq!(report.passes, 2);
    assert!(report.remaining.is_empty());
}

#[test]
fn test_end_to_end_module_dimension_first() {
    let input = r#"require("./local");
require("fs");
const { z, a } = require("lodash");
"#;
    let config = Configuration {
        group_order: vec![
            GroupDimension::Module,
            GroupDimension::Syntax,
            GroupDimension::Declaration,
        ],
        ..Default::default()
    };

    assert_eq!(
        fix(input, config),
        r#"require("fs");

const { a, z } = require("lodash");

require("./local");
"#
    );
}

#[test]
fn test_blank_line_policy_at_group_boundary() {
    let input = r#"const fs = require("fs");
const a = require("a");
const b = require("b");
"#;
    let diagnostics = lint(input, Configuration::default());

    assert_eq!(message_ids(&diagnostics), vec![MessageId::MissingSpacing]);
    assert_eq!(diagnostics[0].position.line, 2);
    assert_eq!(
        fix(input, Configuration::default()),
        r#"const fs = require("fs");

const a = require("a");
const b = require("b");
"#
    );
}

#[test]
fn test_never_policy_removes_blank_lines() {
    let input = r#"const fs = require("fs");

const a = require("a");

const b = require("./b");
"#;
    let config = Configuration {
        newlines_between: NewlinesBetween::Never,
        ..Default::default()
    };

    assert_eq!(
        message_ids(&lint(input, config.clone())),
        vec![MessageId::ExtraSpacing, MessageId::ExtraSpacing]
    );
    assert_eq!(
        fix(input, config),
        r#"const fs = require("fs");
const a = require("a");
const b = require("./b");
"#
    );
}

#[test]
fn test_property_sort_abstains_on_comment() {
    let input = r#"const {
  b,
  // keep with a
  a
} = require("m");
"#;
    let report = fix_source(input, "test.js", &Settings::default()).unwrap();

    assert_eq!(report.output, input);
    assert_eq!(report.passes, 0);
    assert_eq!(message_ids(&report.remaining), vec![MessageId::PropertyOrder]);
    assert!(!report.remaining[0].is_fixable());
}

#[test]
fn test_property_sort_without_comment() {
    let input = "const { b, a } = require(\"m\");\n";
    assert_eq!(
        fix(input, Configuration::default()),
        "const { a, b } = require(\"m\");\n"
    );
}

#[test]
fn test_comment_between_statements_prevents_fix() {
    let input = r#"const b = require("b");
// explains a
const a = require("a");
"#;
    let report = fix_source(input, "test.js", &Settings::default()).unwrap();

    assert_eq!(report.output, input);
    assert_eq!(message_ids(&report.remaining), vec![MessageId::NameOrder]);
    assert!(!report.remaining[0].is_fixable());
}

#[test]
fn test_comment_attached_to_run_prevents_fix() {
    let trailing = r#"const b = require("b");
const a = require("a"); // only for a
"#;
    let leading = r#"// load b for X
const b = require("b");
const a = require("a");
"#;

    for input in [trailing, leading] {
        let report = fix_source(input, "test.js", &Settings::default()).unwrap();

        assert_eq!(report.output, input);
        assert_eq!(message_ids(&report.remaining), vec![MessageId::NameOrder]);
        assert!(!report.remaining[0].is_fixable());
    }
}

#[test]
fn test_crlf_line_endings_are_kept() {
    let input = "const b = require(\"./b\");\r\nconst fs = require(\"fs\");\r\n";

    assert_eq!(
        fix(input, Configuration::default()),
        "const fs = require(\"fs\");\r\n\r\nconst b = require(\"./b\");\r\n"
    );
}

#[test]
fn test_escaped_module_path_is_decoded() {
    // Decoded, the second path is nested-external and sorts after `c`.
    let input = r#"const c = require("c");
const ab = require("a\x2fb");
"#;
    let config = Configuration {
        sort_mode: SortMode::Path,
        ..Default::default()
    };
    let diagnostics = lint(input, config);

    assert_eq!(message_ids(&diagnostics), vec![MessageId::MissingSpacing]);
    assert_eq!(diagnostics[0].message, "Missed spacing between 'c' and 'a/b'.");
}

#[test]
fn test_surrounding_code_is_untouched() {
    let input = r#"#!/usr/bin/env node
"use strict";

const path = require("path");
const express = require("express");
const fs = require("fs");

const app = express();
app.listen(3000);
"#;

    assert_eq!(
        fix(input, Configuration::default()),
        r#"#!/usr/bin/env node
"use strict";

const fs = require("fs");
const path = require("path");

const express = require("express");

const app = express();
app.listen(3000);
"#
    );
}

#[test]
fn test_declaration_shapes() {
    let input = r#"const debug = require("debug")("app");
const lodash = require("lodash");
const join = require("path").join;
"#;

    assert_eq!(
        fix(input, Configuration::default()),
        r#"const debug = require("debug")("app");

const join = require("path").join;

const lodash = require("lodash");
"#
    );
}

#[test]
fn test_internal_paths() {
    let input = r#"const config = require("~/config");
const lodash = require("lodash");
"#;
    let diagnostics = lint(input, Configuration::default());

    assert_eq!(
        diagnostics[0].message,
        "Expected 'external' group to come before 'internal' group."
    );

    let config = Configuration {
        internal_pattern: vec!["^lodash$".to_string()],
        module_type_order: vec![
            require_sort::module_path::ModuleType::Internal,
            require_sort::module_path::ModuleType::External,
        ],
        ..Default::default()
    };
    // `~/config` is nested-external, which this order leaves unlisted.
    assert_eq!(
        fix(input, config),
        r#"const config = require("~/config");

const lodash = require("lodash");
"#
    );
}

#[test]
fn test_unlisted_module_type_sorts_first() {
    let input = r#"const r = require("./r");
const l = require("lodash");
"#;
    let config = Configuration {
        module_type_order: vec![
            require_sort::module_path::ModuleType::Relative,
            require_sort::module_path::ModuleType::Builtin,
        ],
        ..Default::default()
    };
    let diagnostics = lint(input, config.clone());

    assert_eq!(
        message_ids(&diagnostics),
        vec![MessageId::GroupOrder, MessageId::MissingSpacing]
    );
    assert_eq!(
        diagnostics[0].message,
        "Expected 'external' group to come before 'relative' group."
    );
    assert_eq!(
        fix(input, config),
        r#"const l = require("lodash");

const r = require("./r");
"#
    );
}

#[test]
fn test_descending_path_mode() {
    let input = r#"const x = require("a");
const y = require("c");
const z = require("b");
"#;
    let config = Configuration {
        sort_mode: SortMode::Path,
        sort_order: SortOrder::Desc,
        ..Default::default()
    };

    assert_eq!(
        fix(input, config),
        r#"const y = require("c");
const z = require("b");
const x = require("a");
"#
    );
}

#[test]
fn test_length_mode() {
    let input = r#"const lodash = require("lodash");
const a = require("a");
"#;
    let config = Configuration {
        sort_mode: SortMode::Length,
        ..Default::default()
    };

    assert_eq!(
        fix(input, config),
        r#"const a = require("a");
const lodash = require("lodash");
"#
    );
}

#[test]
fn test_typescript_annotations() {
    let input = r#"const b: B = require("b");
const a: A = require("a");
"#;
    let report = fix_source(input, "test.ts", &Settings::default()).unwrap();

    assert_eq!(
        report.output,
        r#"const a: A = require("a");
const b: B = require("b");
"#
    );
}

#[test]
fn test_json_configuration() {
    let config = Configuration::from_json_str(
        r#"{ "newlinesBetween": "ignore", "ignorePropertySort": true }"#,
    )
    .unwrap();
    let input = r#"const fs = require("fs");
const { b, a } = require("./x");
"#;

    assert!(lint(input, config).is_empty());
}

#[test]
fn test_fixing_is_idempotent() {
    let input = r#"const { y, x } = require("./y");
const b = require("b");
require("polyfill");
const fs = require("node:fs");
const a = require("a");
"#;
    let settings = Settings::default();
    let first = fix_source(input, "test.js", &settings).unwrap();
    let second = fix_source(&first.output, "test.js", &settings).unwrap();

    assert!(first.remaining.is_empty());
    assert_eq!(second.output, first.output);
    assert_eq!(second.passes, 0);
    assert!(lint(&first.output, Configuration::default()).is_empty());
}

#[test]
fn test_parse_error_is_reported() {
    let result = lint_source("const { = require(", "broken.js", &Settings::default());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("broken.js"), "{message}");
}
