use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Classification of the path handed to `require`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleType {
    Builtin,
    NestedBuiltin,
    Subpath,
    NestedExternal,
    Internal,
    External,
    Relative,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Builtin => "builtin",
            ModuleType::NestedBuiltin => "nested-builtin",
            ModuleType::Subpath => "subpath",
            ModuleType::NestedExternal => "nested-external",
            ModuleType::Internal => "internal",
            ModuleType::External => "external",
            ModuleType::Relative => "relative",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime whose builtin module set is used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Node,
    Bun,
    /// Any other runtime name. Nothing is a builtin here.
    #[serde(other)]
    Unknown,
}

impl Environment {
    pub fn is_builtin(self, path: &str) -> bool {
        match self {
            Environment::Node => NODE_BUILTIN_MODULES.contains(path) || path.starts_with("node:"),
            Environment::Bun => BUN_BUILTIN_MODULES.contains(path) || path.starts_with("bun:"),
            Environment::Unknown => false,
        }
    }
}

const NODE_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

const BUN_NODE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "constants",
    "cluster",
    "console",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
    "test",
];

const BUN_PREFIX_ONLY_MODULES: &[&str] = &["bun:sqlite", "bun:test", "bun:wrap", "bun:ffi", "bun:jsc"];

// Packages Bun ships in-process rather than resolving from node_modules.
const BUN_IMPORTED_MODULES: &[&str] = &["detect-libc", "undici", "bun", "ws"];

static NODE_BUILTIN_MODULES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NODE_MODULES.iter().copied().collect());

static BUN_BUILTIN_MODULES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    BUN_NODE_MODULES
        .iter()
        .chain(BUN_PREFIX_ONLY_MODULES)
        .chain(BUN_IMPORTED_MODULES)
        .copied()
        .collect()
});

/// Classify a module path. The checks run in a fixed order and the first match wins,
/// so `#x` is always a subpath and `./x` always relative, whatever the patterns say.
pub fn classify_module_path(
    path: &str,
    environment: Environment,
    internal_patterns: &[Regex],
) -> ModuleType {
    if path.starts_with('#') {
        return ModuleType::Subpath;
    }
    if is_relative(path) {
        return ModuleType::Relative;
    }
    if let Some((head, _)) = path.split_once('/') {
        if environment.is_builtin(head) {
            return ModuleType::NestedBuiltin;
        }
    }
    if environment.is_builtin(path) {
        return ModuleType::Builtin;
    }
    if internal_patterns.iter().any(|pattern| pattern.is_match(path)) {
        return ModuleType::Internal;
    }
    if path.contains('/') {
        return ModuleType::NestedExternal;
    }
    ModuleType::External
}

fn is_relative(path: &str) -> bool {
    path == "." || path.starts_with("./") || path.starts_with("../")
}
