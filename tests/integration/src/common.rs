//! Shared fixtures for the end-to-end tests.

#![allow(dead_code)]

use dotcopy_core::{CopyDirective, MemoryLog, StaticContext};
use dotcopy_test_utils::{SandboxIdentity, TestTree};
use serde_json::Value;

pub type Directive = CopyDirective<StaticContext, MemoryLog, SandboxIdentity>;

/// Directive rooted at the tree's `dotfiles/` with `~` pointing at `home/`.
pub fn directive(tree: &TestTree, defaults: Value) -> Directive {
    let context = StaticContext::new(tree.base()).with_defaults("copy", defaults);
    CopyDirective::new(context, MemoryLog::new())
        .with_identity(SandboxIdentity::for_tree(tree))
        .with_expander(tree.expander())
}

/// Parse a dotbot-style YAML task list and return the `copy` defaults and
/// the `copy` mapping data.
pub fn load_config(yaml: &str) -> (Value, Value) {
    let tasks: Vec<Value> = serde_yaml::from_str(yaml).unwrap();
    let mut defaults = Value::Null;
    let mut mapping = Value::Null;
    for task in tasks {
        if let Some(d) = task.pointer("/defaults/copy") {
            defaults = d.clone();
        }
        if let Some(m) = task.get("copy") {
            mapping = m.clone();
        }
    }
    (defaults, mapping)
}
