//! Cross-cutting guarantees of repeated and partial runs

mod common;

use common::directive;
use dotcopy_core::{Level, Mapping};
use dotcopy_test_utils::{TestTree, TreeSnapshot};
use pretty_assertions::assert_eq;
use serde_json::json;

mod idempotence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn forced_runs_converge_to_the_same_tree() {
        let tree = TestTree::new();
        tree.write_source("nvim/init.lua", "require('opts')");
        tree.write_source("nvim/lua/opts.lua", "vim.o.number = true");
        tree.symlink_source("nvim/lua/current.lua", "opts.lua");
        tree.write_source("gitconfig", "[core]");
        let mapping = json!({
            "~/.config/nvim": "nvim",
            "~/.gitconfig": {"path": "gitconfig", "fmode": 0o600},
        });
        let defaults = json!({"force": true, "create": true});

        assert!(directive(&tree, defaults.clone()).handle_value("copy", &mapping).unwrap());
        let first = TreeSnapshot::capture(&tree.home());

        assert!(directive(&tree, defaults).handle_value("copy", &mapping).unwrap());
        let second = TreeSnapshot::capture(&tree.home());

        assert_eq!(first, second);
    }

    #[test]
    fn second_run_without_force_fails_only_for_trees() {
        let tree = TestTree::new();
        tree.write_source("dir/file", "x");
        tree.write_source("file", "y");
        let mapping = Mapping::new().with("~/dir", "dir").with("~/file", "file");

        assert!(directive(&tree, json!({})).handle("copy", &mapping).unwrap());
        tree.write_home("dir/file", "edited");
        tree.write_home("file", "edited");

        let rerun = directive(&tree, json!({}));
        assert!(!rerun.handle("copy", &mapping).unwrap());

        tree.assert_file("home/dir/file", "edited");
        tree.assert_file("home/file", "y");
        assert_eq!(rerun.log().messages(Level::Warning).len(), 1);
    }
}

mod partial_failure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_grandparent_does_not_stop_other_entries() {
        let tree = TestTree::new();
        for name in ["one", "two", "three"] {
            tree.write_source(name, name);
        }
        let mapping = Mapping::new()
            .with("~/one", "one")
            .with("~/missing/deeper/two", "two")
            .with("~/three", "three");

        let directive = directive(&tree, json!({"create": true}));
        let ok = directive.handle("copy", &mapping).unwrap();

        assert!(!ok);
        tree.assert_file("home/one", "one");
        tree.assert_file("home/three", "three");
        tree.assert_missing("home/missing");
        let warnings = directive.log().messages(Level::Warning);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Failed to create directory "));
        assert!(warnings[1].starts_with("Failed to copy "));
    }

    #[test]
    fn nothing_is_rolled_back_after_a_failed_copy() {
        let tree = TestTree::new();
        tree.write_source("new", "fresh");
        tree.write_home("victim", "old");
        let mapping = Mapping::new()
            .with("~/victim", "does-not-exist")
            .with("~/new", "new");

        let directive = directive(&tree, json!({"force": true}));
        assert!(!directive.handle("copy", &mapping).unwrap());

        tree.assert_missing("home/victim");
        tree.assert_file("home/new", "fresh");
        assert!(
            directive.log().messages(Level::LowInfo)[0].starts_with("Removing file ")
        );
    }
}

mod ownership {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_copied_node_gets_policy_owner_and_modes() {
        let tree = TestTree::new();
        tree.write_source("share/a/b/c.txt", "c");
        tree.write_source("share/top.txt", "t");
        tree.symlink_source("share/a/link", "b/c.txt");

        let directive = directive(&tree, json!({"fmode": "600", "dmode": "700"}));
        assert!(directive.handle_value("copy", &json!({"~/share": "share"})).unwrap());

        let snapshot = TreeSnapshot::capture(&tree.home().join("share"));
        let owner = tree.owner();
        for node in &snapshot.nodes {
            assert_eq!((node.uid, node.gid), (owner.uid, owner.gid), "{:?}", node.path);
        }
        tree.assert_mode("home/share", 0o700);
        tree.assert_mode("home/share/a/b", 0o700);
        tree.assert_mode("home/share/a/b/c.txt", 0o600);
        tree.assert_mode("home/share/top.txt", 0o600);
        tree.assert_symlink("home/share/a/link", "b/c.txt");
    }
}
