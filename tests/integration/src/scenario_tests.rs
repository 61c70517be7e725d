//! End-to-end runs of the copy directive from a YAML configuration

mod common;

use common::{directive, load_config};
use dotcopy_core::{CopyDirective, IdentityResolver, Level, MemoryLog, StaticContext, SystemIdentity};
use dotcopy_test_utils::TestTree;
use pretty_assertions::assert_eq;

#[test]
fn single_file_with_built_in_policy() {
    let tree = TestTree::new();
    tree.write_source("vimrc", "syntax on\n");
    tree.chmod("dotfiles/vimrc", 0o600);
    let (defaults, data) = load_config(
        r#"
- copy:
    ~/.vimrc: vimrc
"#,
    );

    let directive = directive(&tree, defaults);
    let ok = directive.handle_value("copy", &data).unwrap();

    assert!(ok);
    tree.assert_file("home/.vimrc", "syntax on\n");
    tree.assert_mode("home/.vimrc", 0o644);
    tree.assert_owner("home/.vimrc", tree.owner());
    assert_eq!(
        directive.log().messages(Level::Info),
        vec!["All copies have been set up"]
    );
}

#[test]
fn directory_with_defaults_and_entry_override() {
    let tree = TestTree::new();
    tree.write_source("app/settings.toml", "theme = \"dark\"");
    tree.write_source("app/plugins/a.toml", "enabled = true");
    tree.chmod("dotfiles/app/plugins", 0o777);
    let (defaults, data) = load_config(
        r#"
- defaults:
    copy:
      fmode: "0640"
      dmode: "0750"
      create: true
- copy:
    ~/.config/app:
      path: app
      force: true
"#,
    );

    let directive = directive(&tree, defaults);
    assert!(directive.handle_value("copy", &data).unwrap());

    tree.assert_mode("home/.config", 0o750);
    tree.assert_mode("home/.config/app", 0o750);
    tree.assert_mode("home/.config/app/plugins", 0o750);
    tree.assert_mode("home/.config/app/settings.toml", 0o640);
    tree.assert_mode("home/.config/app/plugins/a.toml", 0o640);
    tree.assert_file("home/.config/app/plugins/a.toml", "enabled = true");

    let lowinfo = directive.log().messages(Level::LowInfo);
    assert_eq!(lowinfo.len(), 2);
    assert_eq!(
        lowinfo[0],
        format!("Creating directory {}", tree.home().join(".config").display())
    );
    assert!(lowinfo[1].starts_with("Copied "));
}

#[test]
fn entry_level_create_builds_private_config_tree() {
    let tree = TestTree::new();
    tree.write_source("app-config/app.conf", "level = 3");
    tree.write_source("app-config/themes/dark.conf", "bg = black");

    let directive = directive(&tree, serde_json::json!({}));
    let ok = directive
        .handle_value(
            "copy",
            &serde_json::json!({
                "~/.config/app": {"path": "app-config", "create": true, "dmode": 0o700}
            }),
        )
        .unwrap();

    assert!(ok);
    for dir in ["home/.config", "home/.config/app", "home/.config/app/themes"] {
        tree.assert_mode(dir, 0o700);
        tree.assert_owner(dir, tree.owner());
    }
    tree.assert_mode("home/.config/app/app.conf", 0o644);
    tree.assert_mode("home/.config/app/themes/dark.conf", 0o644);
}

#[test]
fn force_replaces_existing_bashrc() {
    let tree = TestTree::new();
    tree.write_source("bashrc", "export EDITOR=vim");
    tree.write_home(".bashrc", "# distro default");
    let (defaults, data) = load_config(
        r#"
- defaults:
    copy:
      force: true
- copy:
    ~/.bashrc: bashrc
"#,
    );

    let directive = directive(&tree, defaults);
    assert!(directive.handle_value("copy", &data).unwrap());

    tree.assert_file("home/.bashrc", "export EDITOR=vim");
    assert_eq!(
        directive.log().messages(Level::LowInfo)[0],
        format!("Removing file {}", tree.home().join(".bashrc").display())
    );
}

#[test]
fn unwritable_destination_fails_one_entry_only() {
    let tree = TestTree::new();
    if tree.is_root() {
        eprintln!("Skipping test: running as root bypasses permission checks");
        return;
    }
    tree.write_source("a", "a");
    tree.write_source("b", "b");
    tree.write_home("sealed/.keep", "");
    tree.chmod("home/sealed", 0o555);
    let (defaults, data) = load_config(
        r#"
- copy:
    ~/sealed/a: a
    ~/b: b
"#,
    );

    let directive = directive(&tree, defaults);
    let ok = directive.handle_value("copy", &data).unwrap();
    tree.chmod("home/sealed", 0o755);

    assert!(!ok);
    tree.assert_missing("home/sealed/a");
    tree.assert_file("home/b", "b");
    let warnings = directive.log().messages(Level::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Failed to copy "), "{}", warnings[0]);
    assert_eq!(
        directive.log().messages(Level::Error),
        vec!["Some copies were not successfully set up"]
    );
}

#[test]
fn system_identity_owns_files_by_current_user() {
    let tree = TestTree::new();
    if SystemIdentity.current_user().is_err() || SystemIdentity.current_group().is_err() {
        eprintln!("Skipping test: no user or group database entry for this process");
        return;
    }
    tree.write_source("tmux.conf", "set -g mouse on");
    let directive = CopyDirective::new(StaticContext::new(tree.base()), MemoryLog::new())
        .with_expander(tree.expander());

    let ok = directive
        .handle_value("copy", &serde_json::json!({"~/.tmux.conf": "tmux.conf"}))
        .unwrap();

    assert!(ok);
    tree.assert_owner("home/.tmux.conf", tree.owner());
    tree.assert_mode("home/.tmux.conf", 0o644);
}
