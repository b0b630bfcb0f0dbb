//! Integration tests for Settings config loading.
//!
//! Precedence: compiled defaults, then the global TOML file, then KINTREE_*
//! environment variables as explicit overrides.
//!
//! Note: these tests assume no global config file on the machine, so they
//! exercise defaults and env overrides. The process environment is shared,
//! hence the lock around every test that touches KINTREE_* variables.

use std::path::PathBuf;
use std::sync::Mutex;

use kintree::Settings;

static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn given_env_override_when_loading_then_env_wins() {
    // Arrange
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("KINTREE_DATA_DIR", "/tmp/kintree-trees");

    // Act
    let settings = Settings::load().expect("load settings");
    std::env::remove_var("KINTREE_DATA_DIR");

    // Assert
    assert_eq!(settings.data_dir, PathBuf::from("/tmp/kintree-trees"));
}

#[test]
fn given_env_override_with_var_when_loading_then_path_is_expanded() {
    // Arrange
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("KINTREE_DATA_DIR", "$HOME/kintree-trees");

    // Act
    let settings = Settings::load().expect("load settings");
    std::env::remove_var("KINTREE_DATA_DIR");

    // Assert
    let home = std::env::var("HOME").expect("HOME should be set");
    let data_dir = settings.data_dir.to_string_lossy().into_owned();
    assert!(
        data_dir.starts_with(&home),
        "data_dir should expand $HOME: {}",
        data_dir
    );
    assert!(
        !data_dir.contains('$'),
        "data_dir should not contain $: {}",
        data_dir
    );
}

#[test]
fn given_no_env_override_when_loading_then_default_data_dir() {
    // Arrange
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var("KINTREE_DATA_DIR");

    // Act
    let settings = Settings::load().expect("load settings");

    // Assert
    assert_eq!(settings.data_dir, PathBuf::from("data"));
}
