//! Runs in its own process because it points the user config directory at a
//! temporary location.

#![cfg(target_os = "linux")]

use kubetalk::cli::{utils, CliApp};
use kubetalk::Config;
use tempfile::TempDir;

#[test]
fn test_user_config_dir_is_the_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let user_config = temp_dir.path().join("kubetalk/config.yaml");
    std::fs::create_dir_all(user_config.parent().unwrap()).unwrap();

    let mut config = Config::default();
    config.sample.foo = "from-user-dir".to_string();
    config.save_to_file(&user_config).unwrap();

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let matches = CliApp::app()
        .try_get_matches_from(["kubetalk", "sample"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();

    assert_eq!(utils::get_config_path(sub).unwrap(), Some(user_config));
    assert_eq!(utils::load_config(sub).unwrap().sample.foo, "from-user-dir");
}
