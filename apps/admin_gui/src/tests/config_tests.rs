use std::collections::HashMap;

use super::*;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("admin_gui_config_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(CONFIG_FILE_NAME);
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_local_api() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "http://localhost:3000");
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn file_values_fill_only_what_they_name() {
    let path = temp_config("partial", "api_base_url = \"https://api.mila.co/\"\n");

    let settings = read_settings_file(&path).expect("read").expect("present");

    assert_eq!(settings.api_base_url, "https://api.mila.co/");
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(settings.window_title, Settings::default().window_title);
}

#[test]
fn missing_file_is_not_an_error() {
    let path = std::env::temp_dir().join("admin_gui_config_missing/none.toml");
    assert!(read_settings_file(&path).expect("read").is_none());
}

#[test]
fn malformed_file_is_reported() {
    let path = temp_config("broken", "request_timeout_secs = \"soon\"\n");
    assert!(read_settings_file(&path).is_err());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("ADMIN_API_BASE_URL", "http://legacy:3000"),
        ("APP__API_BASE_URL", "http://preferred:3000"),
        ("APP__REQUEST_TIMEOUT_SECS", "30"),
    ]);
    let mut settings = Settings::default();

    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://preferred:3000");
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn invalid_timeout_env_keeps_previous_value() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| {
        (key == "APP__REQUEST_TIMEOUT_SECS").then(|| "later".to_string())
    });
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn base_url_is_trimmed_and_validated() {
    assert_eq!(
        normalize_base_url(" http://localhost:3000/ ").expect("valid"),
        "http://localhost:3000"
    );
    assert!(normalize_base_url("ftp://files.mila.co").is_err());
    assert!(normalize_base_url("localhost").is_err());
}

#[test]
fn command_line_url_overrides_file() {
    let path = temp_config("cli", "api_base_url = \"http://from-file:3000\"\n");
    let args = Args {
        api_base_url: Some("http://from-cli:4000/".to_string()),
        config: Some(path),
    };

    let settings = load_settings(&args).expect("settings");

    assert_eq!(settings.api_base_url, "http://from-cli:4000");
}

#[test]
fn explicit_config_must_exist() {
    let args = Args {
        api_base_url: None,
        config: Some(PathBuf::from("/nonexistent/admin_gui/admin.toml")),
    };
    assert!(load_settings(&args).is_err());
}
