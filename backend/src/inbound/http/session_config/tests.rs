//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("feedeyes-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn release_vars() -> HashMap<&'static str, String> {
    HashMap::from([
        (SECRET_ENV, "k".repeat(SESSION_KEY_MIN_LEN)),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("expected release validation to fail"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_missing_toggle_is_rejected(
    mut release_vars: HashMap<&'static str, String>,
    #[case] name: &'static str,
) {
    release_vars.remove(name);
    let err = release_error(release_vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(
    mut release_vars: HashMap<&'static str, String>,
    #[case] value: &str,
) {
    release_vars.insert(COOKIE_SECURE_ENV, value.to_owned());
    let err = release_error(release_vars);
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(mut release_vars: HashMap<&'static str, String>) {
    release_vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(release_vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(mut release_vars: HashMap<&'static str, String>) {
    release_vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    release_vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(release_vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_short_secret_is_rejected(mut release_vars: HashMap<&'static str, String>) {
    release_vars.insert(SECRET_ENV, "dev".to_owned());
    let err = release_error(release_vars);
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { ref origin, length: 3, .. } if origin == SECRET_ENV
    ));
}

#[rstest]
fn release_missing_key_file_is_rejected(mut release_vars: HashMap<&'static str, String>) {
    release_vars.remove(SECRET_ENV);
    let missing = std::env::temp_dir().join(format!("feedeyes-absent-{}", Uuid::new_v4()));
    release_vars.insert(KEY_FILE_ENV, missing.display().to_string());
    assert!(matches!(
        release_error(release_vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_short_key_file_is_rejected(mut release_vars: HashMap<&'static str, String>) {
    let key_file = TempKeyFile::new(32).expect("key file creation should succeed");
    release_vars.remove(SECRET_ENV);
    release_vars.insert(KEY_FILE_ENV, key_file.path_str().to_owned());
    assert!(matches!(
        release_error(release_vars),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_key_file_is_used_without_a_secret(mut release_vars: HashMap<&'static str, String>) {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file creation should succeed");
    release_vars.remove(SECRET_ENV);
    release_vars.insert(KEY_FILE_ENV, key_file.path_str().to_owned());

    let settings = session_settings_from_env(&mock_env(release_vars), BuildMode::Release)
        .expect("key file settings");
    assert_eq!(settings.key.master(), Key::derive_from(&[b'a'; 64]).master());
}

#[rstest]
fn release_valid_settings_succeed(release_vars: HashMap<&'static str, String>) {
    let secret = release_vars
        .get(SECRET_ENV)
        .cloned()
        .expect("fixture secret");
    let settings = session_settings_from_env(&mock_env(release_vars), BuildMode::Release)
        .expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(
        settings.key.master(),
        Key::derive_from(secret.as_bytes()).master()
    );
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let settings = session_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug)
        .expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case("strict", SameSite::Strict)]
#[case("NONE", SameSite::None)]
fn debug_same_site_parsing(
    mut release_vars: HashMap<&'static str, String>,
    #[case] value: &str,
    #[case] expected: SameSite,
) {
    release_vars.insert(SAMESITE_ENV, value.to_owned());
    let settings = session_settings_from_env(&mock_env(release_vars), BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn debug_short_secret_falls_back_to_a_temporary_key(
    mut release_vars: HashMap<&'static str, String>,
) {
    release_vars.insert(SECRET_ENV, "dev".to_owned());
    assert!(session_settings_from_env(&mock_env(release_vars), BuildMode::Debug).is_ok());
}

#[rstest]
#[case("Y", Some(true))]
#[case("no", Some(false))]
#[case("2", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
