//! Integration tests for the configuration system.
//!
//! This test suite validates the complete workflow of the configuration
//! system, including file discovery, merging, environment variable handling,
//! and validation.
//!
//! Tests that modify environment variables are marked with `#[serial]` to
//! ensure they run sequentially. Environment variables are process-global,
//! so concurrent access would cause race conditions.

use flatlint::config::{
    env_vars, Config, ConfigBuilder, ConfigLoader, ConfigValidator, EcmaVersion, IndentStyle,
    InferrableTypesTag, QuoteStyle, SemicolonStyle, TsconfigSetting,
};
use flatlint::error::Error;
use flatlint::Overrides;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A file under `tests/fixtures/configs`.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/configs")
        .join(name)
}

/// Write `content` to `dir/filename`.
fn write_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// Sets or clears one variable until dropped.
struct EnvGuard {
    key: &'static str,
    saved: Option<String>,
}

impl EnvGuard {
    fn replace(key: &'static str, value: Option<&str>) -> Self {
        let saved = env::var(key).ok();
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
        Self { key, saved }
    }

    fn new(key: &'static str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.saved.take() {
            Some(v) => env::set_var(self.key, v),
            None => env::remove_var(self.key),
        }
    }
}

/// Clear every FLATLINT_* variable for the duration of a test.
fn clear_flatlint_env_vars() -> Vec<EnvGuard> {
    env_vars::ALL.into_iter().map(EnvGuard::remove).collect()
}

/// Builder isolated from the real user config.
fn builder_in(work: &Path, data: &TempDir) -> ConfigBuilder {
    ConfigBuilder::new()
        .with_working_dir(work)
        .with_data_dir(data.path())
}

// ============================================================================
// File Discovery
// ============================================================================

#[test]
fn test_file_discovery_upward_traversal() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let child = temp.path().join("nested").join("deeply");
    fs::create_dir_all(&child).unwrap();

    write_config(temp.path(), "flatlint.yaml", "strict: true\n");

    let config = builder_in(&child, &data).skip_env().build().unwrap();
    assert_eq!(config.strict, Some(true));
}

#[test]
fn test_file_discovery_stops_at_first_config() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let parent = temp.path().join("parent");
    let child = parent.join("child");
    fs::create_dir_all(&child).unwrap();

    write_config(temp.path(), "flatlint.yaml", "strict: true\ntsconfig: true\n");
    write_config(&parent, "flatlint.yaml", "strict: false\n");

    let config = builder_in(&child, &data).skip_env().build().unwrap();
    assert_eq!(config.strict, Some(false));
    assert_eq!(config.tsconfig, None);
}

#[test]
fn test_file_discovery_local_precedence() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    write_config(
        temp.path(),
        "flatlint.yaml",
        "options:\n  quotes: double\n  semi: always\n",
    );
    write_config(temp.path(), "flatlint.local.yaml", "options:\n  semi: never\n");

    let config = builder_in(temp.path(), &data).skip_env().build().unwrap();
    let options = config.options.unwrap();
    assert_eq!(options.quotes, Some(QuoteStyle::Double));
    assert_eq!(options.semi, Some(SemicolonStyle::Never));
}

#[test]
fn test_file_discovery_no_configs_only_sets_root_dir() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    let config = builder_in(temp.path(), &data).skip_env().build().unwrap();
    assert_eq!(
        config,
        Config {
            root_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        }
    );
}

// ============================================================================
// Merging
// ============================================================================

#[test]
#[serial]
fn test_merging_complete_precedence_chain() {
    let _guards = clear_flatlint_env_vars();
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    write_config(
        data.path(),
        "config.yaml",
        "options:\n  indent: space\n  quotes: double\n",
    );
    write_config(
        temp.path(),
        "flatlint.yaml",
        "strict: false\noptions:\n  quotes: single\n  semi: always\n",
    );
    write_config(temp.path(), "flatlint.local.yaml", "strict: true\n");
    let _env = EnvGuard::new(env_vars::SEMI, "never");

    let programmatic = Config {
        tsconfig: Some(TsconfigSetting::Enabled(true)),
        ..Default::default()
    };

    let config = builder_in(temp.path(), &data)
        .with_config(programmatic)
        .build()
        .unwrap();

    let options = config.options.unwrap();
    assert_eq!(options.indent, Some(IndentStyle::Space)); // user config
    assert_eq!(options.quotes, Some(QuoteStyle::Single)); // flatlint.yaml
    assert_eq!(config.strict, Some(true)); // flatlint.local.yaml
    assert_eq!(options.semi, Some(SemicolonStyle::Never)); // env var
    assert_eq!(config.tsconfig, Some(TsconfigSetting::Enabled(true))); // programmatic
}

#[test]
#[serial]
fn test_merging_custom_globals_accumulate() {
    let _guards = clear_flatlint_env_vars();
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    write_config(
        data.path(),
        "config.yaml",
        "environment:\n  customGlobals:\n    FROM_USER: false\n",
    );
    write_config(
        temp.path(),
        "flatlint.yaml",
        "environment:\n  customGlobals:\n    FROM_PROJECT: true\n",
    );
    let _env = EnvGuard::new(env_vars::CUSTOM_GLOBALS, "FROM_ENV:writable");

    let config = builder_in(temp.path(), &data).build().unwrap();
    let globals = config.environment.unwrap().custom_globals.unwrap();
    assert_eq!(globals.len(), 3);
    assert!(!globals["FROM_USER"]);
    assert!(globals["FROM_PROJECT"]);
    assert!(globals["FROM_ENV"]);
}

#[test]
fn test_merging_override_fragments_accumulate() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    write_config(
        temp.path(),
        "flatlint.yaml",
        "overrides:\n  - name: shared\n    rules:\n      eqeqeq: error\n",
    );
    write_config(
        temp.path(),
        "flatlint.local.yaml",
        "overrides:\n  - name: mine\n    rules:\n      eqeqeq: 'off'\n",
    );

    let config = builder_in(temp.path(), &data).skip_env().build().unwrap();
    match config.overrides {
        Some(Overrides::Fragments(fragments)) => {
            let names: Vec<_> = fragments.iter().filter_map(|f| f.name.as_deref()).collect();
            assert_eq!(names, vec!["shared", "mine"]);
        }
        other => panic!("expected fragments, got {other:?}"),
    }
}

// ============================================================================
// Environment Variables
// ============================================================================

#[test]
#[serial]
fn test_env_var_runtime_flags() {
    let _guards = clear_flatlint_env_vars();
    let _node = EnvGuard::new(env_vars::NODE, "yes");
    let _browser = EnvGuard::new(env_vars::BROWSER, "0");
    let _ecma = EnvGuard::new(env_vars::ECMA_VERSION, "2020");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_working_dir("/repo")
        .build()
        .unwrap();

    let environment = config.environment.unwrap();
    assert_eq!(environment.node, Some(true));
    assert_eq!(environment.browser, Some(false));
    assert_eq!(environment.deno, None);
    assert_eq!(environment.ecma_version, Some(EcmaVersion::Version(2020)));
}

#[test]
#[serial]
fn test_env_var_tsconfig_and_root_dir() {
    let _guards = clear_flatlint_env_vars();
    let _tsconfig = EnvGuard::new(env_vars::TSCONFIG, "tsconfig.json,tsconfig.test.json");
    let _root = EnvGuard::new(env_vars::ROOT_DIR, "/srv/app");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_working_dir("/repo")
        .build()
        .unwrap();

    assert_eq!(config.root_dir, Some(PathBuf::from("/srv/app")));
    assert_eq!(
        config.tsconfig,
        Some(TsconfigSetting::Paths(vec![
            PathBuf::from("tsconfig.json"),
            PathBuf::from("tsconfig.test.json"),
        ]))
    );
}

#[test]
#[serial]
fn test_env_var_inferrable_types() {
    let _guards = clear_flatlint_env_vars();
    let _tag = EnvGuard::new(env_vars::INFERRABLE_TYPES, "ts-never");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_working_dir("/repo")
        .build()
        .unwrap();

    let tag = config.options.unwrap().inferrable_types.unwrap().tag();
    assert_eq!(tag, InferrableTypesTag::TsNever);
}

#[test]
#[serial]
fn test_env_var_invalid_values() {
    let _guards = clear_flatlint_env_vars();

    for (key, value) in [
        (env_vars::STRICT, "maybe"),
        (env_vars::INDENT, "tabs"),
        (env_vars::INFERRABLE_TYPES, "sometimes"),
        (env_vars::ECMA_VERSION, "next"),
        (env_vars::CUSTOM_GLOBALS, "A:sometimes"),
    ] {
        let _env = EnvGuard::new(key, value);
        let result = ConfigBuilder::new()
            .skip_files()
            .with_working_dir("/repo")
            .build();
        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, key),
            other => panic!("{key}={value}: expected validation error, got {other:?}"),
        }
    }
}

#[test]
#[serial]
fn test_env_var_empty_tsconfig_list_rejected() {
    let _guards = clear_flatlint_env_vars();
    let _tsconfig = EnvGuard::new(env_vars::TSCONFIG, ",");

    let err = ConfigBuilder::new()
        .skip_files()
        .with_working_dir("/repo")
        .build()
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
#[serial]
fn test_skip_env_ignores_variables() {
    let _guards = clear_flatlint_env_vars();
    let _strict = EnvGuard::new(env_vars::STRICT, "true");

    let config = ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_working_dir("/repo")
        .build()
        .unwrap();
    assert_eq!(config.strict, None);
}

// ============================================================================
// Fixtures and Validation
// ============================================================================

#[test]
fn test_full_fixture_loads() {
    let config = ConfigLoader::load_file(&fixture("full.yaml")).unwrap();
    ConfigValidator::validate(&config).unwrap();

    assert_eq!(config.strict, Some(true));
    assert!(matches!(config.tsconfig, Some(TsconfigSetting::Paths(ref p)) if p.len() == 2));
    let environment = config.environment.unwrap();
    assert_eq!(environment.ecma_version, Some(EcmaVersion::Version(2022)));
    assert_eq!(environment.custom_globals.unwrap().len(), 2);

    let inferrable = config.options.unwrap().inferrable_types.unwrap();
    assert_eq!(inferrable.tag(), InferrableTypesTag::TsNever);
    assert_eq!(inferrable.flags().return_values, Some(true));
    assert_eq!(inferrable.flags().parameters, None);
}

#[test]
fn test_alias_fixture_loads() {
    let config = ConfigLoader::load_file(&fixture("aliases.yaml")).unwrap();
    assert_eq!(
        config.tsconfig,
        Some(TsconfigSetting::Path(PathBuf::from("tsconfig.app.json")))
    );
    assert_eq!(config.strict, Some(false));
    assert_eq!(config.root_dir, Some(PathBuf::from("/srv/app")));
    assert_eq!(
        config.options.unwrap().inferrable_types.unwrap().tag(),
        InferrableTypesTag::Always
    );
}

#[test]
fn test_bad_tag_fixture_rejected_with_file_name() {
    let err = ConfigLoader::load_file(&fixture("bad_tag.yaml")).unwrap_err();
    let message = err.to_string();
    assert!(err.is_validation());
    assert!(message.contains("bad_tag.yaml"));
    assert!(message.contains("sometimes"));
}

#[test]
fn test_empty_tsconfig_fixture_rejected_by_validator() {
    let config = ConfigLoader::load_file(&fixture("empty_tsconfig.yaml")).unwrap();
    match ConfigValidator::validate(&config) {
        Err(Error::Validation { field, .. }) => assert_eq!(field, "tsconfig"),
        other => panic!("expected validation error, got {other:?}"),
    }
}
