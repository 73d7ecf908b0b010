//! Integration tests for memodisk

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use memodisk::{args, derive_key, store, CacheKey, FnIdentity};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const ADD_SOURCE: &str = "fn add(a: i64, b: i64) -> i64 {\n    a + b\n}\n";

    /// Command isolated from the user's config and environment
    fn memodisk(home: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("memodisk");
        cmd.env("MEMODISK_CONFIG", home.path().join("config.toml"))
            .env_remove("MEMODISK_CACHE_DIR")
            .env_remove("MEMODISK_LOG_LEVEL");
        cmd
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("persistent function-result cache"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("memodisk"));
    }

    #[test]
    fn key_matches_library() {
        let home = TempDir::new().unwrap();
        let source = home.path().join("add.rs");
        fs::write(&source, ADD_SOURCE).unwrap();

        let expected = derive_key(&FnIdentity::new("demo::add", ADD_SOURCE), &args!(1, 2)).unwrap();

        memodisk(&home)
            .args(["key", "--name", "demo::add", "--source"])
            .arg(&source)
            .args(["1", "2"])
            .assert()
            .success()
            .stdout(format!("{}\n", expected));
    }

    #[test]
    fn key_with_keyword_arguments() {
        let home = TempDir::new().unwrap();
        let source = home.path().join("add.rs");
        fs::write(&source, ADD_SOURCE).unwrap();

        let expected = derive_key(
            &FnIdentity::new("demo::add", ADD_SOURCE),
            &args!(1; b = 2, a = "x"),
        )
        .unwrap();

        memodisk(&home)
            .args(["key", "--name", "demo::add", "--source"])
            .arg(&source)
            .args(["--kw", "b=2", "--kw", "a=x", "1"])
            .assert()
            .success()
            .stdout(format!("{}\n", expected));
    }

    #[test]
    fn key_missing_source_fails() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .args(["key", "--name", "demo::add", "--source"])
            .arg(home.path().join("missing.rs"))
            .arg("1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Source text unavailable"));
    }

    #[test]
    fn list_empty_folder() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();
        memodisk(&home)
            .args(["list", "--folder"])
            .arg(folder.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries found"));
    }

    #[test]
    fn list_shows_entries() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();
        let key = derive_key(&FnIdentity::new("demo::add", ADD_SOURCE), &args!(1, 2)).unwrap();
        store(folder.path(), &key, &3i64).unwrap();

        memodisk(&home)
            .args(["list", "--format", "plain", "--folder"])
            .arg(folder.path())
            .assert()
            .success()
            .stdout(format!("{}\n", key));
    }

    #[test]
    fn list_without_folder_fails() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cache folder not set"));
    }

    #[test]
    fn list_uses_environment_folder() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();
        memodisk(&home)
            .env("MEMODISK_CACHE_DIR", folder.path())
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries found"));
    }

    #[test]
    fn inspect_reports_presence() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();
        let key = CacheKey::parse(&"ab".repeat(32)).unwrap();

        memodisk(&home)
            .args(["inspect", key.as_str(), "--folder"])
            .arg(folder.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("present: no"));

        store(folder.path(), &key, &"value".to_string()).unwrap();

        memodisk(&home)
            .args(["inspect", key.as_str(), "--folder"])
            .arg(folder.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("present: yes"));
    }

    #[test]
    fn inspect_invalid_key() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .args(["inspect", "not-a-key", "--folder", "."])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid cache key"));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"));
    }

    #[test]
    fn config_set_then_list() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();

        memodisk(&home)
            .args(["config", "set", "cache.folder"])
            .arg(folder.path())
            .assert()
            .success();

        memodisk(&home)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache entries found"));
    }

    #[test]
    fn config_set_unknown_key() {
        let home = TempDir::new().unwrap();
        memodisk(&home)
            .args(["config", "set", "cache.size", "10"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn config_init_force_repairs_broken_file() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("config.toml");
        fs::write(&path, "[cache\n").unwrap();

        memodisk(&home)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));

        memodisk(&home)
            .args(["config", "init", "--force"])
            .assert()
            .success();

        memodisk(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("extension = \"bin\""));
    }

    #[test]
    fn config_path_with_broken_file() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("config.toml"), "[cache\n").unwrap();

        memodisk(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn dotted_extension_in_config_is_rejected() {
        let home = TempDir::new().unwrap();
        let folder = TempDir::new().unwrap();
        fs::write(
            home.path().join("config.toml"),
            "[cache]\nextension = \"tar.gz\"\n",
        )
        .unwrap();

        memodisk(&home)
            .args(["list", "--folder"])
            .arg(folder.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
