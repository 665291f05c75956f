use std::fs::{File, create_dir_all, write};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{Builder, TempDir};

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> TempDir {
        let temp_dir = Builder::new()
            .prefix("json2js")
            .tempdir()
            .expect("Failed to create temp directory");
        let lang = temp_dir.path().join("lang");
        create_dir_all(&lang).expect("Failed to create lang directory");
        File::create(lang.join("en.json")).expect("Failed to create en.json");
        File::create(lang.join("fr.json")).expect("Failed to create fr.json");
        temp_dir
    }

    fn json2js(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("json2js").expect("Binary should be built");
        cmd.current_dir(dir);
        cmd
    }

    #[test]
    fn test_prints_pairs() {
        let temp_dir = project();

        json2js(temp_dir.path())
            .arg("lang/*.json")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("lang/en.json -> lang/en.js")
                    .and(predicate::str::contains("lang/fr.json -> lang/fr.js")),
            );
    }

    #[test]
    fn test_output_directory_is_created() {
        let temp_dir = project();

        json2js(temp_dir.path())
            .args(["lang/*.json", "--directory", "dist/lang"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lang/en.json -> dist/lang/en.js"));

        assert!(temp_dir.path().join("dist/lang").is_dir());
    }

    #[test]
    fn test_no_matches_succeeds_quietly() {
        let temp_dir = project();

        json2js(temp_dir.path())
            .arg("nothing/*.json")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_reads_default_config() {
        let temp_dir = project();
        write(
            temp_dir.path().join("json2js.yaml"),
            "patterns:\n  - lang/*.json\n  - \"!lang/fr.json\"\ndirectory: out\n",
        )
        .expect("Failed to write config");

        json2js(temp_dir.path())
            .assert()
            .success()
            .stdout(
                predicate::str::contains("lang/en.json -> out/en.js")
                    .and(predicate::str::contains("fr.json").not()),
            );
    }

    #[test]
    fn test_command_line_overrides_config() {
        let temp_dir = project();
        write(
            temp_dir.path().join("settings.yaml"),
            "patterns: lang/en.json\ndirectory: out\n",
        )
        .expect("Failed to write config");

        json2js(temp_dir.path())
            .args(["-c", "settings.yaml", "lang/fr.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lang/fr.json -> out/fr.js"))
            .stdout(predicate::str::contains("en.json").not());
    }

    #[test]
    fn test_missing_config_fails() {
        let temp_dir = project();

        json2js(temp_dir.path())
            .args(["--config", "absent.yaml"])
            .assert()
            .failure();
    }
}
