//! Integration tests for the portal binary

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Isolated state and config; the backend points at a closed port
    struct Env {
        dir: TempDir,
    }

    impl Env {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(
                dir.path().join("config.toml"),
                "[general]\naudit_log = true\n\n[api]\nbase_url = \"http://127.0.0.1:9/api\"\ntimeout_secs = 2\n",
            )
            .unwrap();
            Self { dir }
        }

        fn state(&self) -> &Path {
            self.dir.path()
        }

        fn portal(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("portal");
            cmd.env("PORTAL_STATE_DIR", self.state())
                .env("PORTAL_CONFIG", self.state().join("config.toml"))
                .env("PORTAL_PLAIN", "1");
            cmd
        }

        fn storage(&self) -> serde_json::Value {
            let raw = fs::read_to_string(self.state().join("storage.json")).unwrap();
            serde_json::from_str(&raw).unwrap()
        }
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("portal")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("session shell"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("portal")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("portal"));
    }

    #[test]
    fn date_formats_iso() {
        cargo_bin_cmd!("portal")
            .args(["date", "2024-03-05T10:20:30"])
            .assert()
            .success()
            .stdout("05.03.2024\n");
    }

    #[test]
    fn options_json() {
        cargo_bin_cmd!("portal")
            .args(["options", "credit-range", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"label\": \"Indefinite\""))
            .stdout(predicate::str::contains("\"key\": 4"));
    }

    #[test]
    fn file_round_trip() {
        let env = Env::new();
        let input = env.state().join("in.txt");
        let output = env.state().join("out/copy.txt");
        fs::write(&input, "hello portal").unwrap();

        let encoded = env
            .portal()
            .args(["file", "encode", "--mime", "text/plain"])
            .arg(&input)
            .output()
            .unwrap();
        assert!(encoded.status.success());
        let data_url = String::from_utf8(encoded.stdout).unwrap();
        assert!(data_url.starts_with("data:text/plain;base64,"));

        env.portal()
            .args(["file", "decode", "--out"])
            .arg(&output)
            .arg(data_url.trim())
            .assert()
            .success();
        assert_eq!(fs::read_to_string(&output).unwrap(), "hello portal");
    }

    #[test]
    fn status_when_logged_out() {
        let env = Env::new();
        env.portal()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn translate_without_dictionary_is_identity() {
        let env = Env::new();
        env.portal()
            .args(["translate", "Orders"])
            .assert()
            .success()
            .stdout("Orders\n");
    }

    #[test]
    fn translate_uses_stored_dictionary() {
        let env = Env::new();
        let dict = r#"[{"expression":"Orders","equalResponse":"Siparişler"}]"#;
        fs::write(
            env.state().join("storage.json"),
            serde_json::json!({ "dict": dict }).to_string(),
        )
        .unwrap();

        env.portal()
            .args(["translate", "Orders"])
            .assert()
            .success()
            .stdout("Siparişler\n");
    }

    #[test]
    fn dealer_login_grants_everything() {
        let env = Env::new();
        env.portal()
            .args(["login", "--token", "t-1", "--user"])
            .arg(r#"{"UserId":7,"AuthType":"Dealer","PlantId":3}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in"));

        let storage = env.storage();
        assert_eq!(storage["token"], "t-1");

        env.portal()
            .args(["can", "Anything", "write"])
            .assert()
            .success()
            .stdout("allowed\n");

        env.portal()
            .args(["status", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"logged_in\": true"));
    }

    #[test]
    fn officer_keeps_login_units_when_backend_down() {
        let env = Env::new();
        let user = r#"{"UserId":9,"AuthType":"FactoryOfficer",
            "authUnits":[{"section":"Orders","canRead":true,"canWrite":false,"canDelete":false}]}"#;
        env.portal()
            .args(["login", "--token", "t-2", "--user", user])
            .assert()
            .success();

        env.portal()
            .args(["can", "Orders", "read"])
            .assert()
            .success();
        env.portal()
            .args(["can", "Orders", "write"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("denied"));
    }

    #[test]
    fn can_rejects_unknown_action() {
        let env = Env::new();
        env.portal()
            .args(["can", "Orders", "fly"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown action 'fly'"));
    }

    #[test]
    fn logout_clears_state_and_audits() {
        let env = Env::new();
        env.portal()
            .args(["login", "--token", "t-3", "--user", r#"{"AuthType":"Dealer"}"#])
            .assert()
            .success();

        env.portal()
            .args(["logout", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Reload required"));

        let storage = env.storage();
        assert!(storage.get("token").is_none());
        assert!(storage.get("user").is_none());

        let audit = fs::read_to_string(env.state().join("audit.log")).unwrap();
        assert!(audit.contains("session.logged_in"));
        assert!(audit.contains("session.logged_out"));
    }

    #[test]
    fn logout_recovers_from_corrupt_user() {
        let env = Env::new();
        fs::write(
            env.state().join("storage.json"),
            r#"{"token":"abc","user":"{not json","locale":"tr"}"#,
        )
        .unwrap();

        env.portal()
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("portal logout --yes"));

        env.portal()
            .args(["logout", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged out"));

        let storage = env.storage();
        assert!(storage.get("token").is_none());
        assert!(storage.get("user").is_none());
        assert_eq!(storage["locale"], "tr");

        env.portal()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn check_without_token_fails() {
        let env = Env::new();
        env.portal()
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn panel_open_and_close() {
        let env = Env::new();
        env.portal()
            .args(["panel", "open", "search"])
            .assert()
            .success();
        env.portal()
            .args(["panel", "show"])
            .assert()
            .success()
            .stdout("search\n");
        env.portal()
            .args(["panel", "close"])
            .assert()
            .success();
        env.portal()
            .args(["panel"])
            .assert()
            .success()
            .stdout("none\n");
    }

    #[test]
    fn panel_rejects_unknown_id() {
        let env = Env::new();
        env.portal()
            .args(["panel", "open", "settings"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown panel"));
    }

    #[test]
    fn config_path_honours_env() {
        let env = Env::new();
        env.portal()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_set_then_show() {
        let env = Env::new();
        env.portal()
            .args(["config", "set", "locale.fallback", "en"])
            .assert()
            .success();
        env.portal()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("fallback = \"en\""));
    }
}
