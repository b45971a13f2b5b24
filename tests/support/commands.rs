//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an e3db-cli command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME and E3DB_CONFIG_DIR inside the temporary home directory
    /// - colors disabled
    /// - no inherited profile or log filter
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("e3db-cli").expect("failed to find e3db-cli binary");
        cmd.env("HOME", self.home.path());
        cmd.env("E3DB_CONFIG_DIR", self.config_dir());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("E3DB_PROFILE");
        cmd.env_remove("E3DB_LOG");
        cmd
    }

    /// Command acting as `profile` (empty for the default profile).
    pub fn as_profile(&self, profile: &str) -> Command {
        let mut cmd = self.cmd();
        if !profile.is_empty() {
            cmd.args(["-p", profile]);
        }
        cmd
    }

    /// Shortcut for `e3db-cli register --public`.
    pub fn register(&self, profile: &str, email: &str) -> Output {
        self.as_profile(profile)
            .args(["register", "--public", email])
            .output()
            .expect("failed to run e3db-cli register")
    }

    /// Client ID of `profile`, as printed by `info`.
    pub fn client_id(&self, profile: &str) -> String {
        let output = self
            .as_profile(profile)
            .arg("info")
            .output()
            .expect("failed to run e3db-cli info");
        super::assert_success(&output);
        super::field(&output, "Client ID")
    }

    /// Shortcut for `e3db-cli write`, returning the new record ID.
    pub fn write(&self, profile: &str, record_type: &str, data: &str) -> String {
        let output = self
            .as_profile(profile)
            .args(["write", record_type, data])
            .output()
            .expect("failed to run e3db-cli write");
        super::assert_success(&output);
        super::stdout(&output).trim().to_string()
    }

    /// Shortcut for `e3db-cli read`.
    pub fn read(&self, profile: &str, record_ids: &[&str]) -> Output {
        self.as_profile(profile)
            .arg("read")
            .args(record_ids)
            .output()
            .expect("failed to run e3db-cli read")
    }

    /// Shortcut for `e3db-cli ls` with extra arguments.
    pub fn ls(&self, profile: &str, args: &[&str]) -> Output {
        self.as_profile(profile)
            .arg("ls")
            .args(args)
            .output()
            .expect("failed to run e3db-cli ls")
    }

    /// Shortcut for `e3db-cli share`.
    pub fn share(&self, profile: &str, record_type: &str, client: &str) -> Output {
        self.as_profile(profile)
            .args(["share", record_type, client])
            .output()
            .expect("failed to run e3db-cli share")
    }

    /// Shortcut for `e3db-cli unshare`.
    pub fn unshare(&self, profile: &str, record_type: &str, client: &str) -> Output {
        self.as_profile(profile)
            .args(["unshare", record_type, client])
            .output()
            .expect("failed to run e3db-cli unshare")
    }
}
