//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a warren command running inside the test project directory.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("warren").expect("failed to find warren binary");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `warren generate`.
    pub fn generate(&self) -> Output {
        self.cmd()
            .arg("generate")
            .output()
            .expect("failed to run warren generate")
    }

    /// Shortcut for `warren sync`.
    pub fn sync(&self) -> Output {
        self.cmd()
            .arg("sync")
            .output()
            .expect("failed to run warren sync")
    }

    /// Shortcut for `warren remove <service>`.
    pub fn remove(&self, service: &str) -> Output {
        self.cmd()
            .args(["remove", service])
            .output()
            .expect("failed to run warren remove")
    }

    /// Shortcut for `warren map --json`.
    pub fn map_json(&self) -> Output {
        self.cmd()
            .args(["map", "--json"])
            .output()
            .expect("failed to run warren map")
    }
}
