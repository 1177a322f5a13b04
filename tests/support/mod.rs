//! Test support utilities for warren integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use serde_json::Value;
use tempfile::TempDir;

/// Test environment with an isolated temp project directory.
///
/// No process-global state is mutated; child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with a warren.json already in place.
    pub fn with_config(config: &Value) -> Self {
        let t = Self::new();
        t.write_config(config);
        t
    }

    /// Write (or replace) the project config.
    pub fn write_config(&self, config: &Value) {
        let contents = serde_json::to_string_pretty(config).unwrap();
        std::fs::write(self.dir.path().join("warren.json"), contents)
            .expect("failed to write warren.json");
    }

    /// Read one of the generated JSON files.
    pub fn read_json(&self, name: &str) -> Value {
        let contents = std::fs::read_to_string(self.dir.path().join(name))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", name, e));
        serde_json::from_str(&contents).unwrap_or_else(|e| panic!("{} is not JSON: {}", name, e))
    }

    /// Whether a file exists in the project directory.
    pub fn has_file(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}
