//! Common test utilities for rstapi integration tests

// Not every test file uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use rstapi_cli::test_utils::InputFixture;

/// Isolated working directory for running the `rstapi` binary.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        rstapi_cli::test_utils::init_test_logging(None);
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Environment with the sample package written as `api.json`.
    pub fn with_sample_input() -> Result<Self> {
        let env = Self::new()?;
        InputFixture::sample_json().write_to(env.path())?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// `rstapi` command running inside the environment.
    pub fn rstapi_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("rstapi").expect("rstapi binary is built");
        cmd.current_dir(self.path()).env_remove("RSTAPI_CONFIG").env_remove("RUST_LOG");
        cmd
    }
}
