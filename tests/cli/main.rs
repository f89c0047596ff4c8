use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod fix;
mod init;

const BIN_NAME: &str = "tagi18n";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the upward config search at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn fix_command(&self) -> Command {
        let mut cmd = self.check_command();
        cmd.arg("--fix");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run a command and return (exit code, stdout, stderr).
pub fn run(mut cmd: Command) -> Result<(i32, String, String)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output()?;
    Ok((
        status.code().unwrap_or(-1),
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
    ))
}

/// The source file used by most tests: one scalar and one plural usage.
pub const BASKET_SOURCE: &str = r#"import { __, __p } from './i18n';

export function basket(count: number) {
    return [__`Hello World`, __p(count)`# apples`];
}
"#;
