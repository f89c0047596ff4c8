use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["srcDir"], "./src");
    assert_eq!(parsed["configDir"], "./locales");
    assert_eq!(parsed["defaultLocale"], Value::Null);
    assert_eq!(parsed["markers"]["scalar"], "__");
    assert_eq!(parsed["markers"]["plural"], "__p");

    assert!(
        content.contains("\n  \"srcDir\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Created .tagi18nrc.json\n");
    assert!(test.root().join(".tagi18nrc.json").exists());
    assert_config_content(&test.read_file(".tagi18nrc.json")?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tagi18nrc.json", "{}")?;

    let (code, _, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, 1);
    assert!(stderr.contains(".tagi18nrc.json already exists"));
    assert_eq!(test.read_file(".tagi18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    let mut init = test.command();
    init.arg("init");
    init.output()?;

    test.write_file("src/app.tsx", "export const App = () => <p>{__`Test`}</p>;\n")?;
    test.write_file("locales/pt.json", r#"{"Test": "Teste", "": ""}"#)?;

    let (code, stdout, stderr) = run(test.check_command())?;
    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);

    Ok(())
}
