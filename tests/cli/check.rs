use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{BASKET_SOURCE, CliTest, run};

const PT_COMPLETE: &str = r##"{
  "Hello World": "Olá Mundo",
  "# apples": {
    "zero": "nenhuma maçã",
    "one": "uma maçã",
    "+2": "# maçãs"
  },
  "": ""
}
"##;

const EN_COMPLETE: &str = r##"{
  "# apples": {
    "zero": "no apples",
    "one": "one apple",
    "+2": "# apples"
  },
  "": ""
}
"##;

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/pt.json", PT_COMPLETE)?;
    test.write_file("locales/en.json", EN_COMPLETE)?;

    let mut cmd = test.check_command();
    cmd.args(["--default", "en"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "✓ Checked 1 source file, 2 catalogs - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_check_reports_drift_per_catalog() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/pt.json", "{}")?;
    test.write_file("locales/en.json", "{}")?;

    let mut cmd = test.check_command();
    cmd.args(["--default", "en"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 1);
    assert!(stdout.contains("pt invalid translations: missing 2"));
    assert!(stdout.contains("en invalid translations: missing 1"));
    assert!(stdout.contains("= note: missing: \"# apples\", \"Hello World\""));
    assert!(stdout.contains("--> ./locales/pt.json"));
    assert!(stdout.ends_with("✘ 2 errors\n"));

    // Report mode never writes.
    assert_eq!(test.read_file("locales/pt.json")?, "{}");
    Ok(())
}

#[test]
fn test_check_without_default_locale_requires_every_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/en.json", EN_COMPLETE)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("en invalid translations: missing 1"));
    assert!(stdout.contains("missing: \"Hello World\""));
    Ok(())
}

#[test]
fn test_check_default_locale_null_is_extra() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello World`;\n")?;
    test.write_file("locales/en.json", r#"{"Hello World": null}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--default", "en"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 1);
    assert!(stdout.contains("en invalid translations: extra 1"));
    assert!(!stdout.contains("missing"));
    Ok(())
}

#[test]
fn test_check_reports_extra_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello World`;\n")?;
    test.write_file(
        "locales/pt.json",
        r#"{"Hello World": "Olá Mundo", "Goodbye": "Tchau", "": ""}"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("pt invalid translations: extra 1"));
    assert!(stdout.contains("extra: \"Goodbye\""));
    Ok(())
}

#[test]
fn test_check_invalid_plural_entry() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/apples.ts", "export const a = (n: number) => __p(n)`# apples`;\n")?;
    test.write_file("locales/pt.json", r##"{"# apples": "maçãs"}"##)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("pt invalid plural translation: \"# apples\""));
    assert!(stdout.contains("invalid-plural"));
    Ok(())
}

#[test]
fn test_check_kind_mismatch() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;
    test.write_file("locales/pt.json", r#"{"Hello": {"one": "Olá"}}"#)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("pt invalid scalar translation: \"Hello\""));
    assert!(stdout.contains("kind-mismatch"));
    Ok(())
}

#[test]
fn test_check_ambiguous_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/both.ts",
        "export const a = __`# items`;\nexport const b = __p(2)`# items`;\n",
    )?;
    test.write_file(
        "locales/pt.json",
        r##"{"# items": {"+2": "# itens"}, "": ""}"##,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("\"# items\" is used both as scalar and plural"));
    assert!(stdout.contains("ambiguous-key"));
    Ok(())
}

#[test]
fn test_check_source_parse_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/ok.ts", "export const hello = __`Hello`;\n")?;
    test.write_file("src/broken.ts", "const = __`Broken`;\n")?;
    test.write_file("locales/pt.json", r#"{"Hello": "Olá", "": ""}"#)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("broken.ts"));
    Ok(())
}

#[test]
fn test_check_broken_catalog_does_not_stop_others() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;
    test.write_file("locales/es.json", "{ broken")?;
    test.write_file("locales/pt.json", "{}")?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("--> ./locales/es.json"));
    assert!(stdout.contains("pt invalid translations: missing 1"));
    Ok(())
}

#[test]
fn test_check_no_usages_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/plain.ts", "export const x = `hello`;\n")?;
    test.write_file("locales/pt.json", "{}")?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("no translations found in dir: ./src"));
    Ok(())
}

#[test]
fn test_check_missing_catalog_dir_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Catalog directory not found"));
    Ok(())
}

#[test]
fn test_check_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tagi18nrc.json",
        r#"{
            "srcDir": "./app",
            "configDir": "./i18n",
            "defaultLocale": "en",
            "extensions": ["tsx"]
        }"#,
    )?;
    test.write_file("app/page.tsx", "export const Page = () => <h1>{__`Welcome`}</h1>;\n")?;
    test.write_file("app/ignored.ts", "export const x = __`Not scanned`;\n")?;
    test.write_file("i18n/en.json", r#"{"": ""}"#)?;
    test.write_file("i18n/pt.json", r#"{"Welcome": "Bem-vindo", "": ""}"#)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0, "stdout: {}", stdout);
    assert!(stdout.contains("Checked 1 source file, 2 catalogs"));
    Ok(())
}

#[test]
fn test_check_cli_overrides_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tagi18nrc.json", r#"{ "srcDir": "./missing" }"#)?;
    test.write_file("lib/hello.ts", "export const hello = __`Hello`;\n")?;
    test.write_file("locales/pt.json", r#"{"Hello": "Olá", "": ""}"#)?;

    let mut cmd = test.check_command();
    cmd.args(["--src-dir", "lib"]);
    let (code, _, _) = run(cmd)?;

    assert_eq!(code, 0);
    Ok(())
}

#[test]
fn test_check_skips_node_modules() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;
    test.write_file(
        "src/node_modules/pkg/index.ts",
        "export const other = __`From a dependency`;\n",
    )?;
    test.write_file("locales/pt.json", r#"{"Hello": "Olá", "": ""}"#)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0, "stdout: {}", stdout);
    Ok(())
}

#[test]
fn test_check_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tagi18nrc.json", r#"{ "ignores": ["**/[invalid"] }"#)?;

    let (code, _, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("ignores"));
    Ok(())
}
