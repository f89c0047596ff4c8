use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{BASKET_SOURCE, CliTest, run};

const PT_AFTER_FIX: &str = r##"{
  "👇 missing translations 👇": "🛑 delete this line 🛑",
  "# apples": {
    "zero": "🛑 zero 🛑",
    "one": "🛑 one 🛑",
    "+2": "🛑 # items 🛑",
    "many": "🛑 many 🛑",
    "manyLimit": 50
  },
  "Hello World": null,
  "": ""
}
"##;

#[test]
fn test_fix_adds_missing_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/pt.json", "{}")?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ pt.json: keys were added\n"));
    assert_eq!(test.read_file("locales/pt.json")?, PT_AFTER_FIX);
    Ok(())
}

#[test]
fn test_fix_second_run_reports_pending_translations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/pt.json", "{}")?;

    run(test.fix_command())?;
    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 1);
    assert!(stdout.starts_with("✘ pt.json: has missing translations\n"));
    assert!(stdout.contains("pending-translations"));
    assert_eq!(test.read_file("locales/pt.json")?, PT_AFTER_FIX);
    Ok(())
}

#[test]
fn test_fix_after_translating_is_up_to_date() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/pt.json", "{}")?;

    run(test.fix_command())?;

    // Translator fills in the entries and deletes the marker line.
    let translated = r##"{
  "# apples": {
    "zero": "nenhuma maçã",
    "one": "uma maçã",
    "+2": "# maçãs",
    "many": "muitas maçãs",
    "manyLimit": 50
  },
  "Hello World": "Olá Mundo",
  "": ""
}
"##;
    test.write_file("locales/pt.json", translated)?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ pt.json: up to date\n"));
    assert!(stdout.contains("no issues found"));
    assert_eq!(test.read_file("locales/pt.json")?, translated);
    Ok(())
}

#[test]
fn test_fix_removes_extra_keys_and_keeps_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/hello.ts",
        "export const a = __`Hello`;\nexport const b = __`Bye`;\n",
    )?;
    test.write_file(
        "locales/pt.json",
        r#"{"Bye": "Tchau", "Old": "Velho", "Hello": "Olá", "": ""}"#,
    )?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ pt.json: translations fixed\n"));
    assert_eq!(
        test.read_file("locales/pt.json")?,
        "{\n  \"Bye\": \"Tchau\",\n  \"Hello\": \"Olá\",\n  \"\": \"\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_fix_default_locale_only_gets_plural_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/basket.ts", BASKET_SOURCE)?;
    test.write_file("locales/en.json", r#"{"Hello World": null}"#)?;

    let mut cmd = test.fix_command();
    cmd.args(["--default", "en"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(stdout.starts_with("✓ en.json: keys were added\n"));

    let content = test.read_file("locales/en.json")?;
    assert!(content.contains("\"# apples\": {"));
    assert!(!content.contains("Hello World"));
    Ok(())
}

#[test]
fn test_fix_regenerates_invalid_plural_but_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/apples.ts", "export const a = (n: number) => __p(n)`# apples`;\n")?;
    test.write_file("locales/pt.json", r##"{"# apples": "maçãs", "": ""}"##)?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("pt invalid plural translation: \"# apples\""));

    let content = test.read_file("locales/pt.json")?;
    assert!(content.contains("\"+2\": \"🛑 # items 🛑\""));
    assert!(!content.contains("maçãs"));
    Ok(())
}

#[test]
fn test_fix_leaves_kind_mismatch_untouched() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;
    let original = "{\n  \"Hello\": {\n    \"one\": \"Olá\"\n  },\n  \"\": \"\"\n}\n";
    test.write_file("locales/pt.json", original)?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("kind-mismatch"));
    assert_eq!(test.read_file("locales/pt.json")?, original);
    Ok(())
}

#[test]
fn test_fix_handles_every_catalog() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/hello.ts", "export const hello = __`Hello`;\n")?;
    test.write_file("locales/es.json", "{}")?;
    test.write_file("locales/nested/pt.json", "{}")?;

    let (code, stdout, _) = run(test.fix_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("✓ es.json: keys were added\n"));
    assert!(stdout.contains("✓ pt.json: keys were added\n"));
    assert!(test.read_file("locales/nested/pt.json")?.contains("\"Hello\": null"));
    Ok(())
}

#[test]
fn test_fix_keeps_catalogs_when_a_source_file_fails_to_parse() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/ok.ts", "export const hello = __`Hello World`;\n")?;
    test.write_file(
        "src/broken.ts",
        "export const bye = __`Goodbye`;\nconst = ;\n",
    )?;
    let original = r#"{"Hello World": "Olá Mundo", "Goodbye": "Adeus", "": ""}"#;
    test.write_file("locales/pt.json", original)?;

    let (code, stdout, stderr) = run(test.fix_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"));
    assert!(!stdout.contains("translations fixed"));
    assert!(stderr.contains("catalogs were not fixed"));
    assert_eq!(test.read_file("locales/pt.json")?, original);
    Ok(())
}
