mod common;

use anyhow::Result;
use budgety::cli::{Flow, OutputFormat, Session};
use budgety::domain::Category;
use common::{run_script, run_script_as};
use serde_json::Value;

#[test]
fn test_add_renders_entry_and_summary() -> Result<()> {
    let output = run_script("add inc 1000 Salary\nadd exp 250 Weekly groceries\n")?;

    assert!(output.contains("Added income: Salary"));
    assert!(output.contains("Added expense: Weekly groceries"));
    assert!(output.contains("inc-0"));
    assert!(output.contains("exp-0"));
    assert!(output.contains("Budget +750.00 | Income 1,000.00 | Expenses 250.00 (25%)"));

    Ok(())
}

#[test]
fn test_add_re_renders_whole_category() -> Result<()> {
    let output = run_script("add exp 300 Rent\nadd exp 100 Food\n")?;

    // The second add shows both expenses with refreshed shares.
    let after_second = output
        .split("Added expense: Food")
        .nth(1)
        .expect("second add should be rendered");
    let rent = after_second
        .lines()
        .find(|l| l.contains("Rent"))
        .expect("rent should be re-rendered");
    let food = after_second
        .lines()
        .find(|l| l.contains("Food"))
        .expect("food should be rendered");
    assert!(rent.ends_with("75%"));
    assert!(food.ends_with("25%"));

    Ok(())
}

#[test]
fn test_invalid_add_is_not_performed() -> Result<()> {
    let mut session = Session::new(Vec::new(), OutputFormat::Table);
    let script = "add inc abc Salary\nadd inc 0 Nothing\nadd inc 10\nadd savings 10 Piggy\n";
    session.run(script.as_bytes(), false)?;

    assert!(session.service().items(Category::Income).is_empty());
    let output = String::from_utf8(session.into_output())?;
    assert!(output.contains("error: Invalid amount: 'abc'"));
    assert!(output.contains("error: Invalid amount: Amount must be positive"));
    assert!(output.contains("error: Description must not be empty"));
    assert!(output.contains("error: Unknown category: savings"));

    Ok(())
}

#[test]
fn test_delete_and_missing_delete() -> Result<()> {
    let output = run_script(
        "add exp 300 Rent\n\
         add exp 100 Food\n\
         del exp 0\n\
         rm exp 0\n",
    )?;

    assert!(output.contains("Deleted exp-0: Rent"));
    assert!(output.contains("No expense entry with id 0"));
    assert!(output.contains("Budget -100.00 | Income 0.00 | Expenses 100.00 (0%)"));

    Ok(())
}

#[test]
fn test_list_and_summary() -> Result<()> {
    let output = run_script(
        "# a comment\n\
         \n\
         add inc 4000 Salary\n\
         add exp 1000 Rent\n\
         list\n\
         list exp\n\
         budget\n",
    )?;

    assert!(output.contains("INCOME (1 entries)"));
    assert!(output.contains("EXPENSE (1 entries)"));
    assert_eq!(output.matches("EXPENSE (1 entries)").count(), 2);
    assert!(
        output
            .lines()
            .last()
            .is_some_and(|l| l == "Budget +3,000.00 | Income 4,000.00 | Expenses 1,000.00 (25%)")
    );

    Ok(())
}

#[test]
fn test_list_empty_session() -> Result<()> {
    let output = run_script("list inc\n")?;
    assert!(output.contains("INCOME (0 entries)"));
    assert!(output.contains("No entries."));
    Ok(())
}

#[test]
fn test_quit_stops_reading() -> Result<()> {
    let mut session = Session::new(Vec::new(), OutputFormat::Table);
    session.run("add inc 10 Gift\nquit\nadd inc 20 Ignored\n".as_bytes(), false)?;

    assert_eq!(session.service().items(Category::Income).len(), 1);
    Ok(())
}

#[test]
fn test_execute_reports_flow() -> Result<()> {
    let mut session = Session::new(Vec::new(), OutputFormat::Table);
    assert_eq!(session.execute("summary")?, Flow::Continue);
    assert_eq!(session.execute("exit")?, Flow::Quit);
    Ok(())
}

#[test]
fn test_unknown_command_keeps_session_alive() -> Result<()> {
    let output = run_script("frobnicate now\nadd inc 5 Tip\n")?;

    assert!(output.contains("frobnicate"));
    assert!(output.contains("Added income: Tip"));
    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let output = run_script("help\n")?;
    for command in ["add", "delete", "list", "summary", "export", "quit"] {
        assert!(output.contains(command), "help should mention {}", command);
    }
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let output = run_script_as(
        "add inc 400 Salary\nadd exp 100 Rent\ndelete exp 5\nadd exp abc Broken\n",
        OutputFormat::Json,
    )?;

    let documents: Vec<Value> = serde_json::Deserializer::from_str(&output)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()?;
    assert_eq!(documents.len(), 4);

    let added = &documents[1];
    assert_eq!(added["entry"]["category"], "expense");
    assert_eq!(added["entry"]["amount_cents"], 10000);
    assert_eq!(added["entry"]["share_percent"], 100);
    assert_eq!(added["summary"]["ratio"], 25);
    assert_eq!(added["percentages"], serde_json::json!([100]));

    let deleted = &documents[2];
    assert!(deleted["removed"].is_null());
    assert_eq!(deleted["id"], 5);

    assert!(
        documents[3]["error"]
            .as_str()
            .is_some_and(|e| e.contains("Invalid amount"))
    );

    Ok(())
}

#[test]
fn test_json_output_stays_parseable_after_bad_commands() -> Result<()> {
    let output = run_script_as(
        "frobnicate now\ndelete savings 1\nadd inc 10 Tip\n",
        OutputFormat::Json,
    )?;

    let documents: Vec<Value> = serde_json::Deserializer::from_str(&output)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()?;
    assert_eq!(documents.len(), 3);
    assert!(
        documents[0]["error"]
            .as_str()
            .is_some_and(|e| e.contains("frobnicate"))
    );
    assert!(documents[1]["error"].is_string());
    assert_eq!(documents[2]["entry"]["description"], "Tip");

    Ok(())
}

#[test]
fn test_huge_amounts_do_not_break_the_session() -> Result<()> {
    let mut session = Session::new(Vec::new(), OutputFormat::Table);
    let script = "add inc 90000000000000000 a\nadd inc 90000000000000000 b\nbudget\n";
    session.run(script.as_bytes(), false)?;

    assert!(session.service().items(Category::Income).is_empty());
    let output = String::from_utf8(session.into_output())?;
    assert_eq!(output.matches("error: Invalid amount: Amount must not exceed").count(), 2);
    assert!(output.contains("Budget 0.00"));

    Ok(())
}
