use std::process::ExitCode;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init},
    exit_status::ExitStatus,
    report,
};

/// Run the parsed command, print its report and compute the exit code.
///
/// # Returns
/// - `Ok(ExitCode)` with 0 (no issues) or 1 (issues found)
/// - `Err` for internal errors (config error, missing directory, no usages)
pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run(args)?;
    report::print(&result);

    Ok(ExitStatus::from_error_count(result.error_count()).into())
}

fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
