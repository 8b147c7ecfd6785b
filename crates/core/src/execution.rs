use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Program used to refresh the subscription list
pub const AZURE_CLI: &str = "az";

/// Arguments that make the Azure CLI re-fetch subscriptions into its profile
pub const REFRESH_ARGS: [&str; 5] = ["account", "list", "--refresh", "--output", "none"];

/// Asks the Azure CLI to rewrite its profile with the latest subscriptions.
///
/// # Errors
///
/// Returns an error if the CLI can't be spawned or exits with non-zero status.
pub fn refresh_subscriptions() -> Result<()> {
    let mut command = Command::new(AZURE_CLI);
    command.args(REFRESH_ARGS);
    execute_command(command)
}

/// Runs a command with inherited stdio and waits for it.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Executing {:?}", command);

    let subprocess_exit_success = command
        .spawn()
        .and_then(|mut child| child.wait())
        .map_err(Error::RefreshFailed)?
        .success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::RefreshExit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_refresh_failed() {
        let command = Command::new("azcx-test-definitely-not-a-real-program");
        let result = execute_command(command);
        assert!(matches!(result, Err(Error::RefreshFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_refresh_exit() {
        let command = Command::new("false");
        let result = execute_command(command);
        assert!(matches!(result, Err(Error::RefreshExit)));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_ok() {
        let command = Command::new("true");
        assert!(execute_command(command).is_ok());
    }
}
