use std::process::Command;

use tracing::debug;

use crate::actions::Actions;
use crate::error::{Error, Result};
use crate::sink::CommandSink;

/// Run `argv` with inherited stdio inside a `::group::` section.
///
/// The group is closed whether the child succeeds, fails or cannot be
/// spawned. A non-zero exit is returned as `Error::CommandFailed`.
pub fn run_in_group<S: CommandSink>(actions: &Actions<S>, title: &str, argv: &[String]) -> Result<()> {
    let Some((bin, args)) = argv.split_first() else {
        return Err(Error::msg("no command given"));
    };

    let guard = actions.begin_group(title)?;
    debug!(command = %argv.join(" "), "running grouped command");
    let status = Command::new(bin)
        .args(args)
        .status()
        .map_err(|e| Error::msg(format!("spawn failed for {bin}: {e}")));
    guard.end()?;

    let status = status?;
    if !status.success() {
        return Err(Error::CommandFailed {
            command: argv.join(" "),
            code: status.code(),
        });
    }
    Ok(())
}
