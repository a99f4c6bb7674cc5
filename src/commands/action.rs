//! `pml do` command.

use std::io::Write;
use std::path::Path;

use crate::context::ServiceContext;

/// Execute the `do` command, printing the captured stdout verbatim.
///
/// # Errors
///
/// Returns the rendered outcome message when the action did not succeed.
pub fn run(ctx: &ServiceContext, action: &str, dir: Option<&Path>) -> Result<(), String> {
    let outcome = ctx.action().run(action, dir);
    if !outcome.is_success() {
        return Err(outcome.to_string());
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{outcome}").and_then(|()| stdout.flush()).map_err(|e| e.to_string())
}
