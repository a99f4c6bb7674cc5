//! `pml ask` command.

use crate::context::ServiceContext;

/// Execute the `ask` command, blocking until the model answers.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the directive fails.
pub fn run(ctx: &ServiceContext, prompt: &str, model: &str, summarize: bool) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let ask = ctx.ask();
    let answer = runtime
        .block_on(async {
            if summarize {
                ask.summarize(prompt, model).await
            } else {
                ask.dispatch(prompt, model).await
            }
        })
        .map_err(|e| e.to_string())?;

    println!("{answer}");
    Ok(())
}
