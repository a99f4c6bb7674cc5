//! Command dispatch and handlers.

pub mod action;
pub mod ask;
pub mod list;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::directives::DirectiveKind;

/// Dispatch a parsed command to its handler.
///
/// When `PML_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files below that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env();
    let (ctx, session) = if let Ok(path) = env::var("PML_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(path), &config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let result = dispatch_with_context(command, &ctx, &config);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Ask { prompt, model, summarize } => {
            let model = model.as_deref().unwrap_or(&config.model);
            ask::run(ctx, prompt, model, *summarize)
        }
        Command::Do { action, dir } => action::run(ctx, action, dir.as_deref()),
        Command::Exec { directive, body, dir, model } => match directive {
            DirectiveKind::Ask => {
                ask::run(ctx, body, model.as_deref().unwrap_or(&config.model), false)
            }
            DirectiveKind::Do => action::run(ctx, body, dir.as_deref()),
        },
        Command::List => list::run(),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
