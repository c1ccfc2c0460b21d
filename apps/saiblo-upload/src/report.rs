//! Exit codes and user-facing messages.

use std::process::ExitCode;

use saiblo_submit::{CompiledCode, SubmitError};

pub const EXIT_COMPILE_FAILED: u8 = 1;
pub const EXIT_MISSING_CREDENTIAL: u8 = 3;
pub const EXIT_INVALID_SOURCE: u8 = 4;
pub const EXIT_GAME_NOT_FOUND: u8 = 5;
pub const EXIT_LANGUAGE_CONFLICT: u8 = 6;
pub const EXIT_REPO_CONFLICT: u8 = 7;
pub const EXIT_TIMEOUT: u8 = 8;
pub const EXIT_OTHER: u8 = 10;

pub fn exit_code(err: &SubmitError) -> u8 {
    match err {
        SubmitError::CompileFailed { .. } => EXIT_COMPILE_FAILED,
        SubmitError::InvalidSourcePath(_) => EXIT_INVALID_SOURCE,
        SubmitError::GameNotFound(_) => EXIT_GAME_NOT_FOUND,
        SubmitError::EntityLanguageConflict { .. } => EXIT_LANGUAGE_CONFLICT,
        SubmitError::EntityRepoConflict { .. } => EXIT_REPO_CONFLICT,
        SubmitError::Timeout { .. } => EXIT_TIMEOUT,
        SubmitError::Protocol(_)
        | SubmitError::Archive(_)
        | SubmitError::Api(_)
        | SubmitError::Realtime(_)
        | SubmitError::Io(_) => EXIT_OTHER,
    }
}

/// The line printed for a failed run.
pub fn failure_message(err: &SubmitError) -> String {
    match err {
        SubmitError::CompileFailed { message, .. } => {
            format!("Error: compile failed! Reason:\n{message}")
        }
        SubmitError::GameNotFound(game) => format!("Error: game {game} not found!"),
        SubmitError::EntityLanguageConflict {
            existing,
            requested,
            ..
        } => format!(
            "Error: AI language does not match (registered as {existing}, requested {requested})."
        ),
        SubmitError::EntityRepoConflict {
            existing,
            requested,
            ..
        } => format!(
            "Error: AI repository URL does not match (registered as {existing}, requested {requested})."
        ),
        other => format!("Error: {other}"),
    }
}

pub fn success_message(code: &CompiledCode) -> String {
    format!("Upload and compile succeeded! The AI token is:\n{}", code.token)
}

/// Prints the outcome and returns the process exit code.
///
/// Compile output is the program's result and goes to stdout; every
/// other failure goes to stderr.
pub fn finish(result: Result<CompiledCode, SubmitError>) -> ExitCode {
    match result {
        Ok(code) => {
            println!("{}", success_message(&code));
            ExitCode::SUCCESS
        }
        Err(err @ SubmitError::CompileFailed { .. }) => {
            println!("{}", failure_message(&err));
            ExitCode::from(exit_code(&err))
        }
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::from(exit_code(&err))
        }
    }
}
