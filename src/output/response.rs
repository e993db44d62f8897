//! CLI response formatting and output.
//!
//! Provides the JSON envelope, stderr error rendering and exit code mapping.

use cargo_relocate::error::Hint;
use cargo_relocate::{Error, ErrorCode, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_unexpected(format!("serialize response: {}", e))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_json_result<T: Serialize>(result: &Result<T>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(err)),
    }
}

/// Human-readable error report for stderr.
///
/// ```text
/// error[relocate.source_missing]: Build artifact not found
///   source: /src/release/app
///   destination: /out/app
/// hint: Check that --rename matches the file name the build produces
/// ```
pub fn render_error(err: &Error) -> String {
    let mut out = format!("error[{}]: {}", err.code.as_str(), err.message);

    if let Value::Object(fields) = &err.details {
        for (key, value) in fields {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            out.push_str(&format!("\n  {}: {}", key, rendered));
        }
    }

    for hint in &err.hints {
        out.push_str(&format!("\nhint: {}", hint.message));
    }

    out
}

pub fn print_error(err: &Error) {
    eprintln!("{}", render_error(err));
}

pub fn exit_code_for_error(err: &Error) -> i32 {
    match err.code {
        ErrorCode::ValidationMissingArgument | ErrorCode::ValidationInvalidArgument => 2,

        // The build's own exit code is passed through.
        ErrorCode::BuildFailed => err
            .details
            .get("exitCode")
            .and_then(Value::as_i64)
            .and_then(|code| i32::try_from(code).ok())
            .filter(|code| *code > 0)
            .unwrap_or(20),

        ErrorCode::BuildSpawnFailed => 20,

        ErrorCode::RelocateSourceMissing => 4,

        ErrorCode::RelocateCopyFailed
        | ErrorCode::InternalIoError
        | ErrorCode::InternalUnexpected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargo_relocate::error::BuildFailedDetails;

    fn build_failure(exit_code: i32) -> Error {
        Error::build_failed(BuildFailedDetails {
            command: "sh /src/cargo.sh build".to_string(),
            working_dir: "/src".to_string(),
            exit_code,
        })
    }

    #[test]
    fn build_failure_propagates_child_exit_code() {
        assert_eq!(exit_code_for_error(&build_failure(2)), 2);
        assert_eq!(exit_code_for_error(&build_failure(101)), 101);
    }

    #[test]
    fn build_failure_without_usable_code_falls_back() {
        assert_eq!(exit_code_for_error(&build_failure(-1)), 20);
    }

    #[test]
    fn usage_and_relocation_errors_are_distinct() {
        let usage = Error::validation_missing_argument(vec!["--rename".to_string()]);
        let missing = Error::relocate_source_missing("/src/debug/app", "/out/app");
        let copy = Error::relocate_copy_failed("/src/debug/app", "/out/app", "denied");

        assert_eq!(exit_code_for_error(&usage), 2);
        assert_eq!(exit_code_for_error(&missing), 4);
        assert_eq!(exit_code_for_error(&copy), 1);
    }

    #[test]
    fn render_error_names_both_paths() {
        let err = Error::relocate_source_missing("/src/release/app", "/out/app");
        let text = render_error(&err);

        assert!(text.starts_with("error[relocate.source_missing]: Build artifact not found"));
        assert!(text.contains("\n  source: /src/release/app"));
        assert!(text.contains("\n  destination: /out/app"));
        assert!(text.contains("\nhint: "));
    }

    #[test]
    fn json_envelope_for_error() {
        let err = build_failure(2);
        let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"build.failed\""));
        assert!(json.contains("\"exitCode\": 2"));
    }
}
