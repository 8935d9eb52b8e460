//! One-shot helper protocol.
//!
//! Each command runs the helper once as `<program> [args...] <verb> [operand]`.
//! The helper prints a single JSON object on stdout: `{"ok": <value>}` on
//! success or `{"error": "<message>"}` when it refuses the command.

use serde::de::DeserializeOwned;
use serde_json::Value;
use zxp_magic::BackendError;

/// Commands understood by the helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Install,
    Inspect,
    List,
    Uninstall,
    OpenFolder,
    GetDebugMode,
    SetDebugMode,
    GetExtensionsFolder,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Install => "install",
            Verb::Inspect => "inspect",
            Verb::List => "list",
            Verb::Uninstall => "uninstall",
            Verb::OpenFolder => "open-folder",
            Verb::GetDebugMode => "get-debug-mode",
            Verb::SetDebugMode => "set-debug-mode",
            Verb::GetExtensionsFolder => "get-extensions-folder",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("helper I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{verb} timed out after {secs}s")]
    Timeout { verb: &'static str, secs: u64 },

    /// The helper refused the command; the message is shown as-is.
    #[error("{0}")]
    Helper(String),

    #[error("{0}")]
    Decode(String),
}

impl From<ProcessError> for BackendError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Spawn { .. } | ProcessError::Io(_) | ProcessError::Timeout { .. } => {
                BackendError::Disconnected(err.to_string())
            }
            ProcessError::Helper(msg) => BackendError::Rejected(msg),
            ProcessError::Decode(msg) => BackendError::Serialization(msg),
        }
    }
}

/// Decode a finished helper run.
///
/// A parsable reply wins over the exit status. Without one, a failed run is
/// reported through its stderr and a successful run is a decode error.
pub fn decode_reply<T: DeserializeOwned>(
    stdout: &[u8],
    stderr: &[u8],
    exit_code: Option<i32>,
) -> Result<T, ProcessError> {
    let succeeded = exit_code == Some(0);

    let mut map = match serde_json::from_slice::<Value>(stdout.trim_ascii()) {
        Ok(Value::Object(map)) => map,
        Ok(_) if succeeded => {
            return Err(ProcessError::Decode("expected a JSON object".into()));
        }
        Err(e) if succeeded => return Err(ProcessError::Decode(e.to_string())),
        _ => return Err(failed_run(stderr, exit_code)),
    };

    if let Some(error) = map.remove("error") {
        let message = match error {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(ProcessError::Helper(message));
    }

    match map.remove("ok") {
        Some(value) => serde_json::from_value(value).map_err(|e| ProcessError::Decode(e.to_string())),
        None if succeeded => Err(ProcessError::Decode(
            "reply has neither `ok` nor `error`".into(),
        )),
        None => Err(failed_run(stderr, exit_code)),
    }
}

fn failed_run(stderr: &[u8], exit_code: Option<i32>) -> ProcessError {
    let stderr = String::from_utf8_lossy(stderr).trim().to_owned();
    if !stderr.is_empty() {
        return ProcessError::Helper(stderr);
    }
    match exit_code {
        Some(code) => ProcessError::Helper(format!("helper exited with status {code}")),
        None => ProcessError::Helper("helper was terminated by a signal".into()),
    }
}

#[cfg(test)]
mod tests {
    use zxp_magic::InstallOutcome;

    use super::*;

    #[test]
    fn ok_value_is_decoded() {
        let enabled: bool = decode_reply(b"{\"ok\": true}\n", b"", Some(0)).unwrap();
        assert!(enabled);
    }

    #[test]
    fn null_ok_decodes_to_unit() {
        let () = decode_reply(b"{\"ok\": null}", b"", Some(0)).unwrap();
    }

    #[test]
    fn error_reply_is_helper_error_whatever_the_exit_code() {
        for code in [Some(0), Some(1)] {
            let err = decode_reply::<()>(b"{\"error\": \"Manifest missing\"}", b"", code).unwrap_err();
            assert!(matches!(err, ProcessError::Helper(ref m) if m == "Manifest missing"));
        }
    }

    #[test]
    fn failed_run_without_reply_uses_stderr() {
        let err = decode_reply::<()>(b"", b"  permission denied\n", Some(2)).unwrap_err();
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn failed_run_without_stderr_names_status() {
        let err = decode_reply::<()>(b"", b"", Some(7)).unwrap_err();
        assert_eq!(err.to_string(), "helper exited with status 7");
    }

    #[test]
    fn garbage_on_success_is_decode_error() {
        let err = decode_reply::<bool>(b"installed!", b"", Some(0)).unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
        assert!(matches!(BackendError::from(err), BackendError::Serialization(_)));
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let err = decode_reply::<bool>(b"{\"ok\": \"yes\"}", b"", Some(0)).unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
    }

    #[test]
    fn install_outcome_accepts_legacy_field_names() {
        let reply = br#"{"ok": {"success": true, "message": "", "extension": {
            "id": "com.example.panel", "name": "Panel", "version": "1.2.0",
            "host_list": [{"name": "Photoshop", "version": "All"}]
        }}}"#;
        let outcome: InstallOutcome = decode_reply(reply, b"", Some(0)).unwrap();
        let record = outcome.into_result().unwrap();
        assert_eq!(record.id.as_str(), "com.example.panel");
        assert!(record.host_compatibility[0].is_unconstrained());
    }

    #[test]
    fn transport_failures_map_to_disconnected() {
        let err = ProcessError::Timeout {
            verb: "install",
            secs: 120,
        };
        assert_eq!(
            BackendError::from(err),
            BackendError::Disconnected("install timed out after 120s".into())
        );
    }
}
