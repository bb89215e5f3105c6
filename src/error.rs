use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for webcoder.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to report a failure; tool bodies continue to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum WebcoderError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Sandbox (path resolution + command gate) ────────────────────────
    #[error("sandbox: {0}")]
    Sandbox(#[from] SandboxError),

    // ── Tools (file layer) ──────────────────────────────────────────────
    #[error("tool: {0}")]
    Tool(#[from] ToolError),

    // ── Stock image client ──────────────────────────────────────────────
    #[error("stock: {0}")]
    Stock(#[from] StockError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Sandbox errors ─────────────────────────────────────────────────────────

/// Failures raised by the trusted core. Every variant is terminal: a denied
/// command never partially executes and a path escape never touches the
/// filesystem.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("path escapes workspace: {path}")]
    PathEscape { path: String },

    #[error("command not allowed. Allowed programs: {allowed}")]
    CommandDenied { allowed: String },

    #[error("command timed out after {limit_secs}s: {command}")]
    CommandTimeout { limit_secs: u64, command: String },

    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid command line: {0}")]
    Tokenize(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Tool (file layer) errors ───────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ─── Stock image errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StockError {
    #[error("stock image API key is not configured (set PEXELS_API)")]
    MissingApiKey,

    #[error("no images found for query '{query}'")]
    NoResults { query: String },

    #[error("stock image request failed: {0}")]
    Http(#[from] reqwest::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WebcoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_escape_names_the_offending_path() {
        let err = WebcoderError::Sandbox(SandboxError::PathEscape {
            path: "../../etc/passwd".into(),
        });
        assert!(err.to_string().contains("../../etc/passwd"));
        assert!(err.to_string().contains("escapes workspace"));
    }

    #[test]
    fn command_denied_lists_allowed_programs() {
        let err = SandboxError::CommandDenied {
            allowed: "git, python".into(),
        };
        assert!(err.to_string().contains("git, python"));
    }

    #[test]
    fn timeout_carries_limit_and_command_line() {
        let err = SandboxError::CommandTimeout {
            limit_secs: 120,
            command: "python -m uvicorn app".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("120s"));
        assert!(msg.contains("uvicorn"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: WebcoderError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn tool_not_found_displays_path() {
        let err = WebcoderError::Tool(ToolError::NotFound {
            path: "notes/a.txt".into(),
        });
        assert!(err.to_string().contains("notes/a.txt"));
    }
}
