use super::path::PathResolver;
use crate::error::SandboxError;
use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

/// Default wall-clock limit for a single command.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Maximum captured bytes per stream (1 MiB) before truncation.
pub const MAX_OUTPUT_BYTES: usize = 1_048_576;

/// Mapping from program name to the permitted leading non-flag subcommand
/// tokens. Immutable after construction; a program that is not a key is denied
/// outright.
#[derive(Debug, Clone)]
pub struct AllowlistPolicy {
    programs: BTreeMap<String, Vec<String>>,
}

impl AllowlistPolicy {
    pub fn new(programs: BTreeMap<String, Vec<String>>) -> Self {
        Self { programs }
    }

    /// The shipped policy: git restricted to local repository bookkeeping and
    /// python restricted to launching the embedded uvicorn dev server.
    pub fn default_programs() -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([
            (
                "git".to_string(),
                ["init", "add", "commit", "status"]
                    .map(String::from)
                    .to_vec(),
            ),
            ("python".to_string(), ["-m", "uvicorn"].map(String::from).to_vec()),
        ])
    }

    /// Decide whether a tokenized command line is permitted.
    ///
    /// The first token is the program; it must be a policy key. Among the
    /// remaining tokens, flag tokens (leading `-`) are skipped and the first
    /// non-flag token must be in the program's permitted set. A command with no
    /// non-flag token at all is admitted — a bare program invocation with only
    /// flags passes even though no subcommand was matched. That looseness, and
    /// the fact that everything after the first non-flag token goes through
    /// unchecked, is intentional: this is a coarse first-match policy, not
    /// full argument validation.
    pub fn admits(&self, tokens: &[String]) -> bool {
        let Some((program, rest)) = tokens.split_first() else {
            return false;
        };
        let Some(subcommands) = self.programs.get(program) else {
            return false;
        };

        for arg in rest {
            if arg.starts_with('-') {
                continue;
            }
            return subcommands.iter().any(|allowed| allowed == arg);
        }
        true
    }

    /// Sorted program names, for denial messages.
    pub fn program_names(&self) -> Vec<&str> {
        self.programs.keys().map(String::as_str).collect()
    }
}

impl Default for AllowlistPolicy {
    fn default() -> Self {
        Self::new(Self::default_programs())
    }
}

/// Admits and executes allowlisted commands inside the workspace.
///
/// Per invocation: `Received -> Denied`, or
/// `Received -> Spawned -> {Completed, TimedOut, SpawnFailed}`. No retries,
/// no queuing; any failure is terminal and reported to the caller.
#[derive(Debug, Clone)]
pub struct CommandGate {
    policy: AllowlistPolicy,
    resolver: PathResolver,
    timeout: Duration,
}

impl CommandGate {
    pub fn new(policy: AllowlistPolicy, resolver: PathResolver, timeout: Duration) -> Self {
        Self {
            policy,
            resolver,
            timeout,
        }
    }

    pub fn policy(&self) -> &AllowlistPolicy {
        &self.policy
    }

    /// Tokenize a raw command line with POSIX shell word splitting.
    pub fn tokenize(command: &str) -> Result<Vec<String>, SandboxError> {
        shell_words::split(command).map_err(|error| SandboxError::Tokenize(error.to_string()))
    }

    /// Run `command` with `cwd` (relative to the workspace root) as working
    /// directory. Stdout and stderr are captured and merged into one text
    /// stream, each bounded at [`MAX_OUTPUT_BYTES`].
    ///
    /// Denied commands never spawn. On timeout the child is killed (the tokio
    /// `kill_on_drop` flag reaps it when the output future is dropped) and
    /// `CommandTimeout` carries the limit and the original command line.
    pub async fn execute(&self, command: &str, cwd: &str) -> Result<String, SandboxError> {
        let tokens = Self::tokenize(command)?;
        let Some((program, args)) = tokens.split_first() else {
            return Err(self.denied());
        };
        if !self.policy.admits(&tokens) {
            return Err(self.denied());
        }

        let workdir = self.resolver.resolve(cwd)?;

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .current_dir(&workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(command, cwd = %workdir.display(), "spawning allowlisted command");

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                let mut text = bounded_utf8(&output.stdout);
                let stderr = bounded_utf8(&output.stderr);
                if !stderr.is_empty() {
                    if !text.is_empty() && !text.ends_with('\n') {
                        text.push('\n');
                    }
                    text.push_str(&stderr);
                }
                Ok(text)
            }
            Ok(Err(source)) => Err(SandboxError::Spawn {
                command: command.to_string(),
                source,
            }),
            Err(_) => Err(SandboxError::CommandTimeout {
                limit_secs: self.timeout.as_secs(),
                command: command.to_string(),
            }),
        }
    }

    fn denied(&self) -> SandboxError {
        SandboxError::CommandDenied {
            allowed: self.policy.program_names().join(", "),
        }
    }
}

/// Lossy UTF-8 conversion bounded at [`MAX_OUTPUT_BYTES`], truncating on a
/// character boundary with an explicit marker.
fn bounded_utf8(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).to_string();
    if text.len() > MAX_OUTPUT_BYTES {
        let mut cut = MAX_OUTPUT_BYTES;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n... [output truncated at 1MB]");
    }
    text
}
