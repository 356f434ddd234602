//! Docker-backed sandbox execution.
//!
//! Each run gets a fresh container from the language's image with
//! networking disabled and memory/CPU capped. The job workspace is bind
//! mounted at a fixed guest path, the container idles on a sleep command,
//! and the compile and run phases happen as exec sessions inside it. The
//! compile phase reports through exec exit codes, never by grepping
//! stdout.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, KillContainerOptions, LogOutput, RemoveContainerOptions,
    StartContainerOptions,
};
use bollard::exec::{CreateExecOptions, StartExecOptions, StartExecResults};
use bollard::image::CreateImageOptions;
use bollard::models::HostConfig;
use bollard::Docker;
use futures_util::stream::StreamExt;
use proctor_common::config::{JudgeConfig, LanguageSettings};
use proctor_common::types::Language;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{JudgeError, Result};
use crate::workspace::JobWorkspace;

/// Upper bound on a synthesized program, checked before anything reaches
/// Docker.
pub const MAX_PROGRAM_BYTES: usize = 1024 * 1024;
/// Upper bound on stdin fed to the guest.
pub const MAX_STDIN_BYTES: usize = 10 * 1024 * 1024;

/// Guest mount point of the job workspace; every configured command
/// resolves relative to it.
const GUEST_WORKDIR: &str = "/sandbox";
const INPUT_FILE: &str = "input.txt";
/// Keeps the container alive while exec phases run inside it.
const HOLDER_CMD: &str = "sleep 300";

/// Coarse outcome of a sandbox run. A timed-out run names the wall-clock
/// budget that expired (compile or run phase), so downstream notices
/// report the number the sandbox actually enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxStatus {
    Completed,
    TimedOut { budget_ms: u64 },
}

/// Captured output of one guest program run.
#[derive(Debug, Clone)]
pub struct SandboxResult {
    pub stdout: String,
    pub stderr: String,
    pub status: SandboxStatus,
    /// Set when the compile phase exited nonzero; stdout/stderr then hold
    /// the compiler's output and the run phase never happened.
    pub compile_failed: bool,
}

impl SandboxResult {
    pub fn completed(&self) -> bool {
        self.status == SandboxStatus::Completed && !self.compile_failed
    }
}

/// Executes one synthesized program in isolation.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Whether a profile exists for `language`.
    fn supports(&self, language: Language) -> bool;

    /// Runs `source` as `language`, feeding `stdin` to the guest, and
    /// returns captured output with a coarse status. Guest failures are
    /// data in the result; `Err` means the host itself failed.
    async fn run(&self, language: Language, source: &str, stdin: &str) -> Result<SandboxResult>;
}

pub struct DockerSandbox {
    docker: Docker,
    languages: LanguageSettings,
    config: JudgeConfig,
}

struct ExecOutcome {
    stdout: String,
    stderr: String,
    exit_code: Option<i64>,
    timed_out: bool,
}

impl DockerSandbox {
    pub fn connect(config: JudgeConfig, languages: LanguageSettings) -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| {
            JudgeError::Infrastructure(format!("failed to connect to Docker daemon: {e}"))
        })?;
        Ok(Self {
            docker,
            languages,
            config,
        })
    }

    pub async fn ping(&self) -> Result<()> {
        self.docker
            .ping()
            .await
            .map_err(|e| JudgeError::Infrastructure(format!("Docker daemon unreachable: {e}")))?;
        Ok(())
    }

    async fn ensure_image(&self, image: &str) -> Result<()> {
        if self.docker.inspect_image(image).await.is_ok() {
            debug!(image, "image already present");
            return Ok(());
        }
        info!(image, "pulling image");
        let options = Some(CreateImageOptions {
            from_image: image,
            ..Default::default()
        });
        let mut stream = self.docker.create_image(options, None, None);
        while let Some(progress) = stream.next().await {
            progress.map_err(|e| {
                JudgeError::Infrastructure(format!("failed to pull image {image}: {e}"))
            })?;
        }
        info!(image, "image pulled");
        Ok(())
    }

    /// Runs one exec session in the container, collecting both streams
    /// until they close, then reads the exit code. On wall-clock expiry
    /// the container is killed so the guest cannot outlive its budget.
    async fn exec_phase(
        &self,
        container_id: &str,
        cmd: &[String],
        timeout: Duration,
    ) -> Result<ExecOutcome> {
        let exec = self
            .docker
            .create_exec(
                container_id,
                CreateExecOptions {
                    cmd: Some(cmd.to_vec()),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    working_dir: Some(GUEST_WORKDIR.to_string()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| JudgeError::Infrastructure(format!("failed to create exec: {e}")))?;

        let collect = async {
            let started = self
                .docker
                .start_exec(
                    &exec.id,
                    Some(StartExecOptions {
                        detach: false,
                        ..Default::default()
                    }),
                )
                .await
                .map_err(|e| JudgeError::Infrastructure(format!("failed to start exec: {e}")))?;

            let mut stdout = String::new();
            let mut stderr = String::new();
            match started {
                StartExecResults::Attached { mut output, .. } => {
                    while let Some(chunk) = output.next().await {
                        match chunk {
                            Ok(LogOutput::StdOut { message }) => {
                                stdout.push_str(&String::from_utf8_lossy(&message));
                            }
                            Ok(LogOutput::StdErr { message }) => {
                                stderr.push_str(&String::from_utf8_lossy(&message));
                            }
                            Ok(_) => {}
                            Err(e) => {
                                warn!(error = %e, "exec output stream broke");
                                break;
                            }
                        }
                    }
                }
                StartExecResults::Detached => {
                    return Err(JudgeError::Infrastructure(
                        "exec detached unexpectedly".into(),
                    ));
                }
            }
            Ok((stdout, stderr))
        };

        match tokio::time::timeout(timeout, collect).await {
            Ok(Ok((stdout, stderr))) => {
                let inspect = self.docker.inspect_exec(&exec.id).await.map_err(|e| {
                    JudgeError::Infrastructure(format!("failed to inspect exec: {e}"))
                })?;
                Ok(ExecOutcome {
                    stdout,
                    stderr,
                    exit_code: inspect.exit_code,
                    timed_out: false,
                })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                if let Err(e) = self
                    .docker
                    .kill_container(container_id, None::<KillContainerOptions<String>>)
                    .await
                {
                    warn!(container = %container_id, error = %e, "failed to kill timed-out container");
                }
                Ok(ExecOutcome {
                    stdout: String::new(),
                    stderr: "[Execution timed out]".into(),
                    exit_code: None,
                    timed_out: true,
                })
            }
        }
    }
}

#[async_trait]
impl Sandbox for DockerSandbox {
    fn supports(&self, language: Language) -> bool {
        self.languages.profile(language).is_some()
    }

    async fn run(&self, language: Language, source: &str, stdin: &str) -> Result<SandboxResult> {
        let profile = self.languages.profile(language).ok_or_else(|| {
            JudgeError::Configuration(format!("no sandbox profile for language {language}"))
        })?;
        if source.len() > MAX_PROGRAM_BYTES {
            return Err(JudgeError::Request(format!(
                "program exceeds {MAX_PROGRAM_BYTES} bytes"
            )));
        }
        if stdin.len() > MAX_STDIN_BYTES {
            return Err(JudgeError::Request(format!(
                "stdin exceeds {MAX_STDIN_BYTES} bytes"
            )));
        }

        let workspace = JobWorkspace::create(&self.config.workspace_root).await?;
        workspace.write_file(&profile.source_file, source).await?;
        workspace.write_file(INPUT_FILE, stdin).await?;

        self.ensure_image(&profile.image).await?;

        let container_name = format!("proctor-{}", Uuid::new_v4());
        let container_config = Config {
            image: Some(profile.image.clone()),
            cmd: Some(vec!["/bin/sh".into(), "-c".into(), HOLDER_CMD.into()]),
            entrypoint: Some(vec![]),
            working_dir: Some(GUEST_WORKDIR.to_string()),
            network_disabled: Some(true),
            host_config: Some(HostConfig {
                memory: Some(i64::from(profile.memory_limit_mb) * 1024 * 1024),
                nano_cpus: Some((f64::from(profile.cpu_limit) * 1_000_000_000.0) as i64),
                binds: Some(vec![format!(
                    "{}:{GUEST_WORKDIR}",
                    workspace.path().display()
                )]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let container = self
            .docker
            .create_container(
                Some(CreateContainerOptions {
                    name: container_name.as_str(),
                    platform: None,
                }),
                container_config,
            )
            .await
            .map_err(|e| JudgeError::Infrastructure(format!("failed to create container: {e}")))?;
        let container_id = container.id.clone();
        let _guard = ContainerGuard {
            docker: self.docker.clone(),
            container_id: container_id.clone(),
        };

        self.docker
            .start_container(&container_id, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| JudgeError::Infrastructure(format!("failed to start container: {e}")))?;

        let started = Instant::now();

        if let Some(compile_cmd) = &profile.compile_command {
            let compile = self
                .exec_phase(
                    &container_id,
                    compile_cmd,
                    Duration::from_millis(self.config.compile_timeout_ms),
                )
                .await?;
            if compile.timed_out {
                warn!(language = %language, "compile phase timed out");
                return Ok(SandboxResult {
                    stdout: compile.stdout,
                    stderr: compile.stderr,
                    status: SandboxStatus::TimedOut {
                        budget_ms: self.config.compile_timeout_ms,
                    },
                    compile_failed: false,
                });
            }
            if compile.exit_code != Some(0) {
                debug!(language = %language, exit_code = ?compile.exit_code, "compile phase failed");
                return Ok(SandboxResult {
                    stdout: compile.stdout,
                    stderr: compile.stderr,
                    status: SandboxStatus::Completed,
                    compile_failed: true,
                });
            }
        }

        let run = self
            .exec_phase(
                &container_id,
                &profile.run_command,
                Duration::from_millis(self.config.run_timeout_ms),
            )
            .await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if run.timed_out {
            warn!(language = %language, elapsed_ms, "run phase timed out");
            return Ok(SandboxResult {
                stdout: run.stdout,
                stderr: run.stderr,
                status: SandboxStatus::TimedOut {
                    budget_ms: self.config.run_timeout_ms,
                },
                compile_failed: false,
            });
        }

        // run-phase exit codes carry no signal: the harness reports
        // outcomes through its printed vocabulary
        debug!(language = %language, elapsed_ms, exit_code = ?run.exit_code, "run phase finished");
        Ok(SandboxResult {
            stdout: run.stdout,
            stderr: run.stderr,
            status: SandboxStatus::Completed,
            compile_failed: false,
        })
    }
}

/// Removes the container when the run finishes, panics, or is cancelled.
/// Removal runs detached; failures are logged and swallowed.
struct ContainerGuard {
    docker: Docker,
    container_id: String,
}

impl Drop for ContainerGuard {
    fn drop(&mut self) {
        let docker = self.docker.clone();
        let container_id = self.container_id.clone();
        tokio::spawn(async move {
            let options = RemoveContainerOptions {
                force: true,
                ..Default::default()
            };
            if let Err(e) = docker.remove_container(&container_id, Some(options)).await {
                warn!(container = %container_id, error = %e, "failed to remove container");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_requires_no_compile_failure() {
        let ok = SandboxResult {
            stdout: "VERDICT: ACCEPTED".into(),
            stderr: String::new(),
            status: SandboxStatus::Completed,
            compile_failed: false,
        };
        assert!(ok.completed());

        let compile_failed = SandboxResult {
            compile_failed: true,
            ..ok.clone()
        };
        assert!(!compile_failed.completed());

        let timed_out = SandboxResult {
            status: SandboxStatus::TimedOut { budget_ms: 5000 },
            ..ok
        };
        assert!(!timed_out.completed());
    }
}
