use super::FirmwareCompiler;
use crate::config::CompilerConfig;
use crate::errors::{EwtError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Which compiler front-ends are installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolAvailability {
    pub esphome: bool,
    pub uvx: bool,
}

impl ToolAvailability {
    pub fn detect(config: &CompilerConfig) -> Self {
        Self {
            esphome: which::which(&config.esphome_command).is_ok(),
            uvx: which::which(&config.uvx_command).is_ok(),
        }
    }
}

/// A resolved compiler invocation
#[derive(Debug, Clone, PartialEq)]
pub struct CompileCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CompileCommand {
    /// Pick `esphome compile`, falling back to `uvx esphome compile`.
    /// Pre-releases always go through uvx with a forced refresh.
    pub fn select(
        config: &CompilerConfig,
        tools: ToolAvailability,
        pre_release: bool,
        yaml_path: &Path,
    ) -> Result<Self> {
        let yaml: OsString = yaml_path.as_os_str().to_owned();

        if pre_release {
            if !tools.uvx {
                return Err(EwtError::Compile(
                    "uvx not found. Please install uv to use --pre-release.".to_string(),
                ));
            }
            return Ok(Self {
                program: config.uvx_command.clone(),
                args: vec![
                    "--prerelease".into(),
                    "allow".into(),
                    "--refresh".into(),
                    "esphome".into(),
                    "compile".into(),
                    yaml,
                ],
            });
        }

        if tools.esphome {
            Ok(Self {
                program: config.esphome_command.clone(),
                args: vec!["compile".into(), yaml],
            })
        } else if tools.uvx {
            Ok(Self {
                program: config.uvx_command.clone(),
                args: vec!["esphome".into(), "compile".into(), yaml],
            })
        } else {
            Err(EwtError::Compile(
                "ESPHome not found. Please install ESPHome or uv:\n  pip install esphome\n\
                 Or use --skip-compile with --firmware to provide a pre-built binary."
                    .to_string(),
            ))
        }
    }

    /// Shell-like rendering for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs the ESPHome CLI as a subprocess
pub struct EsphomeCompiler {
    config: CompilerConfig,
    pre_release: bool,
}

impl EsphomeCompiler {
    pub fn new(config: CompilerConfig, pre_release: bool) -> Self {
        Self {
            config,
            pre_release,
        }
    }

    pub fn command_for(&self, yaml_path: &Path) -> Result<CompileCommand> {
        let tools = ToolAvailability::detect(&self.config);
        log::debug!("Compiler tools available: {:?}", tools);
        CompileCommand::select(&self.config, tools, self.pre_release, yaml_path)
    }
}

#[async_trait]
impl FirmwareCompiler for EsphomeCompiler {
    fn name(&self) -> &str {
        "ESPHome"
    }

    async fn compile(&self, yaml_path: &Path) -> Result<()> {
        let command = self.command_for(yaml_path)?;
        let work_dir = yaml_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        log::info!("🔨 Executing: {}", command.display());

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&work_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EwtError::Compile(format!("Failed to start {}: {}", command.program, e))
            })?;

        let stdout_task = tokio::spawn(stream_output(child.stdout.take()));
        let stderr_task = tokio::spawn(stream_output(child.stderr.take()));

        let status = child.wait().await.map_err(|e| {
            EwtError::Compile(format!("Failed to wait for {}: {}", command.program, e))
        })?;

        let (stdout_result, stderr_result) = tokio::join!(stdout_task, stderr_task);
        for result in [stdout_result, stderr_result] {
            if let Err(e) = result {
                log::warn!("Compiler output reader stopped unexpectedly: {}", e);
            }
        }

        if status.success() {
            log::info!("✅ ESPHome compilation completed successfully");
            Ok(())
        } else {
            Err(EwtError::Compile(format!(
                "ESPHome compilation failed with {}",
                describe_exit(&status)
            )))
        }
    }
}

/// Log a child's output line by line until EOF. Lines need not be UTF-8;
/// the pipe is always drained so the child never sees a closed reader.
async fn stream_output<R>(reader: Option<R>)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };

    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                log::info!("[esphome] {}", text.trim_end());
            }
            Err(e) => {
                log::debug!("Failed to read compiler output: {}", e);
                if let Err(e) = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await {
                    log::debug!("Failed to drain compiler output: {}", e);
                }
                break;
            }
        }
    }
}

/// "exit code N", or the terminating signal on unix
fn describe_exit(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit code {}", code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal {}", signal);
        }
    }

    "unknown exit status".to_string()
}
