//! Renderer collaborators.
//!
//! A renderer turns a board string into a file on disk. The tournament only
//! cares that the file appears; what it looks like is up to the renderer.

use async_trait::async_trait;
use chess_core::decode;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{DisplayConfig, RendererConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Exited { command: String, status: ExitStatus },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Renderer: Send + Sync {
    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &str;

    async fn render(&self, board: &str, dest: &Path) -> Result<(), RenderError>;
}

/// Build the renderer described by the configuration.
pub fn from_config(config: &RendererConfig) -> Box<dyn Renderer> {
    match config {
        RendererConfig::Text => Box::new(TextRenderer),
        RendererConfig::Command {
            command,
            args,
            extension,
            display,
        } => Box::new(CommandRenderer {
            command: command.clone(),
            args: args.clone(),
            extension: extension.clone(),
            display: display.clone(),
        }),
        RendererConfig::None => Box::new(NullRenderer),
    }
}

/// Writes an ASCII diagram followed by the board string.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

#[async_trait]
impl Renderer for TextRenderer {
    fn extension(&self) -> &str {
        "txt"
    }

    async fn render(&self, board: &str, dest: &Path) -> Result<(), RenderError> {
        let contents = format!("{}\n{board}\n", decode(board).diagram());
        tokio::fs::write(dest, contents).await?;
        Ok(())
    }
}

/// Runs an external drawing program, optionally showing the result in a
/// terminal image viewer.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    pub command: String,
    pub args: Vec<String>,
    pub extension: String,
    pub display: Option<DisplayConfig>,
}

impl CommandRenderer {
    async fn show(&self, display: &DisplayConfig, dest: &Path) -> Result<(), RenderError> {
        let mut child = Command::new(&display.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Spawn {
                command: display.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(display_control(display, dest).as_bytes())
                .await?;
        }
        child.wait().await?;
        Ok(())
    }
}

/// Control string understood by w3mimgdisplay: draw `dest` at the top left
/// of the terminal, sync, then quit.
pub fn display_control(display: &DisplayConfig, dest: &Path) -> String {
    format!(
        "0;1;0;40;{};{};;;;;{}\n4;\n3;",
        display.width,
        display.height,
        dest.display()
    )
}

#[async_trait]
impl Renderer for CommandRenderer {
    fn extension(&self) -> &str {
        &self.extension
    }

    async fn render(&self, board: &str, dest: &Path) -> Result<(), RenderError> {
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(dest)
            .arg(board)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| RenderError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(RenderError::Exited {
                command: self.command.clone(),
                status,
            });
        }

        if let Some(display) = &self.display {
            self.show(display, dest).await?;
        }
        Ok(())
    }
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

#[async_trait]
impl Renderer for NullRenderer {
    fn extension(&self) -> &str {
        "none"
    }

    async fn render(&self, _board: &str, _dest: &Path) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
