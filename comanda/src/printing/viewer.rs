//! Document viewer
//!
//! Opens a rendered page in a new viewing surface, where the page's own
//! onload hook raises the print dialog.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, instrument};

/// Something that can show a rendered HTML document to the user
#[async_trait]
pub trait DocumentViewer: Send + Sync {
    /// Show `html`; returns once the surface has been launched
    async fn open(&self, title: &str, html: &str) -> io::Result<()>;
}

/// Viewer backed by the platform's default browser
///
/// Each document is written to `<dir>/<uuid>.html` and handed to the
/// system opener.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    dir: PathBuf,
}

impl SystemViewer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the document without launching anything
    pub async fn write(&self, html: &str) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.html", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, html).await?;
        Ok(path)
    }
}

#[async_trait]
impl DocumentViewer for SystemViewer {
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    async fn open(&self, title: &str, html: &str) -> io::Result<()> {
        let path = self.write(html).await?;

        opener_command(&path).spawn()?;

        info!(path = %path.display(), "Document opened");
        Ok(())
    }
}

/// Platform command that opens `path` with its default application
fn opener_command(path: &Path) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // empty string is the window title `start` expects first
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command.arg(path);
    command
}
