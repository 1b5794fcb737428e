use crate::error::Result;
use linkmap_core::LayoutStrategy;
use std::fs;
use std::path::{Path, PathBuf};

/// `<prefix>_<strategy>.svg`, or `.html` for interactive output.
pub fn artifact_path(prefix: &str, strategy: LayoutStrategy, interactive: bool) -> PathBuf {
    let extension = if interactive { "html" } else { "svg" };
    PathBuf::from(format!("{}_{}.{}", prefix, strategy.as_str(), extension))
}

pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Result of rendering one layout to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactOutcome {
    Written {
        path: PathBuf,
        strategy: LayoutStrategy,
        fallback_layout: bool,
    },
    Failed {
        path: PathBuf,
        strategy: LayoutStrategy,
        error: String,
    },
}

impl ArtifactOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ArtifactOutcome::Written { path, .. } | ArtifactOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, ArtifactOutcome::Written { .. })
    }
}
