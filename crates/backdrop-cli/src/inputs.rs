use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use backdrop_core::consts::FRAME_EXTENSIONS;

/// Expand command-line inputs into an ordered list of frame files.
///
/// Files are kept in the order given. A directory contributes every image
/// file directly inside it, sorted by file name.
pub fn collect_frames(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = frames_in_dir(input)?;
            debug!(dir = %input.display(), files = entries.len(), "Expanded input directory");
            frames.append(&mut entries);
        } else {
            frames.push(input.clone());
        }
    }
    if frames.is_empty() {
        bail!("No input frames given");
    }
    Ok(frames)
}

fn frames_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            FRAME_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
