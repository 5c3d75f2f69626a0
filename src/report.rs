//! Observational side channel for test reports.
//!
//! Page objects announce each action as a named step and attach screenshots.
//! Nothing here can fail a test: sink errors are logged and dropped.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub trait Reporter: fmt::Debug {
    /// Record that a named step is starting.
    fn step(&self, name: &str);

    /// Attach a PNG image to the report.
    fn attach_png(&self, name: &str, png: &[u8]);
}

/// Reports through the `log` facade only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn step(&self, name: &str) {
        info!("step: {}", name);
    }

    fn attach_png(&self, name: &str, png: &[u8]) {
        info!("attachment {:?} ({} bytes, not stored)", name, png.len());
    }
}

/// Writes attachments as `<name>.png` files into a directory.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    dir: PathBuf,
}

impl ArtifactDir {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File an attachment with this name is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let file: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.png", file))
    }
}

impl Reporter for ArtifactDir {
    fn step(&self, name: &str) {
        info!("step: {}", name);
    }

    fn attach_png(&self, name: &str, png: &[u8]) {
        let path = self.path_for(name);
        let written = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, png));
        match written {
            Ok(()) => info!("saved screenshot {}", path.display()),
            Err(e) => warn!("failed to save screenshot {}: {}", path.display(), e),
        }
    }
}
