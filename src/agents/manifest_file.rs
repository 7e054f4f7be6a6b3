use crate::error::{Result, VerbumpError};
use crate::updater;
use crate::utils::{PathValidator, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of applying a new version to a manifest in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestChange {
    pub previous: String,
    pub next: String,
    pub contents: String,
    pub changed: bool,
}

/// A manifest on disk whose version assignment is read and rewritten.
pub struct ManifestFile {
    project_path: PathBuf,
    manifest_path: PathBuf,
    contents: String,
}

impl ManifestFile {
    /// Opens `relative` inside `project_path` after validating both paths.
    pub fn open<P: AsRef<Path>, F: AsRef<Path>>(project_path: P, relative: F) -> Result<Self> {
        let project_path = PathValidator::project_dir(project_path)?;
        let manifest_path = PathValidator::existing_file(&project_path, relative)?;

        if verbose() {
            eprintln!("[VERBOSE] Reading manifest: {}", manifest_path.display());
        }

        let contents = fs::read_to_string(&manifest_path)?;

        Ok(Self {
            project_path,
            manifest_path,
            contents,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn path(&self) -> &Path {
        &self.manifest_path
    }

    /// Path of the manifest relative to the project directory.
    pub fn relative_path(&self) -> &Path {
        self.manifest_path
            .strip_prefix(&self.project_path)
            .unwrap_or(&self.manifest_path)
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn has_version(&self) -> bool {
        updater::has_version(&self.contents)
    }

    pub fn current_version(&self) -> String {
        updater::read_version(&self.contents)
    }

    /// Computes the manifest contents with `version` applied, without writing.
    ///
    /// Re-applying the current version is not a change, even when the
    /// assignment's spacing would be normalised.
    pub fn apply(&self, version: &str) -> ManifestChange {
        let previous = self.current_version();
        let changed = self.has_version() && previous != version;
        let contents = if changed {
            updater::write_version(&self.contents, version)
        } else {
            self.contents.clone()
        };

        ManifestChange {
            previous,
            next: version.to_string(),
            contents,
            changed,
        }
    }

    /// Writes `change` back to disk. Unchanged contents are not rewritten.
    pub fn save(&mut self, change: &ManifestChange) -> Result<bool> {
        if !self.has_version() {
            return Err(VerbumpError::ProjectValidation(format!(
                "No version assignment found in '{}'",
                self.manifest_path.display()
            )));
        }

        if !change.changed {
            if verbose() {
                eprintln!("[VERBOSE] Version already {}, nothing to write", change.next);
            }
            return Ok(false);
        }

        self.replace_contents(&change.contents)
    }

    /// Writes `contents` in place of the manifest. Returns false, without
    /// touching the file, when nothing differs.
    pub fn replace_contents(&mut self, contents: &str) -> Result<bool> {
        if contents == self.contents {
            return Ok(false);
        }

        fs::write(&self.manifest_path, contents)?;
        self.contents = contents.to_string();

        if verbose() {
            eprintln!(
                "[VERBOSE] Wrote {} bytes to {}",
                contents.len(),
                self.manifest_path.display()
            );
        }

        Ok(true)
    }
}
