use crate::error::{Result, VerbumpError};
use crate::utils::{PathValidator, verbose};
use jiff::Zoned;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Records a release in the Git repository that contains the project.
pub struct VersionControlAgent {
    project_path: PathBuf,
}

impl VersionControlAgent {
    /// Fails unless `project_path` lies inside a Git work tree.
    pub fn new<P: AsRef<Path>>(project_path: P) -> Result<Self> {
        let project_path = PathValidator::project_dir(project_path)?;

        if !project_path.ancestors().any(|dir| dir.join(".git").exists()) {
            return Err(VerbumpError::GitOperation(format!(
                "'{}' is not inside a Git repository",
                project_path.display()
            )));
        }

        Ok(Self { project_path })
    }

    pub fn is_working_directory_clean(&self) -> Result<bool> {
        let status = self.git("status", &["--porcelain"])?;
        Ok(status.trim().is_empty())
    }

    /// Stage a project file, refusing anything that resolves outside it
    pub fn stage_file(&self, file: &Path) -> Result<()> {
        let staged = PathValidator::existing_file(&self.project_path, file).map_err(|err| {
            VerbumpError::GitOperation(format!("Refusing to stage '{}': {err}", file.display()))
        })?;

        let relative = staged
            .strip_prefix(&self.project_path)
            .unwrap_or(&staged)
            .to_string_lossy()
            .into_owned();

        self.git("add", &["--", &relative])?;
        Ok(())
    }

    pub fn commit_release(&self, version: &str) -> Result<()> {
        self.git("commit", &["-m", &release_commit_message(version)])?;
        Ok(())
    }

    /// Create an annotated `v<version>` tag on HEAD, returning the tag name
    pub fn tag_release(&self, version: &str) -> Result<String> {
        let tag = release_tag_name(version)?;
        let date = Zoned::now().strftime("%Y-%m-%d").to_string();

        self.git(
            "tag",
            &["-a", &tag, "-m", &format!("Release {version} ({date})")],
        )?;
        Ok(tag)
    }

    /// Stage the manifest, commit, and optionally tag
    pub fn record_release(
        &self,
        manifest: &Path,
        version: &str,
        tag: bool,
    ) -> Result<Option<String>> {
        self.stage_file(manifest)?;
        self.commit_release(version)?;
        if tag {
            return self.tag_release(version).map(Some);
        }
        Ok(None)
    }

    /// Runs `git <subcommand> <args>` in the project and returns its stdout.
    fn git(&self, subcommand: &str, args: &[&str]) -> Result<String> {
        if verbose() {
            eprintln!("[VERBOSE] git {subcommand} {}", args.join(" "));
        }

        let output = Command::new("git")
            .current_dir(&self.project_path)
            .arg(subcommand)
            .args(args)
            .output()
            .map_err(|e| VerbumpError::GitOperation(format!("Could not run git {subcommand}: {e}")))?;

        if !output.status.success() {
            return Err(VerbumpError::GitOperation(format!(
                "git {subcommand} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn release_commit_message(version: &str) -> String {
    format!("chore(release): {version}")
}

/// `v<version>` with characters Git refuses in ref names replaced by `-`.
fn release_tag_name(version: &str) -> Result<String> {
    let tag: String = format!("v{version}")
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '+' => c,
            _ => '-',
        })
        .collect();

    if tag.contains("..") || tag.ends_with('.') || tag.ends_with(".lock") {
        return Err(VerbumpError::GitOperation(format!(
            "'{tag}' is not a valid tag name"
        )));
    }

    Ok(tag)
}
