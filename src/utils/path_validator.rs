use crate::error::{Result, VerbumpError};
use std::path::{Component, Path, PathBuf};

const SYSTEM_DIRS: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// Resolves project directories and the files verbump reads or rewrites
/// inside them.
pub struct PathValidator;

impl PathValidator {
    /// Canonical project directory. System directories are refused.
    pub fn project_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let dir = path.canonicalize().map_err(|e| {
            VerbumpError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !dir.is_dir() {
            return Err(VerbumpError::ProjectValidation(format!(
                "Project path '{}' is not a directory",
                dir.display()
            )));
        }

        if let Some(system) = SYSTEM_DIRS.iter().find(|sys| Self::is_under(&dir, sys)) {
            return Err(VerbumpError::ProjectValidation(format!(
                "Refusing to edit files under system directory '{system}'"
            )));
        }

        Ok(dir)
    }

    /// An existing regular file at `relative` below the canonical `project`.
    pub fn existing_file(project: &Path, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let candidate = project.join(relative.as_ref());
        if !candidate.exists() {
            return Err(VerbumpError::ManifestNotFound(candidate.display().to_string()));
        }

        let file = candidate.canonicalize()?;
        if !file.starts_with(project) {
            return Err(VerbumpError::ProjectValidation(format!(
                "'{}' resolves outside the project directory",
                relative.as_ref().display()
            )));
        }
        if !file.is_file() {
            return Err(VerbumpError::ProjectValidation(format!(
                "'{}' is not a file",
                file.display()
            )));
        }

        Ok(file)
    }

    /// A file below `project` that may not exist yet, such as a README that
    /// is about to be generated. `relative` must be a plain relative path.
    pub fn writable_file(project: &Path, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let relative = relative.as_ref();
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !plain {
            return Err(VerbumpError::ProjectValidation(format!(
                "'{}' must be a path inside the project directory",
                relative.display()
            )));
        }

        let target = project.join(relative);
        if target.exists() {
            return Self::existing_file(project, relative);
        }
        Ok(target)
    }

    fn is_under(dir: &Path, system: &str) -> bool {
        let system = Path::new(system);
        dir.starts_with(system)
            || system
                .canonicalize()
                .is_ok_and(|canonical| dir.starts_with(canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn project_dir_is_canonical() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("app");
        fs::create_dir(&nested).unwrap();
        let resolved = PathValidator::project_dir(nested.join("..").join("app")).unwrap();
        assert_eq!(resolved, nested.canonicalize().unwrap());
    }

    #[test]
    fn project_dir_must_be_a_directory() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("pyproject.toml");
        fs::write(&manifest, "version = \"1.0.0\"").unwrap();
        let err = PathValidator::project_dir(&manifest).unwrap_err();
        assert!(matches!(err, VerbumpError::ProjectValidation(_)));
    }

    #[test]
    fn project_dir_refuses_system_directories() {
        assert!(PathValidator::project_dir("/etc").is_err());
    }

    #[test]
    fn missing_manifest_is_reported_as_such() {
        let dir = tempdir().unwrap();
        let project = PathValidator::project_dir(dir.path()).unwrap();
        let err = PathValidator::existing_file(&project, "pyproject.toml").unwrap_err();
        assert!(matches!(err, VerbumpError::ManifestNotFound(_)));
    }

    #[test]
    fn manifest_outside_project_is_refused() {
        let outer = tempdir().unwrap();
        let project = outer.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(outer.path().join("pyproject.toml"), "version = \"1.0.0\"").unwrap();

        let project = PathValidator::project_dir(&project).unwrap();
        let result = PathValidator::existing_file(&project, "../pyproject.toml");
        assert!(matches!(result, Err(VerbumpError::ProjectValidation(_))));
    }

    #[test]
    fn manifest_must_be_a_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pyproject.toml")).unwrap();
        let project = PathValidator::project_dir(dir.path()).unwrap();
        assert!(PathValidator::existing_file(&project, "pyproject.toml").is_err());
    }

    #[test]
    fn writable_file_allows_new_files_only_inside_project() {
        let dir = tempdir().unwrap();
        let project = PathValidator::project_dir(dir.path()).unwrap();

        let readme = PathValidator::writable_file(&project, "README.md").unwrap();
        assert_eq!(readme, project.join("README.md"));
        assert!(PathValidator::writable_file(&project, "../README.md").is_err());
        assert!(PathValidator::writable_file(&project, "/tmp/README.md").is_err());
    }
}
