use crate::agents::ManifestFile;
use crate::error::{Result, VerbumpError};
use crate::fields;
use crate::utils::{PathValidator, verbose};
use std::fs;
use std::path::{Path, PathBuf};

/// Tables whose `name` and `description` describe the package.
pub const METADATA_TABLES: &[&str] = &["project", "tool.poetry"];
pub const RELEASE_WORKFLOW: &str = ".github/workflows/release-please.yml";
pub const PROJECT_NAME_PLACEHOLDER: &str = "${project_name}";

/// Name and description stamped into a freshly generated project.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    pub name: String,
    pub description: String,
}

impl ProjectSettings {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let settings = Self {
            name: name.into(),
            description: description.into(),
        };
        check_value("name", &settings.name)?;
        check_value("description", &settings.description)?;
        Ok(settings)
    }
}

fn check_value(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VerbumpError::InvalidField(format!("{field} must not be empty")));
    }
    if value.contains(['"', '\n', '\r']) {
        return Err(VerbumpError::InvalidField(format!(
            "{field} cannot contain quotes or line breaks"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureReport {
    pub fields_updated: usize,
    pub workflow: FileOutcome,
    pub docs_reset: bool,
}

/// Rewrites a template project's metadata to describe a new project.
pub struct ProjectConfigurator {
    manifest: ManifestFile,
}

impl ProjectConfigurator {
    pub fn new<P: AsRef<Path>>(project_path: P, manifest: &str) -> Result<Self> {
        Ok(Self {
            manifest: ManifestFile::open(project_path, manifest)?,
        })
    }

    pub fn manifest(&self) -> &ManifestFile {
        &self.manifest
    }

    /// Applies `settings` to the manifest and release workflow, and when
    /// `reset_docs` is set writes a fresh README and empties the CHANGELOG.
    /// With `dry_run` nothing is written but the report is the same.
    pub fn configure(
        &mut self,
        settings: &ProjectSettings,
        reset_docs: bool,
        dry_run: bool,
    ) -> Result<ConfigureReport> {
        let named = fields::write_field(
            self.manifest.contents(),
            METADATA_TABLES,
            "name",
            &settings.name,
        )?;
        let described = fields::write_field(
            &named.contents,
            METADATA_TABLES,
            "description",
            &settings.description,
        )?;

        if !dry_run {
            self.manifest.replace_contents(&described.contents)?;
        }

        let workflow = self.configure_workflow(&settings.name, dry_run)?;

        if reset_docs && !dry_run {
            self.reset_docs(settings)?;
        }

        Ok(ConfigureReport {
            fields_updated: named.replaced + described.replaced,
            workflow,
            docs_reset: reset_docs,
        })
    }

    fn configure_workflow(&self, name: &str, dry_run: bool) -> Result<FileOutcome> {
        let project = self.manifest.project_path();
        let path = match PathValidator::existing_file(project, RELEASE_WORKFLOW) {
            Ok(path) => path,
            Err(VerbumpError::ManifestNotFound(_)) => return Ok(FileOutcome::Missing),
            Err(err) => return Err(err),
        };

        let contents = fs::read_to_string(&path)?;
        if !contents.contains(PROJECT_NAME_PLACEHOLDER) {
            return Ok(FileOutcome::Unchanged);
        }

        if !dry_run {
            fs::write(&path, contents.replace(PROJECT_NAME_PLACEHOLDER, name))?;
        }
        Ok(FileOutcome::Updated)
    }

    fn reset_docs(&self, settings: &ProjectSettings) -> Result<()> {
        let readme = self.doc_path("README.md")?;
        let changelog = self.doc_path("CHANGELOG.md")?;

        fs::write(&readme, readme_text(settings))?;
        fs::write(&changelog, "")?;
        Ok(())
    }

    fn doc_path(&self, name: &str) -> Result<PathBuf> {
        let path = PathValidator::writable_file(self.manifest.project_path(), name)?;
        if verbose() {
            eprintln!("[VERBOSE] Resetting {}", path.display());
        }
        Ok(path)
    }
}

fn readme_text(settings: &ProjectSettings) -> String {
    format!("# {}\n\n{}\n", settings.name, settings.description)
}
