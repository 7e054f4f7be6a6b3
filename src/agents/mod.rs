pub mod manifest_file;
pub mod project_configurator;
pub mod version_control;

pub use manifest_file::{ManifestChange, ManifestFile};
pub use project_configurator::{ConfigureReport, FileOutcome, ProjectConfigurator, ProjectSettings};
pub use version_control::VersionControlAgent;
