use crate::agents::{
    FileOutcome, ManifestChange, ManifestFile, ProjectConfigurator, ProjectSettings,
    VersionControlAgent,
};
use crate::agents::project_configurator::RELEASE_WORKFLOW;
use crate::error::{Result, VerbumpError};
use crate::release::{BumpLevel, BumpStrategy, DefaultBumpStrategy, VersionComparator};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct VersionReport {
    file: String,
    version: String,
    found: bool,
}

/// Print the manifest's current version
pub fn execute_read<P: AsRef<Path>>(project_path: P, file: &str, json: bool) -> Result<()> {
    let manifest = ManifestFile::open(project_path, file)?;
    let version = manifest.current_version();

    if json {
        let report = VersionReport {
            file: manifest.relative_path().display().to_string(),
            version,
            found: manifest.has_version(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !manifest.has_version() {
        eprintln!(
            "{}",
            format!(
                "⚠️  No version assignment in {}, using fallback",
                manifest.relative_path().display()
            )
            .yellow()
        );
    }

    println!("{version}");
    Ok(())
}

/// Write an exact version into the manifest
pub fn execute_set<P: AsRef<Path>>(
    project_path: P,
    file: &str,
    version: &str,
    dry_run: bool,
) -> Result<()> {
    if version.is_empty() || version.contains('"') {
        return Err(VerbumpError::InvalidVersion(format!(
            "'{version}' cannot be stored in a quoted assignment"
        )));
    }

    let mut manifest = ManifestFile::open(project_path, file)?;
    if !manifest.has_version() {
        return Err(VerbumpError::ProjectValidation(format!(
            "No version assignment found in {}",
            manifest.relative_path().display()
        )));
    }
    let current = manifest.current_version();

    if current != version && !VersionComparator::is_newer(version, &current) {
        println!(
            "{}",
            format!("⚠️  {version} is not newer than {current}").yellow()
        );
    }

    let change = manifest.apply(version);
    write_change(&mut manifest, &change, dry_run)
}

/// Compute the next version, write it, and optionally commit and tag it
pub fn execute_bump<P: AsRef<Path>>(
    project_path: P,
    file: &str,
    level: BumpLevel,
    pre_id: &str,
    dry_run: bool,
    commit: bool,
    tag: bool,
) -> Result<()> {
    let commit = commit || tag;

    println!("{}", format!("Bumping {level} version...").cyan().bold());

    println!("\n{}", "1. Reading manifest...".yellow());
    let mut manifest = ManifestFile::open(project_path, file)?;
    if !manifest.has_version() {
        return Err(VerbumpError::ProjectValidation(format!(
            "No version assignment found in {}",
            manifest.relative_path().display()
        )));
    }
    let current = manifest.current_version();
    println!("   Current version: {}", current.bright_cyan());

    let vcs = if commit && !dry_run {
        let agent = VersionControlAgent::new(manifest.project_path())?;
        if !agent.is_working_directory_clean()? {
            return Err(VerbumpError::GitOperation(
                "Working directory has uncommitted changes".to_string(),
            ));
        }
        Some(agent)
    } else {
        None
    };

    println!("\n{}", "2. Computing next version...".yellow());
    let strategy: Arc<dyn BumpStrategy> = DefaultBumpStrategy::shared(pre_id);
    let next = strategy.next_version(&current, level)?;
    println!("   {} → {}", current.dimmed(), next.green().bold());

    println!("\n{}", "3. Writing manifest...".yellow());
    let change = manifest.apply(&next);
    write_change(&mut manifest, &change, dry_run)?;

    if let Some(agent) = vcs {
        println!("\n{}", "4. Recording release in Git...".yellow());
        let relative = manifest.relative_path().to_path_buf();
        match agent.record_release(&relative, &next, tag)? {
            Some(tag_name) => println!("{}", format!("✓ Committed and tagged {tag_name}").green()),
            None => println!("{}", "✓ Committed release".green()),
        }
    }

    println!("\n{}", "✨ Version bumped successfully!".green().bold());
    Ok(())
}

fn write_change(manifest: &mut ManifestFile, change: &ManifestChange, dry_run: bool) -> Result<()> {
    let file = manifest.relative_path().display().to_string();

    if !change.changed {
        println!("{}", format!("{file} already at {}", change.next).yellow());
        return Ok(());
    }

    if dry_run {
        println!(
            "{}",
            format!(
                "Dry run: {} would change {} → {}",
                file, change.previous, change.next
            )
            .dimmed()
        );
        return Ok(());
    }

    manifest.save(change)?;
    println!(
        "{}",
        format!("✓ Updated {file}: {} → {}", change.previous, change.next).green()
    );

    Ok(())
}

/// Stamp a new project's name and description over the template metadata
pub fn execute_configure<P: AsRef<Path>>(
    project_path: P,
    file: &str,
    name: &str,
    description: &str,
    keep_docs: bool,
    dry_run: bool,
) -> Result<()> {
    let settings = ProjectSettings::new(name, description)?;

    println!("{}", "Configuring project metadata...".cyan().bold());

    let mut configurator = ProjectConfigurator::new(project_path, file)?;
    let manifest = configurator.manifest().relative_path().display().to_string();
    let report = configurator.configure(&settings, !keep_docs, dry_run)?;

    let prefix = if dry_run { "Dry run: would update" } else { "✓ Updated" };

    if report.fields_updated == 0 {
        println!(
            "{}",
            format!("⚠️  No name or description assignments changed in {manifest}").yellow()
        );
    } else {
        println!(
            "{}",
            format!("{prefix} {} field(s) in {manifest}", report.fields_updated).green()
        );
    }

    match report.workflow {
        FileOutcome::Updated => println!("{}", format!("{prefix} {RELEASE_WORKFLOW}").green()),
        FileOutcome::Unchanged => {}
        FileOutcome::Missing => {
            println!("{}", format!("⚠️  {RELEASE_WORKFLOW} not found").yellow())
        }
    }

    if report.docs_reset {
        println!("{}", format!("{prefix} README.md and CHANGELOG.md").green());
    }

    println!("\n{}", "✨ Project configured!".green().bold());
    Ok(())
}
