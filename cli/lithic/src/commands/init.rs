//! `lithic init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::LithicManifest;

/// Create a new lithic project at the given path.
///
/// `name` is the project name. The directory `name` is created relative to
/// cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("targets")).context("creating targets/ directory")?;
    fs::create_dir_all(project_dir.join("generated")).context("creating generated/ directory")?;

    let manifest_content = LithicManifest::template(name);
    fs::write(project_dir.join("lithic.toml"), &manifest_content)
        .context("writing lithic.toml")?;

    fs::write(project_dir.join(".gitignore"), "generated/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/lithic.toml");
    println!("  {name}/targets/");
    println!("  {name}/generated/");
    println!("  {name}/.gitignore");

    Ok(())
}
