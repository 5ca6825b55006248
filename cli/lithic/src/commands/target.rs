//! `lithic target` — target listing, description, and validation.

use std::path::Path;

use anyhow::{bail, Context, Result};

use lithic_fputil::FpCapabilities;
use lithic_linkage::ExportMode;
use lithic_targets::{parse as target_files, Target};

use crate::manifest::resolve_target;

/// List built-in targets and any custom targets in the project.
pub fn list(project_dir: Option<&Path>) -> Result<()> {
    println!("Built-in targets:");
    println!();
    for target in Target::builtins() {
        println!("  {:<18} {} / {}", target.name, target.arch, target.os);
    }

    if let Some(dir) = project_dir {
        let custom = target_files::discover_targets(dir)?;
        if !custom.is_empty() {
            println!();
            println!("Custom targets (targets/):");
            println!();
            for (name, path) in custom {
                println!("  {:<18} {}", name, path.display());
            }
        }
    }

    println!();
    println!("Use 'lithic target describe <name>' for details.");
    Ok(())
}

/// Describe a target in detail.
pub fn describe(name: &str, project_dir: Option<&Path>, format: Option<&str>) -> Result<()> {
    let target = resolve_target(project_dir, name)?;

    if format == Some("toml") {
        print!("{}", target_files::target_to_toml(&target)?);
        return Ok(());
    }

    let caps = FpCapabilities::classify(&target);

    println!("=== Target: {} ===", target.name);
    println!("  Arch:      {}", target.arch);
    println!("  OS:        {}", target.os);
    println!("  Word size: {} bits", target.arch.word_size());
    println!();

    println!("--- Floating point ---");
    println!("  x87 FPU:                  {}", caps.has_x87_fpu);
    println!("  long double is double:    {}", caps.long_double_is_double);
    println!("  special x86 long double:  {}", caps.special_x86_long_double);
    println!("  long double format:       {:?}", caps.long_double_format());
    println!();

    println!("--- Symbol export ---");
    println!(
        "  public packaging: {}",
        ExportMode::select(true, &target)
    );
    println!(
        "  internal build:   {}",
        ExportMode::select(false, &target)
    );

    Ok(())
}

/// Write a template `.target.toml` for a new custom target.
pub fn add(name: &str, project_dir: &Path) -> Result<()> {
    let targets_dir = project_dir.join("targets");
    std::fs::create_dir_all(&targets_dir).context("creating targets/ directory")?;

    let path = targets_dir.join(format!("{name}.target.toml"));
    if path.exists() {
        bail!("target file already exists: {}", path.display());
    }

    let template = target_files::generate_template(name)?;
    std::fs::write(&path, template).with_context(|| format!("writing {}", path.display()))?;

    println!("Created {}", path.display());
    println!("Edit the arch/os fields, then run 'lithic target validate {name}'.");
    Ok(())
}

/// Validate a target definition and report issues.
pub fn validate(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let target = resolve_target(project_dir, name)?;

    match target_files::validate_target(&target) {
        Ok(()) => {
            println!("{}: OK", target.name);
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("{}: {}: {}", target.name, issue.severity, issue.message);
            }
            if issues.iter().any(|i| i.severity == "error") {
                bail!("target '{}' failed validation", target.name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_without_project() {
        list(None).unwrap();
    }

    #[test]
    fn describe_known_target() {
        describe("linux-x86_64", None, None).unwrap();
        describe("nvptx64", None, Some("toml")).unwrap();
    }

    #[test]
    fn describe_unknown_target() {
        assert!(describe("nonexistent", None, None).is_err());
    }

    #[test]
    fn add_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        add("my-board", dir.path()).unwrap();
        assert!(dir.path().join("targets/my-board.target.toml").is_file());
        validate("my-board", Some(dir.path())).unwrap();

        // Second add refuses to overwrite
        assert!(add("my-board", dir.path()).is_err());
    }

    #[test]
    fn validate_rejects_gpu_with_hosted_os() {
        let dir = tempfile::tempdir().unwrap();
        let targets_dir = dir.path().join("targets");
        std::fs::create_dir_all(&targets_dir).unwrap();
        std::fs::write(
            targets_dir.join("bad-gpu.target.toml"),
            "name = \"bad-gpu\"\narch = \"nvptx64\"\nos = \"linux\"\n",
        )
        .unwrap();

        assert!(validate("bad-gpu", Some(dir.path())).is_err());
    }
}
