//! `lithic doctor` — project and configuration diagnostics.

use std::path::Path;

use anyhow::Result;

use lithic_fputil::FpCapabilities;
use lithic_linkage::ExportMode;
use lithic_targets::parse as target_files;

use crate::manifest::{resolve_target, LithicManifest};

/// Print diagnostic information for the project in `project_dir`.
pub fn run(project_dir: &Path, target: Option<&str>) -> Result<()> {
    println!("=== Lithic Doctor ===");
    println!();

    println!("Lithic version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Project Status ---");
    let manifest = match LithicManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  lithic.toml: found at {}", dir.display());
            println!("  Project:     {}", manifest.project.name);
            println!(
                "  Packaging:   {}",
                if manifest.build.public_packaging {
                    "public"
                } else {
                    "internal (test build)"
                }
            );
            if let Some(default) = manifest.default_target() {
                println!("  Default target: {default}");
            }
            Some(manifest)
        }
        Ok(None) => {
            println!("  lithic.toml: not found");
            None
        }
        Err(e) => {
            println!("  lithic.toml: error — {e:#}");
            None
        }
    };

    println!();
    println!("--- Custom Targets ---");
    let custom = target_files::discover_targets(project_dir)?;
    if custom.is_empty() {
        println!("  none");
    }
    for (name, path) in custom {
        match target_files::load_target_toml(&path) {
            Ok(parsed) => match target_files::validate_target(&parsed) {
                Ok(()) => println!("  {name}: OK"),
                Err(issues) => {
                    for issue in issues {
                        println!("  {name}: {}: {}", issue.severity, issue.message);
                    }
                }
            },
            Err(e) => println!("  {name}: parse error — {e}"),
        }
    }

    // Target report: explicit --target wins over the manifest default
    let target_name = target
        .map(str::to_string)
        .or_else(|| manifest.as_ref().and_then(|m| m.default_target().map(str::to_string)));

    if let Some(target_name) = target_name {
        println!();
        println!("--- Target: {target_name} ---");
        match resolve_target(Some(project_dir), &target_name) {
            Ok(resolved) => {
                let caps = FpCapabilities::classify(&resolved);
                let public = manifest
                    .as_ref()
                    .map(|m| m.build.public_packaging)
                    .unwrap_or(false);
                let mode = ExportMode::select(public, &resolved);

                println!("  Arch/OS:            {} / {}", resolved.arch, resolved.os);
                println!("  long double format: {:?}", caps.long_double_format());
                println!("  Export mode:        {mode}");
                if public && resolved.is_apple() {
                    println!(
                        "  note: Apple targets do not support symbol aliasing; \
                         public packaging falls back to direct definitions"
                    );
                }
                if resolved.is_gpu() {
                    println!(
                        "  note: GPU target; public symbols are bound via assembler \
                         names, no aliases are emitted"
                    );
                }
            }
            Err(e) => println!("  error: {e:#}"),
        }
    }

    Ok(())
}
