//! `lithic emit` — generated platform-defines header.

use std::path::Path;

use anyhow::{Context, Result};

use lithic_defines::{render_header, DefineMap};
use lithic_fputil::FpCapabilities;
use lithic_targets::Target;

use crate::manifest::{resolve_target, LithicManifest};

const DEFAULT_GUARD: &str = "LITHIC_PLATFORM_DEFS_H";

/// Render the platform-defines header for a target.
///
/// The table contains the classifier's capability defines plus any extra
/// defines from the manifest and from `-D` flags (later sources win).
pub fn run(
    project_dir: Option<&Path>,
    manifest: Option<&LithicManifest>,
    target_name: &str,
    guard: Option<&str>,
    defines: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let target = resolve_target(project_dir, target_name)?;
    let header = render(&target, manifest, guard, defines)?;

    match output {
        Some(path) => {
            std::fs::write(path, &header)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{header}"),
    }
    Ok(())
}

pub(crate) fn render(
    target: &Target,
    manifest: Option<&LithicManifest>,
    guard: Option<&str>,
    defines: &[String],
) -> Result<String> {
    let mut map = match manifest {
        Some(manifest) => manifest.define_map()?,
        None => DefineMap::new(),
    };

    let caps = FpCapabilities::classify(target);
    caps.apply_defines(&mut map)?;

    for flag in defines {
        map.apply_flag(flag)
            .with_context(|| format!("in -D{flag}"))?;
    }

    Ok(render_header(guard.unwrap_or(DEFAULT_GUARD), &map))
}
