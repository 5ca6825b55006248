//! `lithic probe` — definedness test over a define table.

use std::path::Path;

use anyhow::{Context, Result};

use lithic_defines::DefineMap;

use crate::manifest::LithicManifest;

/// Report whether a symbol is defined under the given defines.
///
/// The table is the manifest's defines (when a manifest is present) with
/// `-D` flags applied on top, the same table `lithic emit` starts from.
pub fn run(
    _project_dir: Option<&Path>,
    manifest: Option<&LithicManifest>,
    symbol: &str,
    defines: &[String],
) -> Result<()> {
    let mut map = match manifest {
        Some(manifest) => manifest.define_map()?,
        None => DefineMap::new(),
    };
    for flag in defines {
        map.apply_flag(flag)
            .with_context(|| format!("in -D{flag}"))?;
    }

    println!("{}", report(&map, symbol));
    Ok(())
}

pub(crate) fn report(map: &DefineMap, symbol: &str) -> String {
    if !map.is_defined(symbol) {
        return format!("{symbol}: undefined");
    }
    match map.lookup(symbol) {
        Some(Some(value)) => format!("{symbol}: defined (= {value})"),
        _ => format!("{symbol}: defined (no value)"),
    }
}
