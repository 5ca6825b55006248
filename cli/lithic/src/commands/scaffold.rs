//! `lithic scaffold` — function export scaffolding.

use std::path::Path;

use anyhow::{bail, Context, Result};

use lithic_linkage::{CSignature, ExportMode, Scaffold, ScaffoldOptions};
use lithic_targets::Target;

use crate::manifest::{resolve_target, LithicManifest};

/// Print the export scaffold for one C function signature.
///
/// Public packaging comes from the `--public-packaging` flag or the
/// manifest; the scaffold options (namespace, extra attribute) come from
/// the manifest when one is present.
pub fn run(
    project_dir: Option<&Path>,
    manifest: Option<&LithicManifest>,
    signature: &str,
    target_name: &str,
    public_packaging: bool,
) -> Result<()> {
    let target = resolve_target(project_dir, target_name)?;
    let (mode, opts) = build_config(manifest, public_packaging, &target);

    print!("{}", render_one(signature, mode, &opts)?);
    Ok(())
}

/// Print scaffolds for every function listed in the manifest.
pub fn run_all(
    project_dir: Option<&Path>,
    manifest: &LithicManifest,
    target_name: &str,
    public_packaging: bool,
) -> Result<()> {
    if manifest.build.functions.is_empty() {
        bail!("no functions listed in lithic.toml (build.functions)");
    }
    let target = resolve_target(project_dir, target_name)?;
    let (mode, opts) = build_config(Some(manifest), public_packaging, &target);

    for signature in &manifest.build.functions {
        print!("{}", render_one(signature, mode, &opts)?);
        println!();
    }
    Ok(())
}

fn build_config(
    manifest: Option<&LithicManifest>,
    public_packaging: bool,
    target: &Target,
) -> (ExportMode, ScaffoldOptions) {
    let public = public_packaging || manifest.map(|m| m.build.public_packaging).unwrap_or(false);
    let mode = ExportMode::select(public, target);
    let opts = manifest.map(|m| m.scaffold_options()).unwrap_or_default();
    (mode, opts)
}

fn render_one(signature: &str, mode: ExportMode, opts: &ScaffoldOptions) -> Result<String> {
    let sig = CSignature::parse(signature)
        .with_context(|| format!("in signature '{signature}'"))?;
    let scaffold = Scaffold::generate(&sig, mode, opts)?;
    Ok(format!(
        "// {}: export mode {}\n{}\n",
        scaffold.public_symbol,
        scaffold.mode,
        scaffold.render()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_for_public_linux() {
        run(None, None, "double sin(double x)", "linux-x86_64", true).unwrap();
    }

    #[test]
    fn scaffold_for_gpu() {
        run(None, None, "double sin(double x)", "nvptx64", true).unwrap();
    }

    #[test]
    fn scaffold_rejects_bad_signature() {
        assert!(run(None, None, "not a signature", "linux-x86_64", false).is_err());
    }

    #[test]
    fn render_one_shapes() {
        let opts = ScaffoldOptions::default();
        let text = render_one("double sin(double x)", ExportMode::PublicAliased, &opts).unwrap();
        assert!(text.contains("__asm__(\"sin\")"));
        assert!(text.contains("[[gnu::alias(\"sin\")]]"));

        let text = render_one("double sin(double x)", ExportMode::Private, &opts).unwrap();
        assert_eq!(text, "// sin: export mode private\ndouble sin(double x)\n");
    }

    #[test]
    fn manifest_enables_public_packaging() {
        let manifest = LithicManifest::parse(
            "[project]\nname = \"t\"\n[build]\npublic-packaging = true\n",
        )
        .unwrap();
        let (mode, _) = build_config(Some(&manifest), false, &Target::linux_aarch64());
        assert_eq!(mode, ExportMode::PublicAliased);
    }

    #[test]
    fn run_all_uses_manifest_functions() {
        let manifest = LithicManifest::parse(
            "[project]\nname = \"t\"\n[build]\nfunctions = [\"double sin(double x)\"]\n",
        )
        .unwrap();
        run_all(None, &manifest, "linux-x86_64", true).unwrap();

        let empty = LithicManifest::parse("[project]\nname = \"t\"\n").unwrap();
        assert!(run_all(None, &empty, "linux-x86_64", true).is_err());
    }
}
