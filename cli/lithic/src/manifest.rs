//! `lithic.toml` manifest parsing and project configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use lithic_defines::DefineMap;
use lithic_linkage::ScaffoldOptions;
use lithic_targets::{parse as target_files, Target, TargetError};

/// The top-level manifest structure for a lithic project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LithicManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Build configuration.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Build configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Default target name or triple.
    #[serde(default)]
    pub target: Option<String>,
    /// Whether this build exposes public C symbol names.
    #[serde(default)]
    pub public_packaging: bool,
    /// Internal implementation namespace override.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Extra attribute for bound declarations.
    #[serde(default)]
    pub extra_attribute: Option<String>,
    /// Extra preprocessor defines; an empty value means defined with no
    /// value.
    #[serde(default)]
    pub defines: BTreeMap<String, String>,
    /// C signatures of the functions this build scaffolds.
    #[serde(default)]
    pub functions: Vec<String>,
}

impl LithicManifest {
    /// Parse a manifest from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing lithic.toml")
    }

    /// Search upward from `start_dir` for a `lithic.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("lithic.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest =
                    Self::parse(&content).with_context(|| format!("in {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// The default target name from the manifest.
    pub fn default_target(&self) -> Option<&str> {
        self.build.target.as_deref()
    }

    /// The manifest's extra defines as a define table.
    pub fn define_map(&self) -> Result<DefineMap> {
        let mut map = DefineMap::new();
        for (name, value) in &self.build.defines {
            if value.is_empty() {
                map.define(name.clone())?;
            } else {
                map.define_value(name.clone(), value.clone())?;
            }
        }
        Ok(map)
    }

    /// Scaffold options derived from the manifest.
    pub fn scaffold_options(&self) -> ScaffoldOptions {
        let mut opts = ScaffoldOptions::default();
        if let Some(ns) = &self.build.namespace {
            opts.namespace = ns.clone();
        }
        opts.extra_attribute = self.build.extra_attribute.clone();
        opts
    }

    /// Generate the default template for `lithic init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"

[build]
target = "linux-x86_64"
public-packaging = false
"#
        )
    }
}

/// Resolve a target name: built-in catalog, then target triple, then a
/// `targets/<name>.target.toml` file in the project directory.
pub fn resolve_target(project_dir: Option<&Path>, name: &str) -> Result<Target> {
    match Target::resolve(name) {
        Ok(target) => Ok(target),
        Err(e @ (TargetError::UnknownTarget { .. } | TargetError::UnknownTriple { .. })) => {
            if let Some(dir) = project_dir {
                let path = dir.join("targets").join(format!("{name}.target.toml"));
                if path.is_file() {
                    return target_files::load_target_toml(&path)
                        .with_context(|| format!("loading {}", path.display()));
                }
            }
            if matches!(e, TargetError::UnknownTriple { .. }) {
                return Err(e.into());
            }
            bail!("unknown target: '{name}'. Use 'lithic target list' to see available targets.")
        }
        Err(e) => Err(e.into()),
    }
}
