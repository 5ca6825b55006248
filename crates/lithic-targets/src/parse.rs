//! TOML parsing, serialization, validation, and discovery for target files.
//!
//! Custom targets are stored as `.target.toml` files in the `targets/`
//! directory of a project. This module loads, validates, serializes, and
//! discovers those files.

use std::path::{Path, PathBuf};

use crate::error::{Result, TargetError};
use crate::target::Target;

/// A validation issue found in a target definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a target from a `.target.toml` file.
pub fn load_target_toml(path: &Path) -> Result<Target> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_target_toml(&content)
}

/// Parse a target from a TOML string.
pub fn parse_target_toml(toml_str: &str) -> Result<Target> {
    let target: Target = toml::from_str(toml_str)?;
    Ok(target)
}

/// Serialize a target to pretty TOML.
pub fn target_to_toml(target: &Target) -> Result<String> {
    let toml_str = toml::to_string_pretty(target)?;
    Ok(toml_str)
}

/// Validate a target definition for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_target(target: &Target) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Name must be non-empty and machine-friendly
    if target.name.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "target name is empty".into(),
        });
    } else if target.name.chars().any(|c| c.is_whitespace()) {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("target name '{}' contains whitespace", target.name),
        });
    }

    // 2. GPU architectures run device code with no host OS visible
    if target.arch.is_gpu() && !target.os.is_none() {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!(
                "GPU architecture '{}' cannot be paired with OS '{}' (expected 'none')",
                target.arch, target.os
            ),
        });
    }

    // 3. A hosted CPU with no OS is unusual but legal (freestanding builds)
    if !target.arch.is_gpu() && target.os.is_none() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!(
                "CPU architecture '{}' with OS 'none': freestanding build assumed",
                target.arch
            ),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.target.toml` for a new target.
///
/// Seeds from linux-x86_64 with the given custom name.
pub fn generate_template(name: &str) -> Result<String> {
    let mut target = Target::linux_x86_64();
    target.name = name.into();
    target_to_toml(&target)
}

/// Discover all `.target.toml` files in a project's `targets/` directory.
///
/// Returns a list of (target_name, file_path) pairs.
pub fn discover_targets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let targets_dir = project_dir.join("targets");
    if !targets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    let entries = std::fs::read_dir(&targets_dir)?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with(".target.toml") {
                let name = file_name.strip_suffix(".target.toml").unwrap().to_string();
                targets.push((name, path));
            }
        }
    }
    targets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Arch;
    use crate::os::Os;

    #[test]
    fn round_trip_builtins() {
        for original in Target::builtins() {
            let toml_str = target_to_toml(&original).unwrap();
            let parsed = parse_target_toml(&toml_str).unwrap();
            assert_eq!(original, parsed);
        }
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
name = "my-board"
arch = "aarch64"
os = "linux"
"#;
        let target = parse_target_toml(toml_str).unwrap();
        assert_eq!(target.name, "my-board");
        assert_eq!(target.arch, Arch::Aarch64);
        assert_eq!(target.os, Os::Linux);
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_target_toml("this is not valid toml [[[").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_target_toml("name = \"incomplete\"").is_err());
    }

    #[test]
    fn parse_unknown_arch_returns_error() {
        let toml_str = r#"
name = "odd"
arch = "riscv64"
os = "linux"
"#;
        assert!(parse_target_toml(toml_str).is_err());
    }

    #[test]
    fn validate_builtins() {
        for target in Target::builtins() {
            assert!(validate_target(&target).is_ok(), "{}", target.name);
        }
    }

    #[test]
    fn validate_gpu_with_hosted_os() {
        let target = Target::new("bad-gpu", Arch::Nvptx64, Os::Linux);
        let issues = validate_target(&target).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("GPU")));
    }

    #[test]
    fn validate_empty_name() {
        let target = Target::new("", Arch::X86_64, Os::Linux);
        let issues = validate_target(&target).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("empty")));
    }

    #[test]
    fn freestanding_is_warning() {
        let target = Target::new("bare-arm", Arch::Arm, Os::None);
        let issues = validate_target(&target).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, "warning");
    }

    #[test]
    fn generate_template_is_valid() {
        let toml_str = generate_template("my-custom-board").unwrap();
        let target = parse_target_toml(&toml_str).unwrap();
        assert_eq!(target.name, "my-custom-board");
        assert!(validate_target(&target).is_ok());
    }

    #[test]
    fn discover_targets_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        let targets_dir = dir.path().join("targets");
        std::fs::create_dir_all(&targets_dir).unwrap();

        let template = generate_template("board-a").unwrap();
        std::fs::write(targets_dir.join("board-a.target.toml"), &template).unwrap();
        std::fs::write(targets_dir.join("board-b.target.toml"), &template).unwrap();
        // Non-.target.toml file should be ignored
        std::fs::write(targets_dir.join("notes.txt"), "ignore me").unwrap();

        let targets = discover_targets(dir.path()).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].0, "board-a");
        assert_eq!(targets[1].0, "board-b");
    }

    #[test]
    fn discover_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let targets = discover_targets(dir.path()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn load_not_found() {
        let result = load_target_toml(Path::new("/nonexistent/path.target.toml"));
        assert!(matches!(result.unwrap_err(), TargetError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.target.toml");
        let template = generate_template("file-test").unwrap();
        std::fs::write(&path, &template).unwrap();

        let target = load_target_toml(&path).unwrap();
        assert_eq!(target.name, "file-test");
    }
}
