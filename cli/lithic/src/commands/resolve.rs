//! `lithic resolve` — capability classification report.

use std::path::Path;

use anyhow::{bail, Result};

use lithic_fputil::FpCapabilities;
use lithic_targets::Target;

use crate::manifest::resolve_target;

/// Print the derived capability flags for a target.
pub fn run(project_dir: Option<&Path>, name: &str, format: Option<&str>) -> Result<()> {
    let target = resolve_target(project_dir, name)?;
    let caps = FpCapabilities::classify(&target);

    match format.unwrap_or("human") {
        "human" => {
            println!("{}", human_report(&target, &caps));
        }
        "json" => {
            println!("{}", json_report(&target, &caps)?);
        }
        other => bail!("unknown report format '{other}' (expected 'human' or 'json')"),
    }
    Ok(())
}

fn human_report(target: &Target, caps: &FpCapabilities) -> String {
    format!(
        "{}\n\
           x87 FPU:                  {}\n\
           long double is double:    {}\n\
           special x86 long double:  {}\n\
           long double format:       {:?}",
        target,
        caps.has_x87_fpu,
        caps.long_double_is_double,
        caps.special_x86_long_double,
        caps.long_double_format()
    )
}

fn json_report(target: &Target, caps: &FpCapabilities) -> Result<String> {
    let value = serde_json::json!({
        "target": target,
        "capabilities": caps,
        "long-double-format": caps.long_double_format(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_human_and_json() {
        run(None, "linux-x86_64", None).unwrap();
        run(None, "darwin-aarch64", Some("json")).unwrap();
        assert!(run(None, "linux-x86_64", Some("yaml")).is_err());
    }

    #[test]
    fn json_report_contains_flags() {
        let target = Target::linux_x86_64();
        let caps = FpCapabilities::classify(&target);
        let json = json_report(&target, &caps).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["capabilities"]["has-x87-fpu"], true);
        assert_eq!(value["capabilities"]["long-double-is-double"], false);
        assert_eq!(value["capabilities"]["special-x86-long-double"], true);
        assert_eq!(value["long-double-format"], "x87-extended");
    }

    #[test]
    fn human_report_mentions_format() {
        let target = Target::linux_aarch64();
        let caps = FpCapabilities::classify(&target);
        assert!(human_report(&target, &caps).contains("Native"));
    }
}
