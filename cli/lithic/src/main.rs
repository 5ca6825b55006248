//! Lithic CLI — build-support toolchain for a C standard library.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use manifest::LithicManifest;

#[derive(Parser)]
#[command(name = "lithic", version, about = "The lithic libc build-support toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new lithic project
    Init {
        /// Project name
        name: String,
    },
    /// Manage targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Print the derived capability flags for a target
    Resolve {
        /// Target name or triple (default: manifest build target)
        #[arg(long)]
        target: Option<String>,
        /// Report format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Render the generated platform-defines header
    Emit {
        /// Target name or triple (default: manifest build target)
        #[arg(long)]
        target: Option<String>,
        /// Include guard (default: LITHIC_PLATFORM_DEFS_H)
        #[arg(long)]
        guard: Option<String>,
        /// Extra define, NAME or NAME=VALUE (repeatable)
        #[arg(short = 'D', value_name = "NAME[=VALUE]")]
        define: Vec<String>,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the export scaffold for a C function signature
    Scaffold {
        /// C function signature, e.g. "double sin(double x)"
        signature: Option<String>,
        /// Scaffold every function listed in the manifest
        #[arg(long)]
        all: bool,
        /// Target name or triple (default: manifest build target)
        #[arg(long)]
        target: Option<String>,
        /// Enable public packaging regardless of the manifest
        #[arg(long)]
        public_packaging: bool,
    },
    /// Test whether a configuration symbol is defined
    Probe {
        /// Symbol name
        symbol: String,
        /// Extra define, NAME or NAME=VALUE (repeatable)
        #[arg(short = 'D', value_name = "NAME[=VALUE]")]
        define: Vec<String>,
    },
    /// Check project and configuration status
    Doctor {
        /// Check a specific target
        #[arg(long)]
        target: Option<String>,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List available targets
    List,
    /// Show details of a target
    Describe {
        /// Target name or triple
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Add a custom target definition
    Add {
        /// Target name
        name: String,
    },
    /// Validate a target definition
    Validate {
        /// Target name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Target { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or_else(|| cwd.clone());
            match action {
                TargetAction::List => commands::target::list(Some(&project_dir)),
                TargetAction::Describe { name, format } => {
                    commands::target::describe(&name, Some(&project_dir), format.as_deref())
                }
                TargetAction::Add { name } => commands::target::add(&name, &project_dir),
                TargetAction::Validate { name } => {
                    commands::target::validate(&name, Some(&project_dir))
                }
            }
        }

        Commands::Resolve { target, format } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let target = required_target(target, manifest.as_ref())?;
            commands::resolve::run(project_dir.as_deref(), &target, format.as_deref())
        }

        Commands::Emit {
            target,
            guard,
            define,
            output,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let target = required_target(target, manifest.as_ref())?;
            commands::emit::run(
                project_dir.as_deref(),
                manifest.as_ref(),
                &target,
                guard.as_deref(),
                &define,
                output.as_deref(),
            )
        }

        Commands::Scaffold {
            signature,
            all,
            target,
            public_packaging,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let target = required_target(target, manifest.as_ref())?;
            if all {
                let manifest = manifest
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("--all requires a lithic.toml manifest"))?;
                commands::scaffold::run_all(
                    project_dir.as_deref(),
                    manifest,
                    &target,
                    public_packaging,
                )
            } else {
                let signature = signature.ok_or_else(|| {
                    anyhow::anyhow!("pass a C function signature or use --all")
                })?;
                commands::scaffold::run(
                    project_dir.as_deref(),
                    manifest.as_ref(),
                    &signature,
                    &target,
                    public_packaging,
                )
            }
        }

        Commands::Probe { symbol, define } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            commands::probe::run(project_dir.as_deref(), manifest.as_ref(), &symbol, &define)
        }

        Commands::Doctor { target } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::doctor::run(&project_dir, target.as_deref())
        }
    }
}

/// Load the manifest if one is reachable from `cwd`.
fn load_manifest_optional(
    cwd: &std::path::Path,
) -> anyhow::Result<(Option<LithicManifest>, Option<PathBuf>)> {
    match LithicManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

/// Resolve the target argument, falling back to the manifest default.
fn required_target(
    target: Option<String>,
    manifest: Option<&LithicManifest>,
) -> anyhow::Result<String> {
    target
        .or_else(|| manifest.and_then(|m| m.default_target().map(str::to_string)))
        .ok_or_else(|| {
            anyhow::anyhow!("no target given: pass --target or set build.target in lithic.toml")
        })
}
