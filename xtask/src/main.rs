//! Development tasks for the exec-script workspace.
//!
//! Run with `cargo xtask <command>`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use exec_script::{Command, ScriptCompiler, ScriptConfig};
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for exec-script")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run fmt, clippy, tests and cargo-deny
    Ci,
    /// Check formatting
    Fmt,
    /// Lint every target with all features
    Clippy,
    /// Run unit, integration and doc tests, with and without `serde`
    Test,
    /// Run cargo-deny checks
    Deny,
    /// Build API documentation
    Doc,
    /// Run the compile benchmarks
    Bench,
    /// Run a fuzz target for a limited time (requires cargo-fuzz and nightly)
    Fuzz {
        /// Fuzz target name
        #[arg(default_value = "compile_command")]
        target: String,
        /// Maximum run time in seconds
        #[arg(long, default_value_t = 60)]
        seconds: u64,
    },
    /// Render a JSON-captured procedure call as a T-SQL script
    Render {
        /// JSON file holding a serialized `Command`
        path: PathBuf,
        /// Script options, e.g. "Return Code=@ret;Indent=4"
        #[arg(long)]
        options: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Task::Render { path, options } = &cli.command {
        return render(path, options.as_deref());
    }

    let sh = Shell::new()?;
    sh.change_dir(workspace_root()?);

    match cli.command {
        Task::Ci => {
            for step in [fmt, clippy, test, deny] {
                step(&sh)?;
            }
            println!("All CI checks passed!");
        }
        Task::Fmt => fmt(&sh)?,
        Task::Clippy => clippy(&sh)?,
        Task::Test => test(&sh)?,
        Task::Deny => deny(&sh)?,
        Task::Doc => doc(&sh)?,
        Task::Bench => cmd!(sh, "cargo bench -p exec-script").run()?,
        Task::Fuzz { target, seconds } => fuzz(&sh, &target, seconds)?,
        Task::Render { .. } => {}
    }

    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    let output = std::process::Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .context("failed to run cargo locate-project")?;

    let manifest = String::from_utf8(output.stdout).context("invalid UTF-8 in cargo output")?;
    Path::new(manifest.trim())
        .parent()
        .map(Path::to_path_buf)
        .context("failed to get workspace root")
}

fn fmt(sh: &Shell) -> Result<()> {
    println!("Checking formatting...");
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    println!("Running clippy...");
    cmd!(sh, "cargo clippy --workspace --all-features --all-targets -- -D warnings").run()?;
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    println!("Running tests...");
    cmd!(sh, "cargo test --workspace").run()?;
    cmd!(sh, "cargo test --workspace --all-features").run()?;
    Ok(())
}

fn deny(sh: &Shell) -> Result<()> {
    println!("Running cargo-deny...");
    cmd!(sh, "cargo deny check").run()?;
    Ok(())
}

fn doc(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --workspace --all-features --no-deps")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()?;
    Ok(())
}

fn fuzz(sh: &Shell, target: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        bail!("fuzz run time must be at least one second");
    }
    let max_time = format!("-max_total_time={seconds}");
    let _dir = sh.push_dir("fuzz");
    cmd!(sh, "cargo +nightly fuzz run {target} -- {max_time}").run()?;
    Ok(())
}

fn render(path: &Path, options: Option<&str>) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let command: Command = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a serialized command", path.display()))?;

    let config = match options {
        Some(options) => ScriptConfig::from_options_string(options)?,
        None => ScriptConfig::default(),
    };
    let script = ScriptCompiler::new(config)?.compile(&command)?;

    print!("{script}");
    Ok(())
}
