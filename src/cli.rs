// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use dropdeploy::output::OutputMode;
use std::ffi::OsString;

/// Long flags that older scripts pass with a single dash (`-droplet 5`).
const SINGLE_DASH_FLAGS: &[&str] = &["droplet", "token", "dry-run", "endpoint"];

#[derive(Parser)]
#[command(name = "dropdeploy")]
#[command(about = "Deploy a container stack to a single droplet with health gates")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results (for CI)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse the process arguments, accepting `-droplet`, `-token`,
    /// `-dry-run` and `-endpoint` as spellings of their `--` forms.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_single_dash(std::env::args_os()))
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Rewrite single-dash long flags to clap's double-dash form.
///
/// `-name value` and `-name=value` both work. A boolean given as
/// `-dry-run=false` is dropped; `-dry-run=true` becomes `--dry-run`.
/// Everything after a bare `--` is left alone.
pub fn normalize_single_dash<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let Some(flag) = text.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
            out.push(arg);
            continue;
        };
        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };
        if !SINGLE_DASH_FLAGS.contains(&name) {
            out.push(arg);
            continue;
        }

        match (name, value) {
            ("dry-run", Some("false")) => {}
            ("dry-run", Some("true")) | (_, None) => out.push(format!("--{name}").into()),
            (_, Some(value)) => out.push(format!("--{name}={value}").into()),
        }
    }

    out
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the host, pull new images, recreate the stack and verify it
    ///
    /// Single-dash spellings (-droplet, -token, -dry-run) are also accepted.
    Deploy {
        /// Droplet id (falls back to DO_DROPLET_ID, then dropdeploy.yml)
        #[arg(long)]
        droplet: Option<u64>,

        /// API token (falls back to DO_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Run the read-only checks only; change nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Probe the application endpoint, containers and (optionally) the droplet
    Healthcheck {
        /// Droplet id; the droplet probe is skipped without one
        #[arg(long)]
        droplet: Option<u64>,

        /// API token; the droplet probe is skipped without one
        #[arg(long)]
        token: Option<String>,

        /// Application health URL (defaults to http://localhost:8000/health)
        #[arg(long)]
        endpoint: Option<String>,

        /// Exit non-zero when any probe fails
        #[arg(long)]
        strict: bool,
    },

    /// Show the status of every container
    Status,

    /// Initialize a new dropdeploy.yml configuration file
    Init {
        /// Droplet id to write into the file
        #[arg(long)]
        droplet: Option<u64>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_single_dash(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        assert_eq!(
            normalize(&["dropdeploy", "deploy", "-droplet", "5", "-token=abc", "-dry-run"]),
            vec!["dropdeploy", "deploy", "--droplet", "5", "--token=abc", "--dry-run"]
        );
    }

    #[test]
    fn boolean_values_follow_go_flag_syntax() {
        assert_eq!(
            normalize(&["dropdeploy", "deploy", "-dry-run=true"]),
            vec!["dropdeploy", "deploy", "--dry-run"]
        );
        assert_eq!(
            normalize(&["dropdeploy", "deploy", "-dry-run=false"]),
            vec!["dropdeploy", "deploy"]
        );
    }

    #[test]
    fn short_and_unknown_flags_are_untouched() {
        assert_eq!(
            normalize(&["dropdeploy", "-v", "init", "-f", "-strict", "--droplet", "1"]),
            vec!["dropdeploy", "-v", "init", "-f", "-strict", "--droplet", "1"]
        );
    }

    #[test]
    fn parsed_result_matches_double_dash_form() {
        let cli = Cli::parse_from(normalize_single_dash(
            ["dropdeploy", "deploy", "-droplet", "42", "-dry-run"].map(OsString::from),
        ));
        match cli.command {
            Commands::Deploy {
                droplet, dry_run, ..
            } => {
                assert_eq!(droplet, Some(42));
                assert!(dry_run);
            }
            _ => panic!("expected deploy"),
        }
    }
}
