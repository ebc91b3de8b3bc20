//! Flags shared by every `cleandroid` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so
//! `cleandroid feature login -vv --output-format json` works the same as
//! putting the flags before the subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more about catalog resolution and file writes (-v, -vv, -vvv).
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        long_help = "Log more about what a generation run does:
    (none)  warnings, e.g. skipped catalog or override lines
    -v      one summary line per request
    -vv     catalog resolution, degraded features, plan sizes
    -vvv    every directory and file the materializer touches"
    )]
    pub verbose: u8,

    /// Print nothing but errors; the exit code still reports the outcome.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print file lists and catalog snippets without ANSI colors.
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Settings file with default package and SDK levels (TOML).
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "CLEANDROID_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// How generation reports and `config` listings are printed.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of generation reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored file lists on a terminal, plain text when piped.
    #[default]
    Auto,
    /// Colored file lists even when piped.
    Human,
    /// File lists without colors or markers.
    Plain,
    /// The generation report as one JSON document on stdout.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        global: GlobalArgs,
    }

    #[test]
    fn verbosity_is_counted() {
        let parsed = Harness::try_parse_from(["cleandroid", "-vvv"]).unwrap();
        assert_eq!(parsed.global.verbose, 3);
        assert_eq!(parsed.global.output_format, OutputFormat::Auto);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Harness::try_parse_from(["cleandroid", "-q", "-v"]).is_err());
    }
}
