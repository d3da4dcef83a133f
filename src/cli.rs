use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;

use crate::common::{AnalysisArgs, CommonArgs};

#[derive(Parser)]
#[command(
    name = "loop-de-loop",
    about = "🎢 Find the loops in your module graph",
    long_about = "loop-de-loop replays the dependency edges a bundler resolved during a build, \
                  assembles them into a module graph, and reports either the circular import \
                  chain it found or the full graph reachable from the entry module.",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print the report and errors
    #[arg(short, long, global = true, env = "LOOP_DE_LOOP_QUIET")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ride the recorded edges and report the loop (or the whole track)
    ///
    /// Replays one or more recorded edge streams, detects circular
    /// dependencies reachable from the entry module, and emits either the
    /// cycle or the full dependency graph.
    #[command(
        long_about = "Replay recorded dependency edges and report circular imports. Inputs are \
                      JSON Lines or JSON array files of {\"dependency\", \"issuer\"} records, \
                      directories containing such files, or '-' for stdin. The entry module is \
                      the one recorded as its own issuer. When a cycle is reachable from it the \
                      cycle is reported, trimmed according to --circular-mode; otherwise the \
                      nested dependency graph is emitted."
    )]
    Inspect {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Report format
        #[arg(short, long, value_enum, env = "LOOP_DE_LOOP_FORMAT")]
        format: Option<OutputFormat>,

        /// Directory to write the report into (stdout if not specified)
        #[arg(long, value_name = "DIR", env = "LOOP_DE_LOOP_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Report file name inside --output-dir
        #[arg(long, value_name = "NAME", env = "LOOP_DE_LOOP_FILENAME")]
        filename: Option<String>,

        /// Report every discovered cycle instead of only the last one
        #[arg(long, env = "LOOP_DE_LOOP_ALL_CYCLES")]
        all_cycles: bool,

        /// Exit with error code if cycles found
        #[arg(long, env = "LOOP_DE_LOOP_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Draw the whole ride
    ///
    /// Renders the assembled module graph as an ASCII tree, a Mermaid
    /// diagram, or a Graphviz DOT file, highlighting every module and import
    /// that takes part in a cycle.
    #[command(
        long_about = "Render the module graph assembled from recorded edges. ASCII output prints \
                      the tree reachable from the entry module, Mermaid and DOT output include \
                      every observed module. Modules and imports on a detected cycle are \
                      highlighted unless --no-highlight is given."
    )]
    Spectacle {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Graph format
        #[arg(short, long, value_enum, env = "LOOP_DE_LOOP_GRAPH_FORMAT")]
        format: Option<GraphFormat>,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "LOOP_DE_LOOP_OUTPUT")]
        output: Option<PathBuf>,

        /// Do not highlight cycles in the graph
        #[arg(long, env = "LOOP_DE_LOOP_NO_HIGHLIGHT")]
        no_highlight: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Single-line JSON
    Compact,
    /// Styled console output
    Human,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    Ascii,
    Mermaid,
    Dot,
}
