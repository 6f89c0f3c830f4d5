use clap::{Parser, Subcommand};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tool-runner", version, about = "Run agent tools from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the definitions of all enabled tools, in registration order.
    List,

    /// Execute one tool call and print its result.
    Call {
        /// Tool name, e.g. "web_search" or "get_weather".
        tool: String,

        /// JSON arguments, e.g. '{"city": "Berlin"}'.
        #[arg(default_value = "{}")]
        arguments: String,
    },
}
