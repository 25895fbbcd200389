//! Print the gateway GraphQL schema as SDL.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use gateway::inbound::graphql::schema_builder;

/// Command-line options for the SDL dump.
#[derive(Debug, Parser)]
#[command(about = "Print the gateway GraphQL schema as SDL")]
struct Cli {
    /// Write the SDL to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let sdl = schema_builder().finish().sdl();
    match cli.output {
        Some(path) => std::fs::write(path, sdl),
        None => io::stdout().lock().write_all(sdl.as_bytes()),
    }
}
