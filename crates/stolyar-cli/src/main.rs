mod cli;
mod commands;
mod util;

use clap::Parser as _;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Types(args) => commands::types::run(&args),
        Command::Fields(args) => commands::fields::run(&args),
        Command::Fmt(args) => commands::fmt::run(&args),
    }
}
