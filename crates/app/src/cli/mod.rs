use clap::{Parser, Subcommand};

mod token;

#[derive(Debug, Parser)]
#[command(name = "kiosk-app", about = "Kiosk CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command),
        }
    }
}
