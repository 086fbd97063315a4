use clap::{Parser, Subcommand};

mod meeting;
mod slot;

#[derive(Debug, Parser)]
#[command(name = "slotmint-app", about = "Slotmint CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Slot(slot::SlotCommand),
    Meeting(meeting::MeetingCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Slot(command) => slot::run(command).await,
            Commands::Meeting(command) => meeting::run(command).await,
        }
    }
}
