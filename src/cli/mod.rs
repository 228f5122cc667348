//! CLI module for the user service

pub mod serve;

use clap::{Parser, Subcommand};

/// User service - user management REST API
#[derive(Parser)]
#[command(name = "user-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["user-service"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_with_port_override() {
        let cli = Cli::try_parse_from(["user-service", "serve", "--port", "9090"]).unwrap();

        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(9090)),
            None => panic!("expected serve subcommand"),
        }
    }
}
