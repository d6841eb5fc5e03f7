pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "alumni")]
#[command(about = "Alumni API operator tool - account bootstrap and password hashing")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print a bcrypt hash for a password")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },

    #[command(about = "Create a login account in the configured database")]
    CreateUser(commands::user::CreateUserArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::HashPassword { password } => commands::user::hash_password(&password, output_format),
        Commands::CreateUser(args) => commands::user::create_user(args, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_user() {
        let cli = Cli::parse_from([
            "alumni",
            "create-user",
            "--username",
            "admin",
            "--email",
            "admin@example.com",
            "--role",
            "admin",
            "--password",
            "secret",
        ]);
        assert!(matches!(cli.command, Commands::CreateUser(ref args) if args.username == "admin"));
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }

    #[test]
    fn parses_hash_password_with_json_flag() {
        let cli = Cli::parse_from(["alumni", "hash-password", "pw", "--json"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::HashPassword { ref password } if password == "pw"));
    }
}
