use clap::{Parser, Subcommand};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;
use strum::Display as StrumDisplay;

const SOCKET_PATH: &str = "/tmp/folio.sock";

#[derive(Parser, Debug)]
#[command(name = "folioctl", version, about = "Control a running folio window", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
enum Command {
    /// Show the hero page
    Hero,
    /// Show the contact page
    Contact,
    /// Toggle between dark and light mode
    Theme,
    /// Close folio
    Quit,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(cli.command)
}

fn send_command(cmd: Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to folio at {}: {}. Is folio running?",
            SOCKET_PATH,
            e
        )
    })?;
    stream.set_read_timeout(Some(Duration::from_secs(2)))?;

    writeln!(stream, "{}", cmd)?;
    log::debug!("Sent {:?}", cmd);

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    match reply.trim() {
        "ok" => Ok(()),
        other => anyhow::bail!("folio replied: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(Command::Hero.to_string(), "hero");
        assert_eq!(Command::Contact.to_string(), "contact");
        assert_eq!(Command::Theme.to_string(), "theme");
        assert_eq!(Command::Quit.to_string(), "quit");
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["folioctl", "theme"]).unwrap();
        assert!(matches!(cli.command, Command::Theme));
    }
}
