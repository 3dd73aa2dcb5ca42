use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mediaslice_core::app::{EventLoop, MediaSlice};
use mediaslice_core::domain::{MediaEvent, MediaId, SiteId};
use mediaslice_core::{Origin, SafeImageUrl, SanitizerConfig};

/// Replay media events and query the resulting state.
#[derive(Debug, Parser)]
#[command(name = "mediaslice", version)]
struct Cli {
    /// Sanitizer config (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page origin (`scheme://host[:port]`); enables the same-origin blob exemption.
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply every event in a JSON-lines file and print the resulting state.
    Replay { events: PathBuf },

    /// Replay events, then print the safe URL of one media item (or `null`).
    Url {
        events: PathBuf,
        #[arg(long)]
        site: u64,
        #[arg(long)]
        media: u64,
    },

    /// Print the safe version of a URL (or `null`).
    Sanitize { url: String },
}

fn load_config(path: Option<&Path>, origin: Option<&str>) -> Result<SanitizerConfig> {
    let config = match path {
        Some(path) => SanitizerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SanitizerConfig::default(),
    };
    match origin {
        Some(origin) => {
            let parsed = Origin::parse(origin).ok_or_else(|| anyhow!("invalid origin {origin:?}"))?;
            Ok(config.with_origin(parsed))
        }
        None => Ok(config),
    }
}

/// One event per non-blank line.
fn read_events(path: &Path) -> Result<Vec<MediaEvent>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            MediaEvent::from_json_str(line)
                .with_context(|| format!("{}:{}", path.display(), i + 1))
        })
        .collect()
}

async fn replay(slice: &MediaSlice, path: &Path) -> Result<()> {
    let events = read_events(path)?;
    let event_loop = EventLoop::spawn(slice.clone(), 64);
    let sender = event_loop.sender();
    for event in events {
        sender.send(event).await?;
    }
    drop(sender);
    let applied = event_loop.finish().await?;
    tracing::info!(applied, file = %path.display(), "events replayed");
    Ok(())
}

fn print_optional(value: Option<String>) {
    match value {
        Some(url) => println!("{url}"),
        None => println!("null"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.origin.as_deref())?;

    match cli.command {
        Command::Replay { events } => {
            let slice = MediaSlice::from_config(&config)?;
            replay(&slice, &events).await?;
            println!("{}", serde_json::to_string_pretty(&slice.snapshot().await)?);
        }
        Command::Url {
            events,
            site,
            media,
        } => {
            let slice = MediaSlice::from_config(&config)?;
            replay(&slice, &events).await?;
            print_optional(slice.media_url(SiteId::new(site), MediaId::new(media)).await);
        }
        Command::Sanitize { url } => {
            let filter = SafeImageUrl::from_config(&config)?;
            print_optional(filter.sanitize(&url));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn events_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn blank_lines_are_skipped() {
        let file = events_file(concat!(
            r#"{"type":"MEDIA_RECEIVE","siteId":1,"media":[{"ID":42}]}"#,
            "\n",
            "   \n",
            r#"{"type":"MEDIA_DELETE","siteId":1,"mediaIds":[42]}"#,
            "\n\n",
        ));

        let events = read_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "MEDIA_RECEIVE");
        assert_eq!(events[1].kind(), "MEDIA_DELETE");
    }

    #[test]
    fn malformed_line_reports_its_line_number() {
        let file = events_file(concat!(
            r#"{"type":"MEDIA_RECEIVE","siteId":1,"media":[{"ID":42}]}"#,
            "\n",
            "\n",
            r#"{"type":"MEDIA_UPDATE","siteId":1}"#,
            "\n",
        ));

        let err = read_events(file.path()).unwrap_err();
        assert_eq!(err.to_string(), format!("{}:3", file.path().display()));
    }

    #[test]
    fn origin_flag_enables_blob_exemption() {
        let config = load_config(None, Some("http://calypso.localhost:3000")).unwrap();
        let filter = SafeImageUrl::from_config(&config).unwrap();

        let url = "blob:http://calypso.localhost:3000/3d5e5f3c";
        assert_eq!(filter.sanitize(url).as_deref(), Some(url));
    }

    #[test]
    fn invalid_origin_flag_is_an_error() {
        assert!(load_config(None, Some("not an origin")).is_err());
    }

    #[test]
    fn no_flags_give_default_config() {
        assert_eq!(load_config(None, None).unwrap(), SanitizerConfig::default());
    }
}
