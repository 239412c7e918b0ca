use anyhow::Result;
use clap::Parser;
use dialoguer::{Input, Password};
use dog_disk_backup::app::{App, RunOutcome};
use dog_disk_backup::manifest::DEFAULT_MANIFEST_PATH;
use dog_disk_backup::models::Config;
use dog_disk_backup::Error;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "dog-disk-backup")]
#[command(about = "Back up dog breed photos to a cloud disk")]
struct CliArgs {
    /// Breed name in English; prompted for when omitted.
    #[arg(value_name = "BREED", value_parser = parse_breed_arg)]
    breed: Option<String>,

    /// Where to write the upload manifest.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MANIFEST_PATH)]
    output: PathBuf,
}

fn parse_breed_arg(input: &str) -> std::result::Result<String, String> {
    let breed = input.trim().to_lowercase();
    if breed.is_empty() {
        return Err("Breed name must not be empty".to_string());
    }
    Ok(breed)
}

/// Read one line from a non-interactive input, trimmed.
fn read_answer(reader: &mut impl BufRead) -> dog_disk_backup::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Prompt("unexpected end of input".to_string()));
    }
    Ok(line.trim().to_string())
}

fn prompt_breed(interactive: bool) -> dog_disk_backup::Result<String> {
    let raw = if interactive {
        Input::<String>::new()
            .with_prompt("Breed name (in English)")
            .validate_with(|input: &String| parse_breed_arg(input).map(|_| ()))
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))?
    } else {
        read_answer(&mut io::stdin().lock())?
    };
    parse_breed_arg(&raw).map_err(Error::Prompt)
}

fn prompt_token(interactive: bool) -> dog_disk_backup::Result<String> {
    if !interactive {
        return read_answer(&mut io::stdin().lock());
    }

    let token = Password::new()
        .with_prompt("Disk OAuth token")
        .interact()
        .map_err(|e| Error::Prompt(e.to_string()))?;
    Ok(token.trim().to_string())
}

async fn backup(args: CliArgs) -> dog_disk_backup::Result<()> {
    let config = Config::from_env()?;

    // Piped or scripted runs answer the prompts one line each on stdin.
    let interactive = io::stdin().is_terminal();
    let breed = match args.breed {
        Some(breed) => breed,
        None => prompt_breed(interactive)?,
    };
    let token = prompt_token(interactive)?;

    let app = App::new(&config, token, args.output)?.with_progress(true);
    match app.run(&breed).await? {
        RunOutcome::NoImages => {
            println!("Could not fetch any images for '{}'.", breed);
        }
        RunOutcome::Completed {
            uploaded,
            manifest_path,
        } => {
            println!("All {} file(s) were sent for upload.", uploaded.len());
            println!("Result saved to '{}'", manifest_path.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dog_disk_backup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dog-disk-backup");

    let args = CliArgs::parse();

    match backup(args).await {
        Ok(_) => {
            info!("Backup finished");
            Ok(())
        }
        Err(e) => {
            error!("Backup failed: {}", e);
            std::process::exit(1);
        }
    }
}
