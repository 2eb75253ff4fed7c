use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use forwarding_backend::{ForwarderConfig, ForwardingSecret, DEFAULT_CONFIG_PATH};
use forwarding_wire::{decode_and_verify, ForwardingIdentity};
use uuid::Uuid;
use uuid_sync::UuidStore;

#[derive(Parser, Debug)]
#[command(name = "fwdctl", about = "Modern forwarding operator CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode and verify a captured forwarding payload.
    Verify(VerifyArgs),
    /// Write a default backend config.
    InitConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
    /// Inspect the proxy-side UUID mapping database.
    #[command(subcommand)]
    Uuid(UuidCommand),
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[arg(long, conflicts_with = "secret", required_unless_present = "secret")]
    config: Option<PathBuf>,
    #[arg(long)]
    secret: Option<String>,
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    hex: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum UuidCommand {
    Record {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        username: String,
        #[arg(long)]
        uuid: Uuid,
    },
    Lookup {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        username: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Verify(args) => verify(args),
        Command::InitConfig { path } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            ForwarderConfig::default()
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {}; set `secret` to the proxy's forwarding secret", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Uuid(UuidCommand::Record { db, username, uuid }) => {
            let store = UuidStore::open(&db).with_context(|| format!("opening {}", db.display()))?;
            store.store_mapping(&username, uuid)?;
            println!("{} -> {}", username.to_lowercase(), uuid);
            Ok(ExitCode::SUCCESS)
        }
        Command::Uuid(UuidCommand::Lookup { db, username }) => {
            let store = UuidStore::open(&db).with_context(|| format!("opening {}", db.display()))?;
            match store.get_uuid(&username)? {
                Some(uuid) => {
                    println!("{uuid}");
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no mapping for {username}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn verify(args: VerifyArgs) -> anyhow::Result<ExitCode> {
    let secret = match (&args.config, args.secret) {
        (Some(path), _) => {
            let config = ForwarderConfig::from_path(path)
                .with_context(|| format!("loading {}", path.display()))?;
            config.validate()?;
            config.secret
        }
        (None, Some(secret)) => ForwardingSecret::new(secret),
        (None, None) => bail!("either --config or --secret is required"),
    };

    let payload = match (args.hex, &args.file) {
        (Some(hex), _) => hex::decode(hex.trim()).context("payload is not valid hex")?,
        (None, Some(path)) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        (None, None) => bail!("either --hex or --file is required"),
    };

    match decode_and_verify(&payload, secret.expose()) {
        Ok(identity) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&identity_json(&identity))?);
            } else {
                print_identity(&identity);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if args.json {
                let body = serde_json::json!({ "verified": false, "error": err.to_string() });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("rejected: {err}");
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn identity_json(identity: &ForwardingIdentity) -> serde_json::Value {
    let properties: Vec<_> = identity
        .properties()
        .iter()
        .map(|property| {
            serde_json::json!({
                "name": property.name,
                "value": property.value,
                "signature": property.signature,
            })
        })
        .collect();
    serde_json::json!({
        "verified": true,
        "remote_address": identity.remote_address(),
        "uuid": identity.uuid().to_string(),
        "username": identity.username(),
        "properties": properties,
    })
}

fn print_identity(identity: &ForwardingIdentity) {
    println!("verified");
    println!("  address:  {}", identity.remote_address());
    println!("  uuid:     {}", identity.uuid());
    println!("  username: {}", identity.username());
    for property in identity.properties() {
        let signed = if property.is_signed() { "signed" } else { "unsigned" };
        println!("  property: {} ({signed}, {} bytes)", property.name, property.value.len());
    }
}
