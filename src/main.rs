mod cli;

use hlsvault::{config, ingest, library, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use hlsvault_common::AssetKind;
use std::path::Path;
use tokio_util::sync::CancellationToken;

fn load_config(config_path: Option<&Path>) -> Result<config::Config> {
    let mut config = config::load_config_or_default(config_path)?;
    config::apply_env_overrides(&mut config)?;
    Ok(config)
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    // CLI flags win over config file and environment
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting hlsvault server");
    tracing::info!(
        "Serving VOD from {:?}, live from {:?}",
        config.storage.vod_root,
        config.storage.live_root
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlsvault=trace,hlsvault_av=debug,hlsvault_media=debug,tower_http=debug".to_string()
        } else {
            "hlsvault=info,hlsvault_av=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::List { live } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_assets(live, cli.config.as_deref()))
        }
        Commands::Import { file, name } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(import_file(&file, name.as_deref(), cli.config.as_deref()))
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hlsvault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn list_assets(live: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let kind = if live { AssetKind::Live } else { AssetKind::Vod };
    let root = config.storage.root(kind);

    let names = library::list_assets(root).await?;
    if names.is_empty() {
        eprintln!("No {} assets in {:?}", kind, root);
    }
    for name in names {
        println!("{}", name);
    }

    Ok(())
}

async fn import_file(file: &Path, name: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping encoder");
            on_interrupt.cancel();
        }
    });

    let asset = ingest::import_file(&config, &cancel, file, name).await?;

    println!("Imported asset: {}", asset.name);
    println!("Playlist: {}", asset.playlist.display());
    println!(
        "Stream URL: {}",
        server::routes_assets::playlist_url(&asset.name)
    );

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = load_config(config_path)?;
    let tool = hlsvault_av::tools::check_encoder(config.tools.ffmpeg_path.as_deref());

    let status = if tool.available { "✓" } else { "✗" };
    print!("{} {}", status, tool.name);

    if let Some(ref version) = tool.version {
        print!(" ({})", version);
    }

    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }

    println!();
    println!();
    if tool.available {
        println!("All required tools are available!");
    } else {
        println!("ffmpeg is missing. Uploads and imports will fail until it is installed.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  VOD root: {}", config.storage.vod_root.display());
            println!("  Live root: {}", config.storage.live_root.display());
            println!(
                "  Encoder: {} / {} ({}s segments)",
                config.encoder.video_codec,
                config.encoder.audio_codec,
                config.encoder.segment_duration_secs
            );
            println!("  Keep sources: {}", config.upload.keep_source);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
