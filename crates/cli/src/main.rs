use clap::Parser;
use geotxt_application::ports::GeoReader;
use geotxt_application::use_cases::HandleGeoQueryUseCase;
use geotxt_domain::config::CliOverrides;
use geotxt_domain::{DatabaseEvent, TxtEncoding};
use geotxt_infrastructure::dns::GeoTxtHandler;
use geotxt_infrastructure::geodb::GeoDatabase;
use geotxt_infrastructure::system::{FastrandPicker, ForwardHostnameResolver};
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "geotxt-dns")]
#[command(version)]
#[command(about = "GeoTXT DNS - geolocation answers over DNS TXT records")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Domain suffix stripped from query names, e.g. geo.example.com
    #[arg(long)]
    domain: Option<String>,

    /// Geo database file or URL
    #[arg(long)]
    db: Option<String>,

    /// Database update check interval in seconds
    #[arg(long)]
    update_interval: Option<u64>,

    /// Max time in seconds to wait before retrying a failed update
    #[arg(long)]
    retry_interval: Option<u64>,

    /// Language for localized fields, e.g. the country name
    #[arg(long)]
    lang: Option<String>,

    /// TXT packing: "joined" (one string) or "segmented" (one per field)
    #[arg(long, value_parser = parse_output_mode)]
    output: Option<TxtEncoding>,

    /// Do not log requests or database events
    #[arg(long)]
    silent: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_output_mode(value: &str) -> Result<TxtEncoding, String> {
    match value {
        "joined" => Ok(TxtEncoding::Joined),
        "segmented" => Ok(TxtEncoding::Segmented),
        other => Err(format!(
            "unknown output mode '{other}', expected 'joined' or 'segmented'"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        domain: cli.domain,
        database_source: cli.db,
        update_interval_secs: cli.update_interval,
        max_retry_interval_secs: cli.retry_interval,
        language: cli.lang,
        output_mode: cli.output,
        log_level: cli.log_level,
        silent: cli.silent,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting GeoTXT DNS v{}", env!("CARGO_PKG_VERSION"));

    let db = Arc::new(
        GeoDatabase::open(
            &config.database.source,
            config.database.update_policy(),
            config.database.fetch_timeout(),
        )
        .await?,
    );

    if !config.logging.silent {
        spawn_event_logger(db.subscribe());
    }

    let resolver = Arc::new(ForwardHostnameResolver::from_system()?);
    let reader: Arc<dyn GeoReader> = Arc::clone(&db) as Arc<dyn GeoReader>;
    let use_case = Arc::new(
        HandleGeoQueryUseCase::new(reader, resolver, Arc::new(FastrandPicker))
            .with_language(config.response.language.clone())
            .with_domain(config.server.domain.clone())
            .with_encoding(config.response.output_mode)
            .with_silent(config.logging.silent),
    );
    let handler = GeoTxtHandler::new(use_case);

    let listen_addr = config.server.listen_address();
    info!(addr = %listen_addr, "geotxt dns server starting");

    let mut server = tokio::spawn(server::start_dns_server(listen_addr, handler));

    tokio::select! {
        result = &mut server => {
            if let Err(e) = result? {
                error!(error = %e, "DNS server error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            server.abort();
        }
    }

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Log database lifecycle events until the manager closes.
fn spawn_event_logger(mut events: tokio::sync::mpsc::Receiver<DatabaseEvent>) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                DatabaseEvent::Opened { source } => info!(%source, "database loaded"),
                DatabaseEvent::Error { cause } => error!(%cause, "database error"),
                DatabaseEvent::Closed => break,
            }
        }
    });
}
