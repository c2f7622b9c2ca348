use std::process::ExitCode;

use sales_etl::{config::Config, error::EtlError, extract, generate, load, transform};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                EtlError::Connect(_) => {
                    error!("{err}; check the server is running and credentials are correct")
                }
                _ => error!("{err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> Result<(), EtlError> {
    let cfg = Config::from_env()?;

    // ─── 2) provision the database ───────────────────────────────────
    load::ensure_database(&cfg.db).await?;

    // ─── 3) materialize the sample dataset ───────────────────────────
    generate::write_sample_csv(&cfg.csv_path)?;

    // ─── 4) extract → transform → load ───────────────────────────────
    let rows = extract::read_sales(&cfg.csv_path)?;
    let enriched = transform::enrich(rows)?;
    load::load(&cfg, &enriched).await?;

    info!("all done");
    Ok(())
}
