use clap::Parser;
use mimalloc::MiMalloc;
use mlop_provision::{
    Config, logging,
    schema::{ClickhouseClient, apply_dir, default_sql_dir},
};
use std::path::PathBuf;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "create-tables", about = "Apply the bundled SQL scripts to ClickHouse")]
struct Args {
    /// Directory holding the *.sql scripts [default: `sql` next to this executable]
    #[arg(long, value_name = "DIR")]
    sql_dir: Option<PathBuf>,

    /// Exit non-zero if any script failed (every script is still attempted)
    #[arg(long)]
    fail_on_error: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let cfg = Config::from_env()?;
    logging::init(&cfg.loglevel);
    info!(clickhouse_url = %cfg.clickhouse.url, user = %cfg.clickhouse.user);

    let sql_dir = match args.sql_dir {
        Some(dir) => dir,
        None => default_sql_dir()?,
    };
    let client = ClickhouseClient::new(&cfg.clickhouse)?;
    let report = apply_dir(&client, &sql_dir, |entry| println!("{entry}")).await?;

    info!(
        total = report.total(),
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed(),
        "schema run finished"
    );
    report.check(args.fail_on_error)?;
    Ok(())
}
