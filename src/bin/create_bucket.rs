use clap::Parser;
use mimalloc::MiMalloc;
use mlop_provision::{
    Config, logging,
    storage::{S3BucketStore, ensure_bucket},
};
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "create-bucket", about = "Create a MinIO bucket")]
struct Args {
    /// Name of the bucket to create
    bucket_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let cfg = Config::from_env()?;
    logging::init(&cfg.loglevel);
    info!(endpoint = %cfg.storage.endpoint, secure = cfg.storage.secure, bucket = %args.bucket_name);

    let store = S3BucketStore::connect(&cfg.storage).await;
    let report = ensure_bucket(&store, &args.bucket_name).await?;
    println!("{report}");
    Ok(())
}
