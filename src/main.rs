use clap::Parser;
use clinicfile::storage::{CorruptPolicy, DataPaths, JsonStore};
use clinicfile::{RecordService, web};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "clinicfile", about = "Flat-file JSON appointment backend")]
struct Args {
    /// Directory holding the JSON data files
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Fail requests on corrupt data files instead of degrading to the
    /// empty-collection default
    #[arg(long)]
    strict_reads: bool,
}

impl Args {
    fn corrupt_policy(&self) -> CorruptPolicy {
        if self.strict_reads {
            CorruptPolicy::Fail
        } else {
            CorruptPolicy::UseDefault
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let store = JsonStore::with_corrupt_policy(args.corrupt_policy());
    let service = RecordService::new(store, DataPaths::new(&args.data_dir));
    let app = web::router(service);

    info!("data directory: {}", args.data_dir.display());
    info!("listening on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_reads_flag_selects_fail_policy() {
        let args = Args::try_parse_from(["clinicfile", "--strict-reads"]).expect("parse args");
        assert_eq!(args.corrupt_policy(), CorruptPolicy::Fail);

        let args = Args::try_parse_from(["clinicfile"]).expect("parse args");
        assert_eq!(args.corrupt_policy(), CorruptPolicy::UseDefault);
    }
}
