#[macro_use]
extern crate log;

use std::{sync::Arc, time::Duration};

use clap::Parser;
use hondana::{config::Config, library::Library, presentation::ServerBuilder};

#[derive(Parser)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        info!("rust_log: {}", rust_log);
    } else if let Ok(hondana_log) = std::env::var("HONDANA_LOG") {
        info!("hondana_log: {}", hondana_log);
        unsafe {
            std::env::set_var("RUST_LOG", format!("hondana={hondana_log}"));
        }
    }

    env_logger::init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config);

    let library = Arc::new(Library::new(
        &config.library_path,
        Duration::from_secs(config.cache_ttl),
    ));

    let server_fut = ServerBuilder::new()
        .with_library(library)
        .build()?
        .serve(([0, 0, 0, 0], config.port));

    tokio::select! {
        _ = server_fut => {
            info!("server shutdown");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl+c signal");
        }
    }

    Ok(())
}
