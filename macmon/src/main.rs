//! Entry point for macmon. Parses args, then serves MCP over stdio or runs the self-test.

use std::sync::Arc;

use macmon::config::{parse_args, usage, Config, Mode};
use macmon::sampler::SysinfoProvider;
use macmon::selftest::run_self_test;
use macmon::server::MacmonServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    // stdout carries the MCP stream, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("macmon=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = match parse_args(std::env::args()) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    match mode {
        Mode::Help => {
            println!("{}", usage("macmon"));
            Ok(())
        }
        Mode::Version => {
            println!("macmon {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Mode::SelfTest => {
            init_logging();
            let provider = SysinfoProvider::new(Config::from_env());
            tokio::task::spawn_blocking(move || {
                let stdout = std::io::stdout();
                run_self_test(&provider, &mut stdout.lock())
            })
            .await??;
            Ok(())
        }
        Mode::Serve => {
            init_logging();
            let config = Config::from_env();
            tracing::debug!("config: {config:?}");
            let server = MacmonServer::new(Arc::new(SysinfoProvider::new(config)));
            server.serve_stdio().await
        }
    }
}
