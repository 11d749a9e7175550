//! Example probing a handful of paths on one target
//!
//! Run with `cargo run --example probe -- https://example.com/ admin/ .env robots.txt`.
//! Set `RUST_LOG=pathprobe=debug` to watch the attempts.

use color_eyre::{eyre::eyre, Result};
use pathprobe::RequesterBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 Safari/605.1.15",
    "curl/8.5.0",
];

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .ok_or_else(|| eyre!("usage: probe <url> [path ...]"))?;
    let mut paths: Vec<String> = args.collect();
    if paths.is_empty() {
        paths = vec!["".into(), "robots.txt".into(), "admin/".into()];
    }

    // Proxies can be passed through the environment, comma separated
    let proxies: Vec<String> = std::env::var("PROBE_PROXIES")
        .map(|list| list.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let requester = Arc::new(
        RequesterBuilder::new(url)
            .max_pool(8)
            .max_retries(3)
            .timeout(Duration::from_secs(10))
            .proxy_list(proxies)
            .random_agents(USER_AGENTS)
            .header("Accept", "*/*")
            .build()
            .await?,
    );
    println!("Probing {}", requester.base_url());

    let workers: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let requester = Arc::clone(&requester);
            tokio::spawn(async move {
                let result = requester.request(&path, None).await;
                (path, result)
            })
        })
        .collect();

    for worker in workers {
        let (path, result) = worker.await?;
        match result {
            Ok(response) => println!(
                "{:>3} {:<20} {:>8}B  /{}{}",
                response.status(),
                response.reason(),
                response.length(),
                requester.target().base_path(),
                path
            ),
            Err(e) => println!("ERR {}", e),
        }
    }

    Ok(())
}
