//! CLI subcommand implementations.

pub mod article;
pub mod breaking;
pub mod cache;
pub mod category;
pub mod headlines;

use std::future::Future;
use std::time::Instant;

use anyhow::Result;

/// Runs `fetch` `repeat` times (at least once) and returns the last result,
/// printing per-request latency when repeating so cache hits are visible.
pub async fn fetch_repeated<T, E, F, Fut>(repeat: u32, mut fetch: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let runs = repeat.max(1);
    let mut result = timed(1, runs, &mut fetch).await?;
    for i in 2..=runs {
        result = timed(i, runs, &mut fetch).await?;
    }
    Ok(result)
}

async fn timed<T, E, F, Fut>(i: u32, runs: u32, fetch: &mut F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let started = Instant::now();
    let value = fetch().await?;
    if runs > 1 {
        eprintln!(
            "Request {}/{}: {:.1} ms",
            i,
            runs,
            started.elapsed().as_secs_f64() * 1000.0
        );
    }
    Ok(value)
}
