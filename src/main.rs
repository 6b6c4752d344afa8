use std::borrow::Cow;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mimebench::config::CONFIG;
use mimebench::*;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() -> Result<()> {
    init_logging(CONFIG.verbose);
    debug!("{PKG_NAME} {PKG_VERSION} ({COMMIT_ID})");
    debug!("{:?}", &*CONFIG);

    if !CONFIG.paths.is_empty() {
        return resolve_paths(&CONFIG.paths, CONFIG.urls);
    }

    info!(
        "benchmarking {} strategies: {} round(s) of {} call(s), baseline {}",
        Strategy::ALL.len(),
        CONFIG.rounds,
        CONFIG.iterations,
        CONFIG.baseline
    );
    let report = run_benchmark_suite(&CONFIG.bench_settings(), CONFIG.baseline)
        .context("benchmark stopped")?;
    println!("{report}");

    if let Some(period) = CONFIG.watch {
        watch(period, CONFIG.baseline).await?;
    }

    Ok(())
}

// Resolve each command line path with every strategy
fn resolve_paths(paths: &[String], urls: bool) -> Result<()> {
    let mut disagreements = 0;

    for target in paths {
        let path = if urls {
            request_path(target)
        } else {
            Cow::Borrowed(target.as_str())
        };
        let resolution = Resolution::new(&path);

        match resolution.agreed() {
            Some(content_type) => println!("{target} {content_type}"),
            None => {
                disagreements += 1;
                for (strategy, content_type) in &resolution.outputs {
                    error!("{target}: {strategy} -> {content_type}");
                }
            }
        }
    }

    if disagreements > 0 {
        bail!("{disagreements} path(s) resolved differently across strategies");
    }
    Ok(())
}

// Quick benchmark on a fixed path every `period` until interrupted
async fn watch(period: Duration, baseline: Strategy) -> Result<()> {
    let candidates: Vec<Candidate> = Strategy::ALL.into_iter().map(Candidate::from).collect();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick is immediate, the suite just ran
    ticker.tick().await;

    info!("quick benchmark every {period:?}, Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("interrupted");
                return Ok(());
            }
        }

        let timings = quick_benchmark(&candidates, QUICK_SAMPLE_PATH, QUICK_ITERATIONS);
        println!(
            "{}",
            format_quick(&timings, QUICK_ITERATIONS, baseline.name())
        );
    }
}
