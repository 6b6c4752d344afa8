use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::corpus::{Sample, CORPUS};
use crate::error::{BenchError, Result};
use crate::strategy::{ResolveFn, Strategy};

pub const DEFAULT_ITERATIONS: usize = 100_000;
pub const DEFAULT_ROUNDS: usize = 10;
pub const QUICK_ITERATIONS: usize = 10_000;

/// A named resolver taking part in a benchmark run.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub name: &'static str,
    pub resolve: ResolveFn,
}

impl Candidate {
    pub fn new(name: &'static str, resolve: ResolveFn) -> Candidate {
        Candidate { name, resolve }
    }
}

impl From<Strategy> for Candidate {
    fn from(strategy: Strategy) -> Candidate {
        Candidate::new(strategy.name(), strategy.resolver())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchSettings {
    /// Calls per round, cycling through the corpus
    pub iterations: usize,
    pub rounds: usize,
}

impl Default for BenchSettings {
    fn default() -> BenchSettings {
        BenchSettings {
            iterations: DEFAULT_ITERATIONS,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl BenchSettings {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidSettings(
                "iterations per round must be at least 1".to_string(),
            ));
        }
        if self.rounds == 0 {
            return Err(BenchError::InvalidSettings(
                "rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Run every sample through every candidate and require identical output.
///
/// Stops at the first disagreeing sample.
pub fn verify_equivalence(candidates: &[Candidate], corpus: &[Sample]) -> Result<()> {
    for (index, sample) in corpus.iter().enumerate() {
        let outputs: Vec<(&'static str, &'static str)> = candidates
            .iter()
            .map(|c| (c.name, (c.resolve)(sample.path)))
            .collect();

        let first = outputs.first().map(|(_, content_type)| *content_type);
        if outputs.iter().any(|(_, content_type)| Some(*content_type) != first) {
            return Err(BenchError::EquivalenceMismatch {
                index,
                path: sample.path.to_string(),
                outputs,
            });
        }

        if let Some(content_type) = first {
            debug!("sample {index} ok: {} -> {content_type}", sample.path);
        }
    }

    info!(
        "{} strategies agree on all {} samples",
        candidates.len(),
        corpus.len()
    );
    Ok(())
}

/// Wall time of every round for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyTiming {
    pub name: &'static str,
    pub iterations: usize,
    pub rounds: Vec<Duration>,
    /// Sum of resolved content type lengths; identical workloads give
    /// identical checksums.
    pub checksum: u64,
}

impl StrategyTiming {
    pub fn total(&self) -> Duration {
        self.rounds.iter().sum()
    }

    pub fn average_round(&self) -> Duration {
        if self.rounds.is_empty() {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.total().as_nanos() / self.rounds.len() as u128) as u64)
    }

    pub fn per_call_nanos(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.average_round().as_nanos() as f64 / self.iterations as f64
    }
}

/// Time `settings.rounds` rounds of `settings.iterations` calls each.
///
/// Call `i` of every round resolves `corpus[i % corpus.len()]`, so all
/// candidates see the same workload in the same order.
pub fn time_candidate(
    candidate: &Candidate,
    corpus: &[Sample],
    settings: &BenchSettings,
) -> StrategyTiming {
    debug!("benchmarking {}", candidate.name);

    let mut rounds = Vec::with_capacity(settings.rounds);
    let mut checksum: u64 = 0;

    if !corpus.is_empty() {
        for round in 0..settings.rounds {
            let mut round_sum: u64 = 0;
            let start = Instant::now();
            for i in 0..settings.iterations {
                let path = black_box(corpus[i % corpus.len()].path);
                let content_type = black_box((candidate.resolve)(path));
                round_sum = round_sum.wrapping_add(content_type.len() as u64);
            }
            let elapsed = start.elapsed();

            checksum = checksum.wrapping_add(black_box(round_sum));
            debug!(
                "  round {}: {:?} ({:.3} ns per call)",
                round + 1,
                elapsed,
                elapsed.as_nanos() as f64 / settings.iterations as f64
            );
            rounds.push(elapsed);
        }
    }

    StrategyTiming {
        name: candidate.name,
        iterations: settings.iterations,
        rounds,
        checksum,
    }
}

/// Relative standing of one candidate against the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub name: &'static str,
    /// Positive when faster than the baseline
    pub improvement_pct: f64,
    pub speedup: f64,
}

pub fn improvement_pct(baseline_nanos: f64, candidate_nanos: f64) -> f64 {
    if baseline_nanos <= 0.0 {
        return 0.0;
    }
    (baseline_nanos - candidate_nanos) / baseline_nanos * 100.0
}

pub fn speedup(baseline_nanos: f64, candidate_nanos: f64) -> f64 {
    if candidate_nanos <= 0.0 {
        return if baseline_nanos <= 0.0 { 1.0 } else { f64::INFINITY };
    }
    baseline_nanos / candidate_nanos
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub settings: BenchSettings,
    pub samples: usize,
    pub timings: Vec<StrategyTiming>,
    /// Index into `timings` of the strategy the others are measured against
    pub baseline: usize,
}

impl BenchmarkReport {
    pub fn baseline(&self) -> &StrategyTiming {
        &self.timings[self.baseline]
    }

    pub fn comparisons(&self) -> Vec<Comparison> {
        let baseline = self.baseline().per_call_nanos();
        self.timings
            .iter()
            .map(|t| Comparison {
                name: t.name,
                improvement_pct: improvement_pct(baseline, t.per_call_nanos()),
                speedup: speedup(baseline, t.per_call_nanos()),
            })
            .collect()
    }

    /// Lowest average per-call time; ties go to the earlier strategy.
    pub fn fastest(&self) -> &StrategyTiming {
        let mut fastest = &self.timings[0];
        for timing in &self.timings[1..] {
            if timing.per_call_nanos() < fastest.per_call_nanos() {
                fastest = timing;
            }
        }
        fastest
    }

    /// Strategy names from fastest to slowest.
    pub fn ranking(&self) -> Vec<&'static str> {
        let mut ranked: Vec<&StrategyTiming> = self.timings.iter().collect();
        ranked.sort_by(|a, b| a.per_call_nanos().total_cmp(&b.per_call_nanos()));
        ranked.into_iter().map(|t| t.name).collect()
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PERFORMANCE COMPARISON ===")?;
        writeln!(
            f,
            "{} round(s) of {} call(s) over {} samples",
            self.settings.rounds, self.settings.iterations, self.samples
        )?;
        for timing in &self.timings {
            writeln!(
                f,
                "{:<12} {:>12?} per round, {:>9.3} ns per call",
                timing.name,
                timing.average_round(),
                timing.per_call_nanos()
            )?;
        }

        writeln!(f)?;
        let baseline = self.baseline().name;
        for comparison in self.comparisons() {
            if comparison.name == baseline {
                continue;
            }
            writeln!(
                f,
                "{} vs {}: {:.2}% improvement, {:.2}x speedup",
                comparison.name, baseline, comparison.improvement_pct, comparison.speedup
            )?;
        }
        write!(f, "fastest: {}", self.fastest().name)
    }
}

/// Verify `candidates` against `corpus`, then time each in turn.
///
/// Nothing is timed unless every candidate agrees on every sample.
pub fn run_suite(
    candidates: &[Candidate],
    corpus: &[Sample],
    settings: &BenchSettings,
    baseline: usize,
) -> Result<BenchmarkReport> {
    settings.validate()?;
    if corpus.is_empty() {
        return Err(BenchError::InvalidSettings("corpus is empty".to_string()));
    }
    if baseline >= candidates.len() {
        return Err(BenchError::InvalidSettings(format!(
            "baseline {baseline} out of range for {} candidate(s)",
            candidates.len()
        )));
    }

    verify_equivalence(candidates, corpus)?;

    let timings: Vec<StrategyTiming> = candidates
        .iter()
        .map(|candidate| time_candidate(candidate, corpus, settings))
        .collect();

    Ok(BenchmarkReport {
        settings: *settings,
        samples: corpus.len(),
        timings,
        baseline,
    })
}

/// Benchmark every [`Strategy`] over the built-in corpus.
pub fn run_benchmark_suite(settings: &BenchSettings, baseline: Strategy) -> Result<BenchmarkReport> {
    let candidates: Vec<Candidate> = Strategy::ALL.into_iter().map(Candidate::from).collect();
    let baseline = Strategy::ALL
        .iter()
        .position(|s| *s == baseline)
        .unwrap_or_default();
    run_suite(&candidates, CORPUS, settings, baseline)
}

/// Elapsed time for one candidate in a quick benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickTiming {
    pub name: &'static str,
    pub elapsed: Duration,
}

/// Resolve a single `path` `iterations` times with each candidate.
pub fn quick_benchmark(candidates: &[Candidate], path: &str, iterations: usize) -> Vec<QuickTiming> {
    candidates
        .iter()
        .map(|candidate| {
            let mut sum: u64 = 0;
            let start = Instant::now();
            for _ in 0..iterations {
                let content_type = black_box((candidate.resolve)(black_box(path)));
                sum = sum.wrapping_add(content_type.len() as u64);
            }
            let elapsed = start.elapsed();
            black_box(sum);
            QuickTiming {
                name: candidate.name,
                elapsed,
            }
        })
        .collect()
}

/// One line summary of a quick benchmark, with speedups against `baseline`.
pub fn format_quick(timings: &[QuickTiming], iterations: usize, baseline: &str) -> String {
    let per_call = |t: &QuickTiming| t.elapsed.as_nanos() as f64 / iterations.max(1) as f64;
    let base = timings
        .iter()
        .find(|t| t.name == baseline)
        .map(per_call)
        .unwrap_or_default();

    let times: Vec<String> = timings
        .iter()
        .map(|t| format!("{}: {:.3} ns/call", t.name, per_call(t)))
        .collect();
    let speedups: Vec<String> = timings
        .iter()
        .filter(|t| t.name != baseline)
        .map(|t| format!("{} speedup: {:.2}x", t.name, speedup(base, per_call(t))))
        .collect();

    format!("{} | {}", times.join(", "), speedups.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mimetype::*;
    use crate::strategy::resolve_linear_chain;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn timing(name: &'static str, rounds_ns: &[u64], iterations: usize) -> StrategyTiming {
        StrategyTiming {
            name,
            iterations,
            rounds: rounds_ns.iter().map(|ns| Duration::from_nanos(*ns)).collect(),
            checksum: 0,
        }
    }

    fn report(timings: Vec<StrategyTiming>) -> BenchmarkReport {
        BenchmarkReport {
            settings: BenchSettings {
                iterations: 1000,
                rounds: 2,
            },
            samples: 25,
            timings,
            baseline: 0,
        }
    }

    fn always_html(_: &str) -> &'static str {
        TEXT_HTML
    }

    fn always_plain(_: &str) -> &'static str {
        TEXT_PLAIN
    }

    #[test]
    fn averages_rounds_and_calls() {
        let t = timing("linear", &[1_000_000, 3_000_000], 1000);
        assert_eq!(t.total(), Duration::from_millis(4));
        assert_eq!(t.average_round(), Duration::from_millis(2));
        assert_eq!(t.per_call_nanos(), 2000.0);
    }

    #[test]
    fn compares_against_the_baseline() {
        let r = report(vec![
            timing("linear", &[2_000_000, 2_000_000], 1000),
            timing("dispatch", &[1_000_000, 1_000_000], 1000),
            timing("fast-reject", &[4_000_000, 4_000_000], 1000),
        ]);
        let comparisons = r.comparisons();
        assert_eq!(comparisons[0].improvement_pct, 0.0);
        assert_eq!(comparisons[0].speedup, 1.0);
        assert_eq!(comparisons[1].improvement_pct, 50.0);
        assert_eq!(comparisons[1].speedup, 2.0);
        assert_eq!(comparisons[2].improvement_pct, -100.0);
        assert_eq!(comparisons[2].speedup, 0.5);
        assert_eq!(r.fastest().name, "dispatch");
        assert_eq!(r.ranking(), vec!["dispatch", "linear", "fast-reject"]);
    }

    #[test]
    fn ties_go_to_the_earlier_strategy() {
        let r = report(vec![
            timing("linear", &[5_000], 10),
            timing("dispatch", &[1_000], 10),
            timing("fast-reject", &[1_000], 10),
        ]);
        assert_eq!(r.fastest().name, "dispatch");
        assert_eq!(r.ranking(), vec!["dispatch", "fast-reject", "linear"]);
    }

    #[test]
    fn zero_times_do_not_divide_by_zero() {
        assert_eq!(improvement_pct(0.0, 5.0), 0.0);
        assert_eq!(speedup(0.0, 0.0), 1.0);
        assert!(speedup(5.0, 0.0).is_infinite());
    }

    #[test]
    fn report_names_the_fastest() {
        let r = report(vec![
            timing("linear", &[2_000_000, 2_000_000], 1000),
            timing("dispatch", &[1_000_000, 1_000_000], 1000),
        ]);
        let text = r.to_string();
        assert!(text.contains("dispatch vs linear: 50.00% improvement, 2.00x speedup"));
        assert!(!text.contains("linear vs linear"));
        assert!(text.ends_with("fastest: dispatch"));
    }

    #[test]
    fn equivalence_holds_for_all_strategies() {
        let candidates: Vec<Candidate> = Strategy::ALL.into_iter().map(Candidate::from).collect();
        assert_eq!(verify_equivalence(&candidates, CORPUS), Ok(()));
    }

    static DIVERGENT_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counted_linear(path: &str) -> &'static str {
        DIVERGENT_CALLS.fetch_add(1, Ordering::SeqCst);
        resolve_linear_chain(path)
    }

    #[test]
    fn divergent_stubs_stop_before_timing() {
        let candidates = [
            Candidate::new("linear", counted_linear),
            Candidate::new("html", always_html),
            Candidate::new("plain", always_plain),
        ];
        let corpus = [
            Sample {
                path: "/index.html",
                expected: TEXT_HTML,
            },
            Sample {
                path: "/style.css",
                expected: TEXT_CSS,
            },
        ];
        let settings = BenchSettings {
            iterations: 1000,
            rounds: 3,
        };

        let err = run_suite(&candidates, &corpus, &settings, 0).unwrap_err();
        assert_eq!(
            err,
            BenchError::EquivalenceMismatch {
                index: 0,
                path: "/index.html".to_string(),
                outputs: vec![
                    ("linear", TEXT_HTML),
                    ("html", TEXT_HTML),
                    ("plain", TEXT_PLAIN),
                ],
            }
        );
        // one call for the first sample, none for timing
        assert_eq!(DIVERGENT_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn mismatch_is_reported_at_the_first_divergent_sample() {
        let candidates = [
            Candidate::new("linear", resolve_linear_chain),
            Candidate::new("html", always_html),
        ];
        let err = verify_equivalence(&candidates, CORPUS).unwrap_err();
        match err {
            BenchError::EquivalenceMismatch { index, path, .. } => {
                assert_eq!(index, 5);
                assert_eq!(path, "/style.css");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_degenerate_settings() {
        let candidates = [Candidate::from(Strategy::LinearChain)];
        for settings in [
            BenchSettings {
                iterations: 0,
                rounds: 1,
            },
            BenchSettings {
                iterations: 1,
                rounds: 0,
            },
        ] {
            assert!(matches!(
                run_suite(&candidates, CORPUS, &settings, 0),
                Err(BenchError::InvalidSettings(_))
            ));
        }
        let settings = BenchSettings::default();
        assert!(matches!(
            run_suite(&candidates, &[], &settings, 0),
            Err(BenchError::InvalidSettings(_))
        ));
        assert!(matches!(
            run_suite(&candidates, CORPUS, &settings, 1),
            Err(BenchError::InvalidSettings(_))
        ));
    }

    #[test]
    fn timing_records_every_round_and_a_shared_checksum() {
        let settings = BenchSettings {
            iterations: 50,
            rounds: 4,
        };
        let timings: Vec<StrategyTiming> = Strategy::ALL
            .into_iter()
            .map(|s| time_candidate(&Candidate::from(s), CORPUS, &settings))
            .collect();

        let expected: u64 = (0..settings.iterations)
            .map(|i| CORPUS[i % CORPUS.len()].expected.len() as u64)
            .sum::<u64>()
            * settings.rounds as u64;
        for timing in &timings {
            assert_eq!(timing.rounds.len(), 4);
            assert_eq!(timing.iterations, 50);
            assert_eq!(timing.checksum, expected, "{}", timing.name);
        }
    }

    #[test]
    fn quick_benchmark_times_each_candidate() {
        let candidates: Vec<Candidate> = Strategy::ALL.into_iter().map(Candidate::from).collect();
        let timings = quick_benchmark(&candidates, "example.css", 100);
        let names: Vec<&str> = timings.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["linear", "dispatch", "fast-reject"]);
    }

    #[test]
    fn quick_summary_compares_against_the_baseline() {
        let timings = [
            QuickTiming {
                name: "linear",
                elapsed: Duration::from_micros(40),
            },
            QuickTiming {
                name: "dispatch",
                elapsed: Duration::from_micros(10),
            },
        ];
        assert_eq!(
            format_quick(&timings, 10_000, "linear"),
            "linear: 4.000 ns/call, dispatch: 1.000 ns/call | dispatch speedup: 4.00x"
        );
    }
}
