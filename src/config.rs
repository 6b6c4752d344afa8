use std::env;
use std::process;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;

use crate::bench::{BenchSettings, DEFAULT_ITERATIONS, DEFAULT_ROUNDS};
use crate::strategy::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub verbose: bool,            // -v
    pub iterations: usize,        // -n
    pub rounds: usize,            // -r
    pub baseline: Strategy,       // -b
    pub watch: Option<Duration>,  // -w
    pub urls: bool,               // -u
    pub help: bool,               // -h
    pub paths: Vec<String>,
}

lazy_static! {

    // Command line configuration
    pub static ref CONFIG: Config = Config::cmdline();
}

/* Chappell's lightweight getopt() for rust */
impl Default for Config {
    fn default() -> Config {
        Config {
            verbose: false,
            iterations: DEFAULT_ITERATIONS,
            rounds: DEFAULT_ROUNDS,
            baseline: Strategy::LinearChain,
            watch: None,
            urls: false,
            help: false,
            paths: Vec::new(),
        }
    }
}

fn count(flag: &str, value: Option<String>) -> Result<usize> {
    let value = value.ok_or_else(|| anyhow!("{flag} expects a number"))?;
    let n: usize = value
        .parse()
        .with_context(|| format!("{flag}: '{value}' is not a number"))?;
    if n == 0 {
        return Err(anyhow!("{flag} must be at least 1"));
    }
    Ok(n)
}

impl Config {
    pub fn usage() -> ! {
        eprintln!("Usage: mimebench [-v] [-n iterations] [-r rounds] [-b baseline] [-w secs] [-u] [paths]");
        eprintln!("       -v            verbose (RUST_LOG overrides)\n");
        eprintln!("       -n count      calls per timing round ({DEFAULT_ITERATIONS})");
        eprintln!("       -r count      timing rounds per strategy ({DEFAULT_ROUNDS})");
        eprintln!("       -b strategy   baseline: linear, dispatch or fast-reject (linear)");
        eprintln!("       -w secs       after the suite, rerun a quick benchmark every secs seconds");
        eprintln!("       -u            paths are request targets: drop ?query and percent-decode");
        eprintln!("With paths, resolve each one with every strategy instead of benchmarking.");

        process::exit(1);
    }

    pub fn cmdline() -> Config {
        match Config::parse(env::args().skip(1)) {
            Ok(config) if config.help => Self::usage(),
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e:#}");
                Self::usage()
            }
        }
    }

    pub fn parse<I>(args: I) -> Result<Config>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();

        let mut args = args.into_iter();
        while let Some(a) = args.next() {
            match a.as_str() {
                "-v" => {
                    config.verbose = true;
                    continue;
                }
                "-n" => {
                    config.iterations = count("-n", args.next())?;
                    continue;
                }
                "-r" => {
                    config.rounds = count("-r", args.next())?;
                    continue;
                }
                "-b" => {
                    config.baseline = args
                        .next()
                        .ok_or_else(|| anyhow!("-b expects a strategy name"))?
                        .parse()?;
                    continue;
                }
                "-w" => {
                    config.watch = Some(Duration::from_secs(count("-w", args.next())? as u64));
                    continue;
                }
                "-u" => {
                    config.urls = true;
                    continue;
                }
                "-h" | "-?" => {
                    config.help = true;
                    break;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(anyhow!("unknown option {flag}"));
                }

                // Anything else is a path to resolve
                _ => config.paths.push(a),
            };
        }

        Ok(config)
    }

    pub fn bench_settings(&self) -> BenchSettings {
        BenchSettings {
            iterations: self.iterations,
            rounds: self.rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        Config::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bench_settings(), BenchSettings::default());
    }

    #[test]
    fn parses_every_option() {
        let config = parse(&["-v", "-n", "500", "-r", "3", "-b", "dispatch", "-w", "30", "-u", "/a.js"]).unwrap();
        assert!(config.verbose);
        assert!(config.urls);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.baseline, Strategy::FirstCharDispatch);
        assert_eq!(config.watch, Some(Duration::from_secs(30)));
        assert_eq!(config.paths, vec!["/a.js".to_string()]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["-n"]).is_err());
        assert!(parse(&["-n", "lots"]).is_err());
        assert!(parse(&["-r", "0"]).is_err());
        assert!(parse(&["-b", "quantum"]).is_err());
        assert!(parse(&["-x"]).is_err());
    }

    #[test]
    fn help_stops_parsing() {
        let config = parse(&["-h", "-n", "bogus"]).unwrap();
        assert!(config.help);
    }

    #[test]
    fn lone_dash_is_a_path() {
        assert_eq!(parse(&["-"]).unwrap().paths, vec!["-".to_string()]);
    }
}
