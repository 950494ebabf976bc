/// Argument parsing — turns raw command-line tokens into a validated invocation.

use crate::core::distribution::{combination_count, describe_count};
use crate::schema::die::DicePool;
use crate::schema::notation::{parse_token, MAX_DICE};
use log::warn;
use std::path::PathBuf;
use thiserror::Error;

/// Pools with more combinations than this are refused unless overridden.
pub const DEFAULT_MAX_COMBINATIONS: u64 = 100_000_000;

/// Pools above this many combinations are enumerated with a warning.
pub const WARN_COMBINATIONS: u64 = 10_000_000;

pub const USAGE: &str = "\
Usage: dice_calculator <dice>... [+n|-n]... [-s:n]... [-q] [--output <file.ron>] [--max-combinations <n>]

  <dice>                    Space-separated dice, e.g. 2d20 1d6 1d4
  +n / -n                   Modifier added to every sum (repeatable, summed)
  -s:n                      Chance of rolling n or higher (repeatable)
  -q                        Quick mode: statistics only, no sum table (not with -s:)
  --output <file.ron>       Also save the report as RON
  --max-combinations <n>    Refuse larger pools (default: 100000000, ignored with -q)
  -h, --help                Show this help";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("could not parse dice '{0}'")]
    InvalidDice(String),
    #[error("could not parse any dice from arguments")]
    NoDice,
    #[error("could not parse modifier '{0}'")]
    InvalidModifier(String),
    #[error("could not parse desired sum '{0}'")]
    InvalidQuery(String),
    #[error("-q cannot be combined with -s:")]
    QuickWithQueries,
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("could not parse combination limit '{0}'")]
    InvalidLimit(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("more than {} dice in one pool", MAX_DICE)]
    TooManyDice,
    #[error("{} combinations exceeds the limit of {limit}; use -q or raise --max-combinations", count_text(.combinations))]
    TooManyCombinations {
        combinations: Option<u64>,
        limit: u64,
    },
}

/// A fully validated request to calculate.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub pool: DicePool,
    pub modifier: i64,
    /// Desired sums for "or higher" chances, ascending.
    pub targets: Vec<i64>,
    pub quick: bool,
    pub output: Option<PathBuf>,
    pub max_combinations: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Help,
    Calculate(Options),
}

/// Parse arguments, excluding the program name.
///
/// No arguments, `-h` or `--help` yield [`Invocation::Help`].
pub fn parse_args<I, S>(args: I) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    if args.is_empty() {
        return Ok(Invocation::Help);
    }

    let mut dice = Vec::new();
    let mut modifier: i64 = 0;
    let mut targets = Vec::new();
    let mut quick = false;
    let mut output = None;
    let mut max_combinations = DEFAULT_MAX_COMBINATIONS;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-q" => quick = true,
            "--output" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| ArgsError::MissingValue(arg.to_string()))?;
                output = Some(PathBuf::from(path));
            }
            "--max-combinations" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| ArgsError::MissingValue(arg.to_string()))?;
                max_combinations = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidLimit(value.clone()))?;
            }
            _ if arg.starts_with("-s:") => {
                let target = arg[3..]
                    .parse()
                    .map_err(|_| ArgsError::InvalidQuery(arg.to_string()))?;
                targets.push(target);
            }
            _ if is_option_like(arg) => {
                return Err(ArgsError::UnknownOption(arg.to_string()));
            }
            _ if arg.starts_with('+') || arg.starts_with('-') => {
                let value: i64 = arg
                    .parse()
                    .map_err(|_| ArgsError::InvalidModifier(arg.to_string()))?;
                modifier = modifier
                    .checked_add(value)
                    .ok_or_else(|| ArgsError::InvalidModifier(arg.to_string()))?;
            }
            _ => {
                let parsed =
                    parse_token(arg).map_err(|_| ArgsError::InvalidDice(arg.to_string()))?;
                if dice.len() + parsed.len() > MAX_DICE as usize {
                    return Err(ArgsError::TooManyDice);
                }
                dice.extend(parsed);
            }
        }
        i += 1;
    }

    if dice.is_empty() {
        return Err(ArgsError::NoDice);
    }
    if quick && !targets.is_empty() {
        return Err(ArgsError::QuickWithQueries);
    }

    let pool = DicePool::new(dice).map_err(|_| ArgsError::NoDice)?;
    check_modifier(&pool, modifier)?;
    check_size(&pool, quick, max_combinations)?;

    targets.sort_unstable();

    Ok(Invocation::Calculate(Options {
        pool,
        modifier,
        targets,
        quick,
        output,
        max_combinations,
    }))
}

fn count_text(combinations: &Option<u64>) -> String {
    describe_count(*combinations)
}

/// `-x` and `--word` style tokens, as opposed to `-3` modifiers.
fn is_option_like(arg: &str) -> bool {
    arg.strip_prefix('-')
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '-')
}

/// Every shifted sum must stay representable.
fn check_modifier(pool: &DicePool, modifier: i64) -> Result<(), ArgsError> {
    let fits = pool.min_sum().checked_add(modifier).is_some()
        && pool.max_sum().checked_add(modifier).is_some();
    if !fits {
        return Err(ArgsError::InvalidModifier(format!("{:+}", modifier)));
    }
    Ok(())
}

/// Refuse pools too large to enumerate; quick mode never enumerates.
fn check_size(pool: &DicePool, quick: bool, limit: u64) -> Result<(), ArgsError> {
    if quick {
        return Ok(());
    }
    let combinations = match combination_count(pool) {
        Some(n) if n <= limit => n,
        other => {
            return Err(ArgsError::TooManyCombinations {
                combinations: other,
                limit,
            })
        }
    };
    if combinations > WARN_COMBINATIONS {
        warn!(
            "enumerating {} combinations; this may take a while",
            combinations
        );
    }
    Ok(())
}
