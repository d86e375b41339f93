//! Parsing command-line arguments.

use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use life_engine::config::{DEFAULT_COLUMNS, DEFAULT_ROWS, MAX_DIMENSION};
use life_engine::Speed;

const DEFAULT_PATTERN: &str = "Glider";

/// How the board is populated before the first generation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Start {
    Pattern(String),
    Random { density: f64, seed: Option<u64> },
}

/// A struct to store the parse results.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Args {
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) start: Start,
    pub(crate) generations: u64,
    pub(crate) speed: Speed,
    pub(crate) list: bool,
}

fn dimension(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(value_parser!(u64).range(1..=MAX_DIMENSION as u64))
}

pub(crate) fn command() -> Command {
    command!()
        .long_about(
            "Runs Conway's Game of Life on a bounded grid and prints every generation.\n\
             \n\
             Live cells are shown as `X`, dead cells as `.`. The board starts from \n\
             one of the built-in shapes (see --list), centered on the grid, or from \n\
             a random fill.",
        )
        .arg(dimension("columns", "Width of the grid [default: 50]").short('x'))
        .arg(dimension("rows", "Height of the grid [default: 30]").short('y'))
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .help("Name of the built-in shape to start from")
                .conflicts_with("random"),
        )
        .arg(
            Arg::new("random")
                .short('r')
                .long("random")
                .value_name("DENSITY")
                .help("Start from a random fill where each cell is alive with this probability")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the random fill")
                .requires("random")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("generations")
                .short('g')
                .long("generations")
                .help("Number of generations to run")
                .value_parser(value_parser!(u64))
                .default_value("20"),
        )
        .arg(
            Arg::new("speed")
                .short('s')
                .long("speed")
                .help("Delay between generations")
                .value_parser(["super-slow", "slow", "medium", "fast"])
                .default_value("medium"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("Print the built-in shapes and exit")
                .action(ArgAction::SetTrue),
        )
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let dimension = |name: &str, default: usize| {
            matches
                .get_one::<u64>(name)
                .map_or(default, |&value| value as usize)
        };

        let start = match matches.get_one::<f64>("random") {
            Some(&density) => Start::Random {
                density,
                seed: matches.get_one::<u64>("seed").copied(),
            },
            None => Start::Pattern(
                matches
                    .get_one::<String>("pattern")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            ),
        };

        let speed = matches
            .get_one::<String>("speed")
            .and_then(|name| Speed::from_name(name))
            .unwrap_or_default();

        Args {
            columns: dimension("columns", DEFAULT_COLUMNS),
            rows: dimension("rows", DEFAULT_ROWS),
            start,
            generations: matches.get_one::<u64>("generations").copied().unwrap_or(0),
            speed,
            list: matches.get_flag("list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        let argv = std::iter::once("life").chain(args.iter().copied());
        command()
            .try_get_matches_from(argv)
            .map(|m| Args::from_matches(&m))
    }

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.columns, DEFAULT_COLUMNS);
        assert_eq!(args.rows, DEFAULT_ROWS);
        assert_eq!(args.start, Start::Pattern(DEFAULT_PATTERN.to_string()));
        assert_eq!(args.generations, 20);
        assert_eq!(args.speed, Speed::Medium);
        assert!(!args.list);
    }

    #[test]
    fn random_start() {
        let args = parse(&["-x", "8", "-y", "6", "--random", "0.25", "--seed", "3"]).unwrap();
        assert_eq!((args.columns, args.rows), (8, 6));
        assert_eq!(
            args.start,
            Start::Random {
                density: 0.25,
                seed: Some(3)
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--columns", "0"]).is_err());
        assert!(parse(&["--rows", "5000"]).is_err());
        assert!(parse(&["--pattern", "Block", "--random", "0.5"]).is_err());
        assert!(parse(&["--seed", "1"]).is_err());
        assert!(parse(&["--speed", "warp"]).is_err());
    }

    #[test]
    fn dimensions_accept_the_full_range() {
        let args = parse(&["--columns", "1", "--rows", "4096"]).unwrap();
        assert_eq!((args.columns, args.rows), (1, MAX_DIMENSION));
        assert!(parse(&["--columns", "4097"]).is_err());
        assert!(parse(&["--rows", "-3"]).is_err());
    }

    #[test]
    fn speed_names() {
        assert_eq!(parse(&["-s", "super-slow"]).unwrap().speed, Speed::SuperSlow);
        assert_eq!(parse(&["--speed", "fast"]).unwrap().speed, Speed::Fast);
    }
}
