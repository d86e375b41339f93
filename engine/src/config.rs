//! Grid defaults and stepping presets shared by the frontends.

use std::fmt;
use std::time::Duration;

/// Number of columns of a freshly constructed [`Game`](crate::Game).
pub const DEFAULT_COLUMNS: usize = 50;
/// Number of rows of a freshly constructed [`Game`](crate::Game).
pub const DEFAULT_ROWS: usize = 30;
/// Largest accepted number of columns or rows.
pub const MAX_DIMENSION: usize = 4096;

/// Whether `columns x rows` is an acceptable grid size.
pub fn valid_dimensions(columns: usize, rows: usize) -> bool {
    (1..=MAX_DIMENSION).contains(&columns) && (1..=MAX_DIMENSION).contains(&rows)
}

/// How fast a frontend re-invokes [`Game::next`](crate::Game::next) while running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    SuperSlow,
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::SuperSlow, Speed::Slow, Speed::Medium, Speed::Fast];

    /// Delay between two generations.
    pub fn interval(self) -> Duration {
        let millis = match self {
            Speed::SuperSlow => 1000,
            Speed::Slow => 200,
            Speed::Medium => 100,
            Speed::Fast => 50,
        };
        Duration::from_millis(millis)
    }

    /// Human readable name, as shown in selectors.
    pub fn label(self) -> &'static str {
        match self {
            Speed::SuperSlow => "super slow",
            Speed::Slow => "slow",
            Speed::Medium => "medium speed",
            Speed::Fast => "fast",
        }
    }

    /// Parses the kebab-case names used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "super-slow" => Some(Speed::SuperSlow),
            "slow" => Some(Speed::Slow),
            "medium" => Some(Speed::Medium),
            "fast" => Some(Speed::Fast),
            _ => None,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_bounds() {
        assert!(valid_dimensions(1, 1));
        assert!(valid_dimensions(MAX_DIMENSION, MAX_DIMENSION));
        assert!(!valid_dimensions(0, 5));
        assert!(!valid_dimensions(5, 0));
        assert!(!valid_dimensions(MAX_DIMENSION + 1, 5));
    }

    #[test]
    fn speeds_get_faster() {
        let intervals: Vec<_> = Speed::ALL.iter().map(|s| s.interval()).collect();
        assert!(intervals.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(Speed::default().interval(), Duration::from_millis(100));
        assert_eq!(Speed::from_name("super-slow"), Some(Speed::SuperSlow));
        assert_eq!(Speed::from_name("warp"), None);
    }
}
