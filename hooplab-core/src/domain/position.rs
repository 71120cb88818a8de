//! Position — the category key that defines a build's peer group.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// On-court position. Determines the allowed roles, the legal height range,
/// and which peer set a build is ranked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];

    /// Roles a build at this position may take.
    pub fn roles(&self) -> &'static [&'static str] {
        match self {
            Position::PG => &["ISO Guard", "PNR Guard", "Lock"],
            Position::SG => &["ISO Guard", "2BH", "Lock"],
            Position::SF => &["2BH", "Lock", "Backend"],
            Position::PF => &["Backend", "Inside", "Outside"],
            Position::C => &["Inside C", "Outside C"],
        }
    }

    pub fn allows_role(&self, role: &str) -> bool {
        self.roles().contains(&role)
    }

    /// Legal height range in inches, inclusive on both ends.
    pub fn height_range(&self) -> (u32, u32) {
        match self {
            Position::PG => (69, 79), // 5'9" - 6'7"
            Position::SG => (76, 80), // 6'4" - 6'8"
            Position::SF => (77, 83), // 6'5" - 6'11"
            Position::PF => (78, 84), // 6'6" - 7'0"
            Position::C => (79, 87),  // 6'7" - 7'3"
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown position '{0}' (expected one of PG, SG, SF, PF, C)")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_has_roles() {
        for pos in Position::ALL {
            assert!(!pos.roles().is_empty());
        }
    }

    #[test]
    fn role_membership() {
        assert!(Position::PG.allows_role("Lock"));
        assert!(!Position::PG.allows_role("Inside C"));
        assert!(Position::C.allows_role("Inside C"));
    }

    #[test]
    fn height_ranges_are_ordered() {
        for pos in Position::ALL {
            let (min, max) = pos.height_range();
            assert!(min < max, "{pos}: {min} >= {max}");
        }
    }

    #[test]
    fn parse_roundtrip() {
        for pos in Position::ALL {
            assert_eq!(pos.code().parse::<Position>().unwrap(), pos);
        }
        assert!("XX".parse::<Position>().is_err());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("pg".parse::<Position>().unwrap(), Position::PG);
    }
}
