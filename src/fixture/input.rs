//! Expected-input token grammar
//!
//! A token is a single key (`w`, `s`, `a`, `d`, `Space`, `Shift` or a literal
//! space) or a diagonal made of two different cardinal keys joined by `+`.

use std::fmt;

/// One of the four movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    Forward,
    Back,
    Left,
    Right,
}

impl Cardinal {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" => Some(Cardinal::Forward),
            "s" => Some(Cardinal::Back),
            "a" => Some(Cardinal::Left),
            "d" => Some(Cardinal::Right),
            _ => None,
        }
    }

    /// Key name as the browser driver expects it
    pub fn key(self) -> &'static str {
        match self {
            Cardinal::Forward => "w",
            Cardinal::Back => "s",
            Cardinal::Left => "a",
            Cardinal::Right => "d",
        }
    }
}

/// A parsed expected-input token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputToken {
    Move(Cardinal),
    /// `Space` or `" "`
    Jump,
    Shift,
    Diagonal(Cardinal, Cardinal),
}

impl InputToken {
    /// Parse a token, returning `None` when it is not part of the grammar.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Space" | " " => return Some(InputToken::Jump),
            "Shift" => return Some(InputToken::Shift),
            _ => {}
        }

        if let Some(card) = Cardinal::from_key(token) {
            return Some(InputToken::Move(card));
        }

        let (first, second) = token.split_once('+')?;
        let first = Cardinal::from_key(first)?;
        let second = Cardinal::from_key(second)?;
        if first == second {
            return None;
        }
        Some(InputToken::Diagonal(first, second))
    }

    /// Whether `token` is accepted by the grammar
    pub fn is_valid(token: &str) -> bool {
        Self::parse(token).is_some()
    }

    /// Keys that must be held together to produce this input
    pub fn keys(self) -> Vec<&'static str> {
        match self {
            InputToken::Move(card) => vec![card.key()],
            InputToken::Jump => vec![" "],
            InputToken::Shift => vec!["Shift"],
            InputToken::Diagonal(a, b) => vec![a.key(), b.key()],
        }
    }
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputToken::Move(card) => f.write_str(card.key()),
            InputToken::Jump => f.write_str("Space"),
            InputToken::Shift => f.write_str("Shift"),
            InputToken::Diagonal(a, b) => write!(f, "{}+{}", a.key(), b.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_single_keys() {
        for token in ["w", "s", "a", "d", "Space", "Shift", " "] {
            assert!(InputToken::is_valid(token), "{token:?} should be valid");
        }
    }

    #[test]
    fn test_accepts_diagonals() {
        assert_eq!(
            InputToken::parse("w+d"),
            Some(InputToken::Diagonal(Cardinal::Forward, Cardinal::Right))
        );
        assert!(InputToken::is_valid("s+a"));
        assert!(InputToken::is_valid("a+w"));
    }

    #[test]
    fn test_rejects_malformed() {
        for token in ["w+w", "x", "w+", "ww", "+d", "w+d+a", "W", "space", "", "w + d"] {
            assert!(!InputToken::is_valid(token), "{token:?} should be invalid");
        }
    }

    #[test]
    fn test_keys_for_diagonal() {
        let token = InputToken::parse("s+d").unwrap();
        assert_eq!(token.keys(), vec!["s", "d"]);
        assert_eq!(token.to_string(), "s+d");
    }
}
