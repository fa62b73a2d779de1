//! Input line parsing.

use rosebloom_stage::domain::commands::Intent;

use crate::error::AppError;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Deliver an intent to the controller.
    Intent(Intent),
    /// Leave the program.
    Quit,
}

/// Parses one line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns `AppError::UnknownIntent` for any other unrecognised word.
pub fn parse_line(line: &str) -> Result<Option<Input>, AppError> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return Ok(None),
        "continue" | "c" => Input::Intent(Intent::Continue),
        "tap" | "t" => Input::Intent(Intent::Tap),
        "open" | "o" => Input::Intent(Intent::Open),
        "hint" | "h" => Input::Intent(Intent::Hint),
        "bloom" | "b" => Input::Intent(Intent::BloomClick),
        "keep" | "k" => Input::Intent(Intent::KeepRose),
        "quit" | "q" => Input::Quit,
        _ => return Err(AppError::UnknownIntent(line.trim().to_owned())),
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_long_and_short_forms() {
        assert_eq!(parse_line("continue").unwrap(), Some(Input::Intent(Intent::Continue)));
        assert_eq!(parse_line("  T \n").unwrap(), Some(Input::Intent(Intent::Tap)));
        assert_eq!(parse_line("bloom").unwrap(), Some(Input::Intent(Intent::BloomClick)));
        assert_eq!(parse_line("k").unwrap(), Some(Input::Intent(Intent::KeepRose)));
        assert_eq!(parse_line("q").unwrap(), Some(Input::Quit));
    }

    #[test]
    fn test_blank_line_is_not_an_input() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_unknown_word_is_rejected() {
        // Act
        let result = parse_line("water");

        // Assert
        assert!(matches!(result, Err(AppError::UnknownIntent(word)) if word == "water"));
    }
}
