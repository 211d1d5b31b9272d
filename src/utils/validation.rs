use anyhow::{anyhow, Result};
use chrono::Weekday;

use crate::utils::datetime::parse_weekday;

/// Longest title accepted into a custom list, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Comparison key for anime titles: trimmed and lowercased.
///
/// Never shown to users; display always uses the title as entered.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

pub fn validate_anime_title(title: &str) -> Result<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(anyhow!("Anime title cannot be empty"));
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(anyhow!(
            "Anime title cannot be longer than {} characters",
            MAX_TITLE_LENGTH
        ));
    }

    if title.contains('\n') || title.contains('\r') {
        return Err(anyhow!("Anime title cannot contain line breaks"));
    }

    Ok(title.to_string())
}

pub fn parse_day_argument(input: &str) -> Result<Weekday> {
    let input = input.trim();

    if input.is_empty() {
        return Err(anyhow!("Day cannot be empty"));
    }

    parse_weekday(input).ok_or_else(|| {
        anyhow!("Invalid day! Please use: sunday, monday, tuesday, wednesday, thursday, friday, saturday")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  One Piece "), "one piece");
        assert_eq!(normalize_title("ONE PIECE"), "one piece");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_anime_title("  Frieren  ").unwrap(), "Frieren");
    }
}
