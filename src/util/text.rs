// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text helpers shared by the editor, the controller and the word stock.

/// Number of characters, counted as Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether `text` holds at most `limit` characters.
pub fn within_limit(text: &str, limit: usize) -> bool {
    text.chars().nth(limit).is_none()
}

/// Trim `text` and return it only if something is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_scalars_not_bytes() {
        assert_eq!(char_len("Ça va"), 5);
        assert_eq!(char_len("日本語"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_within_limit_boundaries() {
        let fifty = "a".repeat(50);
        let fifty_one = "a".repeat(51);
        assert!(within_limit(&fifty, 50));
        assert!(!within_limit(&fifty_one, 50));
        assert!(within_limit("", 0));
        assert!(within_limit(&"é".repeat(50), 50));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  I am  "), Some("I am"));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
        assert_eq!(non_blank("\t\n"), None);
    }
}
