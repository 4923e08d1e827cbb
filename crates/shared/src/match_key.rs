//! Match key derivation.
//!
//! A match id groups the messages and contact shares of two sessions no
//! matter who started the conversation. It is the character-sorted
//! concatenation of both session ids: symmetric, but not collision-free
//! (different pairs with the same multiset of characters share a key), so it
//! is always stored next to the event and both session ids.

/// Derives the match id for a pair of session ids.
pub fn derive_match_id(a: &str, b: &str) -> String {
    let mut chars: Vec<char> = a.chars().chain(b.chars()).collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_is_symmetric() {
        assert_eq!(derive_match_id("abc", "xyz"), derive_match_id("xyz", "abc"));
    }

    #[test]
    fn test_match_id_sorts_characters() {
        assert_eq!(derive_match_id("cab", "zyx"), "abcxyz");
        assert_eq!(derive_match_id("s2", "s1"), "12ss");
    }

    #[test]
    fn test_match_id_collides_for_anagram_pairs() {
        // Known limitation: the key is not a digest.
        assert_eq!(derive_match_id("ab", "cd"), derive_match_id("ac", "bd"));
    }

    #[test]
    fn test_match_id_empty_inputs() {
        assert_eq!(derive_match_id("", ""), "");
        assert_eq!(derive_match_id("", "ba"), "ab");
    }
}
