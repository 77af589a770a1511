//! Capitalisation helpers for carrying a word's case over to its replacement.
use smol_str::SmolStr;

/// Lowercases every char.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    SmolStr::from(s.to_lowercase())
}

/// Uppercases every char.
#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    SmolStr::from(s.to_uppercase())
}

/// Uppercases the first char only.
#[inline(always)]
pub fn upper_first(s: &str) -> SmolStr {
    let mut chars = s.chars();
    match chars.next() {
        None => SmolStr::default(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// A letters-only word with a capital somewhere past the first char that is
/// not simply written in capitals, e.g. "McDonald" or "iPhone".
pub fn is_mixed_case(word: &str) -> bool {
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return false;
    }

    word.chars().skip(1).any(char::is_uppercase) && !is_all_caps(word)
}

/// Whether uppercasing leaves the word unchanged.
pub fn is_all_caps(word: &str) -> bool {
    upper_case(word) == word
}

/// Whether the first char is already a capital.
pub fn is_first_caps(word: &str) -> bool {
    upper_first(word) == word
}

/// Re-applies the capitalisation pattern of `original` to `replacement`.
///
/// All-caps words (longer than one character) give an all-caps replacement,
/// a capital initial gives a capital initial. Mixed case such as "McDonald"
/// carries no usable pattern, so the replacement is returned as is.
pub fn match_case(original: &str, replacement: &str) -> SmolStr {
    if is_mixed_case(original) {
        return SmolStr::from(replacement);
    }

    if original.chars().count() > 1 && is_all_caps(original) {
        upper_case(replacement)
    } else if is_first_caps(original) {
        upper_first(replacement)
    } else {
        SmolStr::from(replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_conversion() {
        assert_eq!(lower_case("QuIcK"), "quick");
        assert_eq!(upper_case("quick"), "QUICK");
        assert_eq!(upper_first("quick"), "Quick");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn mixed_case() {
        assert_eq!(is_mixed_case("McDonald"), true);
        assert_eq!(is_mixed_case("Mcdonald"), false);
        assert_eq!(is_mixed_case("McDoNaLd"), true);
        assert_eq!(is_mixed_case("MCDONALD"), false);
        assert_eq!(is_mixed_case("mcDonald"), true);
        assert_eq!(is_mixed_case("mcdonald"), false);

        assert_eq!(is_mixed_case("ab"), false);
        assert_eq!(is_mixed_case("aB"), true);
        assert_eq!(is_mixed_case("Ab"), false);
        assert_eq!(is_mixed_case("AB"), false);

        assert_eq!(is_mixed_case("A"), false);
        assert_eq!(is_mixed_case("a"), false);
        assert_eq!(is_mixed_case(":"), false);
    }

    #[test]
    fn matching_case() {
        assert_eq!(match_case("Teh", "the"), "The");
        assert_eq!(match_case("TEH", "the"), "THE");
        assert_eq!(match_case("teh", "the"), "the");
        assert_eq!(match_case("I", "me"), "Me");
        assert_eq!(match_case("McDonlad", "mcdonald"), "mcdonald");
    }
}
