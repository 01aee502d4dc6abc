//! Alphabet predicates for the two sides of a word pair
//!
//! Target words are written in the Latin alphabet, translations in Cyrillic.
//! Both sides may contain hyphens and spaces ("ice-cream", "бизнес план").

/// Separators allowed on both sides of a pair
fn is_separator(c: char) -> bool {
    c == '-' || c == ' '
}

/// Check that `s` is a usable foreign (target) word.
pub fn is_valid_target(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || is_separator(c))
}

/// Check that `s` is a usable native-language translation.
pub fn is_valid_translation(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| is_cyrillic_letter(c) || is_separator(c))
}

/// Russian alphabet, both cases, including Ё/ё which sit outside the А..я block
fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}
