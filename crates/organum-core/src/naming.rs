//! Rank name formatting.

/// Capitalizes every alphabetic word and lowercases the rest of it.
///
/// Words are runs of alphabetic characters, so hyphenated names capitalize
/// each part.
///
/// # Examples
/// ```
/// use organum_core::naming::capitalize_name;
///
/// assert_eq!(capitalize_name("flûte harmonique"), "Flûte Harmonique");
/// assert_eq!(capitalize_name("plein-jeu"), "Plein-Jeu");
/// ```
pub fn capitalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Roman numeral for `n`; empty for zero.
pub fn to_roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// Roman row count, or a `low-high` span when the count varies.
pub fn row_span(low: usize, high: usize) -> String {
    if low == high {
        to_roman(low)
    } else {
        format!("{}-{}", to_roman(low), to_roman(high))
    }
}

/// Joins a capitalized name with a rank suffix.
pub fn full_name(name: &str, suffix: &str) -> String {
    let name = capitalize_name(name.trim());
    if suffix.is_empty() {
        name
    } else {
        format!("{} {}", name, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_name() {
        assert_eq!(capitalize_name("montre"), "Montre");
        assert_eq!(capitalize_name("grosse Tierce"), "Grosse Tierce");
        assert_eq!(capitalize_name("MONTRE"), "Montre");
        assert_eq!(capitalize_name("flûte harmonique"), "Flûte Harmonique");
        assert_eq!(capitalize_name("plein-jeu"), "Plein-Jeu");
        assert_eq!(capitalize_name("voix céleste 2"), "Voix Céleste 2");
        assert_eq!(capitalize_name(""), "");
    }

    #[test]
    fn test_to_roman() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(3), "III");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(5), "V");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(0), "");
    }

    #[test]
    fn test_row_span() {
        assert_eq!(row_span(3, 3), "III");
        assert_eq!(row_span(3, 4), "III-IV");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("montre", "8'"), "Montre 8'");
        assert_eq!(full_name(" plein-jeu ", "III-IV"), "Plein-Jeu III-IV");
        assert_eq!(full_name("tremblant", ""), "Tremblant");
    }
}
