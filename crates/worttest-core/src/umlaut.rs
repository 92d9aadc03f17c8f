//! Umlaut folding for the ASCII test-set variants.

/// Replace German umlauts and sharp s with their digraph substitutions.
///
/// Case-sensitive: `ä`→`ae`, `ö`→`oe`, `ü`→`ue`, `Ä`→`Ae`, `Ö`→`Oe`,
/// `Ü`→`Ue`, `ß`→`ss`. Pure and total; text without umlauts passes through
/// unchanged, so applying the fold twice equals applying it once.
pub fn replace_umlauts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_all_seven_characters() {
        assert_eq!(replace_umlauts("äöüÄÖÜß"), "aeoeueAeOeUess");
    }

    #[test]
    fn preserves_case_of_distinct_variants() {
        assert_eq!(replace_umlauts("Häuser"), "Haeuser");
        assert_eq!(replace_umlauts("Öfen"), "Oefen");
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(replace_umlauts("Haus Baum"), "Haus Baum");
        assert_eq!(replace_umlauts(""), "");
    }

    #[test]
    fn idempotent() {
        let once = replace_umlauts("Grüße aus Köln");
        let twice = replace_umlauts(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "Gruesse aus Koeln");
    }
}
