//! Name canonicalization.
//!
//! Two names denote the same identifier iff their normalized forms are
//! byte-equal. Normalization is total, pure, and idempotent.

/// Canonicalize a free-text subject or topic name for comparison.
///
/// Steps: lower-case; unify en-dash/em-dash to a plain hyphen; spell out
/// ampersands as "and"; drop whitespace around hyphens; collapse runs of
/// whitespace to a single space; trim.
pub fn normalize(raw: &str) -> String {
    let lowered = raw
        .to_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace('&', " and ");

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            // leading whitespace is dropped outright
            pending_space = !out.is_empty();
            continue;
        }
        if ch == '-' {
            pending_space = false;
            out.push('-');
            continue;
        }
        if pending_space {
            // whitespace after a hyphen is dropped too
            if !out.ends_with('-') {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Human Anatomy  "), "human anatomy");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("Human   Anatomy\tand  Physiology"), "human anatomy and physiology");
    }

    #[test]
    fn unifies_dashes_and_strips_surrounding_space() {
        assert_eq!(normalize("Physiology \u{2013} I"), "physiology-i");
        assert_eq!(normalize("Physiology \u{2014} I"), "physiology-i");
        assert_eq!(normalize("Physiology - I"), "physiology-i");
        assert_eq!(normalize("Physiology-I"), "physiology-i");
    }

    #[test]
    fn spells_out_ampersand() {
        assert_eq!(normalize("Anatomy & Physiology"), "anatomy and physiology");
        assert_eq!(normalize("Anatomy&Physiology"), "anatomy and physiology");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
