use std::collections::BTreeSet;

/// Parses a pipe-delimited skill string (`"RN|ICU"`) into a set (spec §6:
/// "a multi-skill actor stores skills pipe-delimited on intake"). Matching
/// is exact and case-preserving, so this does no normalization beyond
/// trimming whitespace around each token.
pub fn parse_skills(raw: &str) -> BTreeSet<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_pipe_and_trims() {
        let skills = parse_skills("RN | ICU|");
        assert_eq!(skills.len(), 2);
        assert!(skills.contains("RN"));
        assert!(skills.contains("ICU"));
    }

    #[test]
    fn empty_string_has_no_skills() {
        assert!(parse_skills("").is_empty());
    }
}
