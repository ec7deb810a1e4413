//! Requested-keyword matching, including dotted hierarchical requests.

/// Literal prefix of hierarchical keyword cards.
const HIERARCH_PREFIX: &str = "HIERARCH ESO";

/// Expand a dotted request `A.B.C` to the space-joined card form
/// `HIERARCH ESO A B C`.
///
/// Empty segments (consecutive dots) are skipped. The prefix is always
/// prepended, so a request whose first segment is itself `ESO` expands with
/// the segment repeated.
pub fn expand_hierarchical(dotted: &str) -> String {
    let mut expanded = String::from(HIERARCH_PREFIX);
    for segment in dotted.split('.').filter(|s| !s.is_empty()) {
        expanded.push(' ');
        expanded.push_str(segment);
    }
    expanded
}

struct Request {
    /// Uppercased token as given, used for table headings.
    display: String,
    /// Comparison form: the expanded hierarchy for dotted requests,
    /// otherwise the display form itself.
    canonical: String,
    hierarchical: bool,
}

/// An ordered set of requested keywords.
///
/// Requests are uppercased once at construction and dotted requests are
/// expanded to their canonical card form up front; matching is then a plain
/// comparison per request. Hierarchical requests compare case-sensitively
/// (the request was already uppercased), flat requests ignore ASCII case on
/// the card side too.
pub struct KeywordSet {
    requests: Vec<Request>,
}

impl KeywordSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = tokens
            .into_iter()
            .map(|token| {
                let display = token.as_ref().to_ascii_uppercase();
                let hierarchical = display.contains('.');
                let canonical = if hierarchical {
                    expand_hierarchical(&display)
                } else {
                    display.clone()
                };
                Request {
                    display,
                    canonical,
                    hierarchical,
                }
            })
            .collect();
        KeywordSet { requests }
    }

    /// Number of requested keywords.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Display names in request order (dotted forms unexpanded).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|r| r.display.as_str())
    }

    /// Index of the first request matching `card_keyword`.
    ///
    /// Requests are tested in the order given; the first hit wins.
    pub fn match_keyword(&self, card_keyword: &str) -> Option<usize> {
        self.requests.iter().position(|r| {
            if r.hierarchical {
                r.canonical == card_keyword
            } else {
                r.canonical.eq_ignore_ascii_case(card_keyword)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_single_segment() {
        assert_eq!(expand_hierarchical("AIRM"), "HIERARCH ESO AIRM");
    }

    #[test]
    fn expand_multi_segment() {
        assert_eq!(expand_hierarchical("TEL.AIRM"), "HIERARCH ESO TEL AIRM");
    }

    #[test]
    fn expand_keeps_leading_eso_segment() {
        // The prefix is unconditional; segments are never deduplicated
        // against it.
        assert_eq!(
            expand_hierarchical("ESO.TEL.AIRM"),
            "HIERARCH ESO ESO TEL AIRM"
        );
    }

    #[test]
    fn expand_skips_empty_segments() {
        assert_eq!(expand_hierarchical("TEL..AIRM"), "HIERARCH ESO TEL AIRM");
    }

    #[test]
    fn flat_match_is_case_insensitive() {
        let keys = KeywordSet::new(["naxis1"]);
        assert_eq!(keys.match_keyword("NAXIS1"), Some(0));
        assert_eq!(keys.match_keyword("naxis1"), Some(0));
        assert_eq!(keys.match_keyword("NAXIS2"), None);
    }

    #[test]
    fn hierarchical_match_is_exact() {
        let keys = KeywordSet::new(["tel.airm"]);
        assert_eq!(keys.match_keyword("HIERARCH ESO TEL AIRM"), Some(0));
        assert_eq!(keys.match_keyword("HIERARCH ESO TEL"), None);
        assert_eq!(keys.match_keyword("HIERARCH ESO TEL AIRM X"), None);
        assert_eq!(keys.match_keyword("TEL.AIRM"), None);
    }

    #[test]
    fn first_match_wins() {
        let keys = KeywordSet::new(["NAXIS1", "NAXIS1", "NAXIS2"]);
        assert_eq!(keys.match_keyword("NAXIS1"), Some(0));
        assert_eq!(keys.match_keyword("NAXIS2"), Some(2));
    }

    #[test]
    fn display_names_keep_dotted_form() {
        let keys = KeywordSet::new(["naxis2", "tel.airm"]);
        let names: Vec<&str> = keys.names().collect();
        assert_eq!(names, ["NAXIS2", "TEL.AIRM"]);
    }

    #[test]
    fn empty_set() {
        let keys = KeywordSet::new(Vec::<String>::new());
        assert!(keys.is_empty());
        assert_eq!(keys.len(), 0);
        assert_eq!(keys.match_keyword("NAXIS"), None);
    }
}
