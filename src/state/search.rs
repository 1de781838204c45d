/// Name filter for the gallery
///
/// A query is a plain string plus a comparison policy. Matching is a
/// substring test against the filename; an empty query matches everything.

/// How filenames are compared against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Literal substring match ("Test" does not match "test.jpg")
    #[default]
    CaseSensitive,
    /// Both sides are lowercased before comparing
    CaseInsensitive,
}

impl MatchPolicy {
    pub fn from_match_case(match_case: bool) -> Self {
        if match_case {
            MatchPolicy::CaseSensitive
        } else {
            MatchPolicy::CaseInsensitive
        }
    }

    pub fn is_case_sensitive(self) -> bool {
        self == MatchPolicy::CaseSensitive
    }
}

/// The current contents of the search field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    policy: MatchPolicy,
}

impl SearchQuery {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            text: String::new(),
            policy,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_policy(&mut self, policy: MatchPolicy) {
        self.policy = policy;
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Test a filename against this query
    pub fn matches(&self, name: &str) -> bool {
        matches(name, &self.text, self.policy)
    }
}

/// True iff `query` is empty or `name` contains it under `policy`
pub fn matches(name: &str, query: &str, policy: MatchPolicy) -> bool {
    if query.is_empty() {
        return true;
    }

    match policy {
        MatchPolicy::CaseSensitive => name.contains(query),
        MatchPolicy::CaseInsensitive => name.to_lowercase().contains(&query.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches("image1.jpg", "", MatchPolicy::CaseSensitive));
        assert!(matches("", "", MatchPolicy::CaseInsensitive));
    }

    #[test]
    fn test_substring_match() {
        assert!(matches("test-image.jpg", "test-image", MatchPolicy::CaseSensitive));
        assert!(matches("test-image.jpg", ".jpg", MatchPolicy::CaseSensitive));
        assert!(!matches("image1.jpg", "test-image", MatchPolicy::CaseSensitive));
        assert!(!matches("image1.jpg", "non-existent", MatchPolicy::CaseInsensitive));
    }

    #[test]
    fn test_case_policy() {
        assert!(!matches("Holiday.JPG", "holiday", MatchPolicy::CaseSensitive));
        assert!(matches("Holiday.JPG", "holiday", MatchPolicy::CaseInsensitive));
        assert!(matches("holiday.jpg", "HOLIDAY", MatchPolicy::CaseInsensitive));
    }

    #[test]
    fn test_query_clear_and_policy() {
        let mut query = SearchQuery::default();
        assert_eq!(query.policy(), MatchPolicy::CaseSensitive);

        query.set("Beach");
        assert!(!query.matches("beach.png"));

        query.set_policy(MatchPolicy::from_match_case(false));
        assert!(query.matches("beach.png"));

        query.clear();
        assert!(query.is_empty());
        assert!(query.matches("anything"));
    }
}
