//! Status filter applied to listings.
//!
//! Both surfaces accept `all` and a "not completed" spelling; every other
//! value, including no value at all, selects completed records.

/// The three-way completion partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    All,
    #[default]
    Completed,
    NotCompleted,
}

impl StatusFilter {
    /// Mapping used by the HTML list page (`not_completed`).
    pub fn from_page_param(raw: Option<&str>) -> Self {
        match raw {
            Some("all") => StatusFilter::All,
            Some("not_completed") => StatusFilter::NotCompleted,
            _ => StatusFilter::Completed,
        }
    }

    /// Mapping used by the JSON API (`not-completed`).
    pub fn from_api_param(raw: Option<&str>) -> Self {
        match raw {
            Some("all") => StatusFilter::All,
            Some("not-completed") => StatusFilter::NotCompleted,
            _ => StatusFilter::Completed,
        }
    }

    /// Required `is_completed` value, or `None` when unrestricted.
    pub fn completed(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Completed => Some(true),
            StatusFilter::NotCompleted => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_mapping() {
        assert_eq!(StatusFilter::from_page_param(Some("all")), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_page_param(Some("not_completed")),
            StatusFilter::NotCompleted
        );
        assert_eq!(StatusFilter::from_page_param(Some("completed")), StatusFilter::Completed);
        assert_eq!(StatusFilter::from_page_param(None), StatusFilter::Completed);
        // hyphenated spelling belongs to the API only
        assert_eq!(
            StatusFilter::from_page_param(Some("not-completed")),
            StatusFilter::Completed
        );
    }

    #[test]
    fn api_mapping() {
        assert_eq!(StatusFilter::from_api_param(Some("all")), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_api_param(Some("not-completed")),
            StatusFilter::NotCompleted
        );
        assert_eq!(StatusFilter::from_api_param(Some("bogus")), StatusFilter::Completed);
        assert_eq!(StatusFilter::from_api_param(None), StatusFilter::Completed);
        assert_eq!(
            StatusFilter::from_api_param(Some("not_completed")),
            StatusFilter::Completed
        );
    }

    #[test]
    fn completed_restriction() {
        assert_eq!(StatusFilter::All.completed(), None);
        assert_eq!(StatusFilter::Completed.completed(), Some(true));
        assert_eq!(StatusFilter::NotCompleted.completed(), Some(false));
    }
}
