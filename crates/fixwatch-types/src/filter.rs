use crate::models::{BugCategory, FixRecord};

/// Client-local projection over the fix table.
///
/// Narrows the rendered table and the report export. The CSV export always
/// covers the complete collection and ignores this filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(BugCategory),
}

impl CategoryFilter {
    pub fn matches(&self, record: &FixRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => record.bug_type == *category,
        }
    }

    pub fn apply<'a>(&self, records: &'a [FixRecord]) -> Vec<&'a FixRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Next filter in the cycle All -> Linting -> ... -> Deprecation -> All.
    pub fn next(&self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Category(BugCategory::ALL[0]),
            CategoryFilter::Category(category) => {
                let idx = BugCategory::ALL.iter().position(|c| c == category);
                match idx {
                    Some(i) if i + 1 < BugCategory::ALL.len() => {
                        CategoryFilter::Category(BugCategory::ALL[i + 1])
                    }
                    _ => CategoryFilter::All,
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "ALL",
            CategoryFilter::Category(category) => category.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixStatus, Severity};

    fn record(category: BugCategory) -> FixRecord {
        FixRecord {
            id: "r1_fix_0".to_string(),
            file: "src/lib.py".to_string(),
            line: 3,
            bug_type: category,
            description: "desc".to_string(),
            commit_message: "msg".to_string(),
            status: FixStatus::Fixed,
            timestamp: "2026-01-05T10:00:00".to_string(),
            severity: Severity::Low,
        }
    }

    #[test]
    fn all_matches_every_category() {
        let records = vec![record(BugCategory::Syntax), record(BugCategory::Security)];
        assert_eq!(CategoryFilter::All.apply(&records).len(), 2);
    }

    #[test]
    fn category_narrows_to_exact_matches() {
        let records = vec![
            record(BugCategory::Syntax),
            record(BugCategory::Security),
            record(BugCategory::Syntax),
        ];
        let filter = CategoryFilter::Category(BugCategory::Syntax);
        assert_eq!(filter.apply(&records).len(), 2);
    }

    #[test]
    fn cycle_visits_every_category_then_wraps() {
        let mut filter = CategoryFilter::All;
        for _ in 0..BugCategory::ALL.len() {
            filter = filter.next();
            assert_ne!(filter, CategoryFilter::All);
        }
        assert_eq!(filter.next(), CategoryFilter::All);
    }
}
