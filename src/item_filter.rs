/// Case-insensitive substring matching for the filter field
pub struct ItemFilter;

impl ItemFilter {
    /// Whether `label` should stay visible under `filter`. An empty filter
    /// matches everything.
    pub fn matches(label: &str, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        label.to_lowercase().contains(&filter.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        assert!(ItemFilter::matches("Whole Milk", "milk"));
        assert!(ItemFilter::matches("whole milk", "MILK"));
        assert!(ItemFilter::matches("Milk", "il"));
        assert!(!ItemFilter::matches("Bread", "milk"));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(ItemFilter::matches("Bread", ""));
        assert!(ItemFilter::matches("", ""));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        assert!(ItemFilter::matches("Äpfel", "äpf"));
        assert!(!ItemFilter::matches("Äpfel", "apf"));
    }
}
