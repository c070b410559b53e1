//! Seed backlog shown before the user enters anything

use crate::record::FeatureDraft;

/// The four starter features
#[must_use]
pub fn default_backlog() -> Vec<FeatureDraft> {
    vec![
        FeatureDraft::new("AI-Powered Search", 8.0, 9.0, 7.0, 5.0),
        FeatureDraft::new("Mobile App", 9.0, 8.0, 6.0, 9.0),
        FeatureDraft::new("Analytics Dashboard", 6.0, 7.0, 8.0, 4.0),
        FeatureDraft::new("Social Integration", 7.0, 6.0, 7.0, 3.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureStore;

    #[test]
    fn default_backlog_is_valid_and_ranks() {
        let store = FeatureStore::from_drafts(default_backlog()).unwrap();
        let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "AI-Powered Search",
                "Social Integration",
                "Analytics Dashboard",
                "Mobile App"
            ]
        );
    }
}
