use serde::Serialize;

use crate::categories::Category;
use crate::session::Scope;

/// Recorded result of clearing one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub category: Category,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn succeeded(category: Category) -> Self {
        Self {
            category,
            success: true,
            error: None,
        }
    }

    pub fn failed(category: Category, error: impl Into<String>) -> Self {
        Self {
            category,
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.success {
            "✓ Obliterated"
        } else {
            "✗ Shielded"
        }
    }
}

/// Aggregate view of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub scope: Scope,
    pub success_count: usize,
    pub fail_count: usize,
    pub message: String,
}

impl ResultsSummary {
    pub fn from_outcomes(outcomes: &[Outcome], scope: Scope) -> Self {
        let success_count = outcomes.iter().filter(|o| o.success).count();
        let fail_count = outcomes.len() - success_count;
        let message = if fail_count == 0 {
            format!("The target ({}) has been cleansed.", scope.target_name())
        } else {
            format!("{} cleared, {} resilient fragments.", success_count, fail_count)
        };
        Self {
            scope,
            success_count,
            fail_count,
            message,
        }
    }

    /// Every category cleared
    pub fn is_complete(&self) -> bool {
        self.fail_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{find, CategoryId};

    #[test]
    fn test_all_succeeded() {
        let outcomes = vec![
            Outcome::succeeded(*find(CategoryId::Cache)),
            Outcome::succeeded(*find(CategoryId::Cookies)),
        ];
        let summary = ResultsSummary::from_outcomes(&outcomes, Scope::Global);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.fail_count, 0);
        assert!(summary.is_complete());
        assert_eq!(summary.message, "The target (the global system) has been cleansed.");
    }

    #[test]
    fn test_partial() {
        let outcomes = vec![
            Outcome::succeeded(*find(CategoryId::Cache)),
            Outcome::failed(*find(CategoryId::Cookies), "permission denied"),
        ];
        let summary = ResultsSummary::from_outcomes(&outcomes, Scope::Site);
        assert!(!summary.is_complete());
        assert_eq!(summary.message, "1 cleared, 1 resilient fragments.");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Outcome::succeeded(*find(CategoryId::Cache)).status_label(), "✓ Obliterated");
        let failed = Outcome::failed(*find(CategoryId::Cache), "nope");
        assert_eq!(failed.status_label(), "✗ Shielded");
        assert_eq!(failed.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_outcome_json_omits_empty_error() {
        let json = serde_json::to_value(Outcome::succeeded(*find(CategoryId::Cache))).unwrap();
        assert_eq!(json["category"]["id"], "cache");
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }
}
