//! Suggestions grouped by severity, with a short action plan

use crate::model::{Suggestion, SuggestionType};

pub const EMPTY_MESSAGE: &str = "Great job! No major improvements needed.";
const REUPLOAD_ACTION: &str = "Re-upload your resume after making changes to see improvements";

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionGroup<'a> {
    pub kind: SuggestionType,
    pub items: Vec<&'a Suggestion>,
}

/// Group suggestions by type in severity order, dropping empty groups.
/// Backend order is kept within each group.
pub fn group_suggestions(suggestions: &[Suggestion]) -> Vec<SuggestionGroup<'_>> {
    SuggestionType::ALL
        .into_iter()
        .map(|kind| SuggestionGroup {
            kind,
            items: suggestions.iter().filter(|s| s.kind == kind).collect(),
        })
        .filter(|group| !group.items.is_empty())
        .collect()
}

pub fn action_items(groups: &[SuggestionGroup<'_>]) -> Vec<String> {
    let mut items: Vec<String> = groups
        .iter()
        .map(|group| {
            let n = group.items.len();
            match group.kind {
                SuggestionType::Critical => format!("Address {} critical issue(s) first", n),
                SuggestionType::Important => format!("Work on {} important improvement(s)", n),
                SuggestionType::Moderate => format!("Consider {} minor enhancement(s)", n),
            }
        })
        .collect();
    items.push(REUPLOAD_ACTION.to_string());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Impact;

    fn suggestion(kind: SuggestionType, text: &str) -> Suggestion {
        Suggestion {
            kind,
            category: "General".to_string(),
            suggestion: text.to_string(),
            impact: Impact::Medium,
        }
    }

    #[test]
    fn test_grouping_order_and_actions() {
        let suggestions = vec![
            suggestion(SuggestionType::Moderate, "m1"),
            suggestion(SuggestionType::Critical, "c1"),
            suggestion(SuggestionType::Moderate, "m2"),
        ];
        let groups = group_suggestions(&suggestions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, SuggestionType::Critical);
        assert_eq!(groups[1].items[1].suggestion, "m2");

        assert_eq!(
            action_items(&groups),
            vec![
                "Address 1 critical issue(s) first",
                "Consider 2 minor enhancement(s)",
                "Re-upload your resume after making changes to see improvements",
            ]
        );
    }

    #[test]
    fn test_empty_suggestions() {
        let groups = group_suggestions(&[]);
        assert!(groups.is_empty());
        assert_eq!(action_items(&groups).len(), 1);
    }
}
