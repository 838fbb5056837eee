//! Parsing "add X, Y and Z to the list" phrasings

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::value_objects::ListType;

/// Checked in order; first set with a hit decides the list
const LIST_KEYWORDS: &[(ListType, &[&str])] = &[
    (ListType::Equipment, &["equipment", "tool", "gear"]),
    (ListType::Supplies, &["supply", "supplies", "material"]),
    (ListType::Safety, &["safety", "ppe", "protective"]),
];

fn add_pattern() -> &'static Regex {
    static ADD: OnceLock<Regex> = OnceLock::new();
    ADD.get_or_init(|| {
        Regex::new(
            r"(?i)\badd\s+(.+?)(?:\s+(?:to|on|onto)\s+(?:the\s+|my\s+|our\s+)?(?:[\w\s'-]*?\b(?:list|inventory)|equipment|supply|supplies|safety)\b)?[\s.!]*$",
        )
        .expect("add pattern is valid")
    })
}

fn separator_pattern() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+and\s+").expect("separator pattern is valid")
    })
}

/// List named in the text, if any
pub fn mentioned_list_type(text: &str) -> Option<ListType> {
    let lowered = text.to_lowercase();
    LIST_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(list_type, _)| *list_type)
}

/// List named in the text, or the general list
pub fn infer_list_type(text: &str) -> ListType {
    mentioned_list_type(text).unwrap_or_default()
}

/// Candidate item names, trimmed, empties dropped
pub fn parse_list_items(text: &str) -> Vec<String> {
    let Some(span) = add_pattern()
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };

    separator_pattern()
        .split(span.as_str())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_before_list_suffix() {
        assert_eq!(
            parse_list_items("Add WD-40 and rags to the Site Alpha shopping list"),
            vec!["WD-40", "rags"]
        );
        assert_eq!(
            parse_list_items("Add backup hard drive to equipment inventory"),
            vec!["backup hard drive"]
        );
    }

    #[test]
    fn test_commas_and_oxford_and() {
        assert_eq!(
            parse_list_items("add gloves, goggles, and ear plugs to the safety list"),
            vec!["gloves", "goggles", "ear plugs"]
        );
    }

    #[test]
    fn test_without_list_suffix() {
        assert_eq!(parse_list_items("add zip ties"), vec!["zip ties"]);
        assert_eq!(parse_list_items("Please add fuses to supplies."), vec!["fuses"]);
    }

    #[test]
    fn test_no_add_phrase_yields_nothing() {
        assert!(parse_list_items("we are out of fuses").is_empty());
        assert!(parse_list_items("add , ,").is_empty());
    }

    #[test]
    fn test_list_type_priority() {
        assert_eq!(infer_list_type("add safety gear"), ListType::Equipment);
        assert_eq!(infer_list_type("add materials"), ListType::Supplies);
        assert_eq!(infer_list_type("add PPE vests"), ListType::Safety);
        assert_eq!(infer_list_type("add milk"), ListType::General);
        assert_eq!(mentioned_list_type("show the list"), None);
    }
}
