use crate::form::{Field, FieldOption};

/// Maximum number of suggestions shown under a choice field
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteItem {
    Existing(FieldOption),
    /// Offer to create a new entry with this name
    Create(String),
}

impl AutocompleteItem {
    pub fn label(&self) -> String {
        match self {
            Self::Existing(option) => option.text.clone(),
            Self::Create(name) => format!("+ Create \"{}\"", name),
        }
    }
}

/// Filter options by query string for autocomplete
/// Returns up to 10 matching options
pub fn filter_options(options: &[FieldOption], query: &str) -> Vec<FieldOption> {
    if query.is_empty() {
        return options.iter().take(MAX_SUGGESTIONS).cloned().collect();
    }

    let query_lower = query.to_lowercase();
    options
        .iter()
        .filter(|o| o.text.to_lowercase().contains(&query_lower))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Suggestions for a focused choice field.
///
/// Empty until the user types and again once a value is picked, so the
/// submit key never picks an entry the user did not ask for.
pub fn suggestions(field: &Field) -> Vec<AutocompleteItem> {
    if !field.is_choice() || field.held().is_some() {
        return Vec::new();
    }

    let query = field.input().trim();
    if query.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<AutocompleteItem> = filter_options(field.options(), query)
        .into_iter()
        .map(AutocompleteItem::Existing)
        .collect();

    let exact_match = field
        .options()
        .iter()
        .any(|o| o.text.eq_ignore_ascii_case(query));
    if field.allows_create() && !query.is_empty() && !exact_match {
        items.push(AutocompleteItem::Create(query.to_string()));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKey, SplitField};

    fn options() -> Vec<FieldOption> {
        vec![
            FieldOption::new("Alice", 1),
            FieldOption::new("Bob", 2),
            FieldOption::new("Alina", 3),
        ]
    }

    fn person_field(input: &str) -> Field {
        let mut field = Field::choice(FieldKey::split(0, SplitField::PersonId), "Person", options())
            .allow_create();
        for c in input.chars() {
            field.push_char(c);
        }
        field
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let matches = filter_options(&options(), "ALI");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "Alice");
        assert_eq!(matches[1].text, "Alina");
    }

    #[test]
    fn test_filter_caps_results() {
        let many: Vec<FieldOption> = (0..25)
            .map(|i| FieldOption::new(format!("Person {i}"), i))
            .collect();
        assert_eq!(filter_options(&many, "").len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_create_entry_offered_without_exact_match() {
        let items = suggestions(&person_field("Ali"));
        assert_eq!(
            items.last(),
            Some(&AutocompleteItem::Create("Ali".to_string()))
        );

        let items = suggestions(&person_field("bob"));
        assert_eq!(items, vec![AutocompleteItem::Existing(FieldOption::new("Bob", 2))]);
    }

    #[test]
    fn test_no_suggestions_before_typing() {
        assert!(suggestions(&person_field("")).is_empty());
        assert!(suggestions(&person_field("  ")).is_empty());
        assert_eq!(suggestions(&person_field("a")).len(), 4);
    }

    #[test]
    fn test_no_suggestions_after_selection() {
        let mut field = person_field("");
        field.select(&FieldOption::new("Bob", 2));
        assert!(suggestions(&field).is_empty());
    }
}
