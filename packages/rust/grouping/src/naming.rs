//! Display names for keyword groups.

/// Capitalize the first letter of each space-separated word.
pub fn title_case(term: &str) -> String {
    term.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name for a group built from a single theme.
pub(crate) fn theme_name(term: &str) -> String {
    format!("{} Keywords", title_case(term))
}

/// Name for one chunk of a split theme group.
pub(crate) fn part_name(term: &str, part: usize) -> String {
    format!("{} Keywords (Part {part})", title_case(term))
}

/// Name for a group combined from zero or more small themes.
pub(crate) fn combined_name(terms: &[String]) -> String {
    match terms {
        [] => "Other Keywords".to_string(),
        [only] => theme_name(only),
        [first, second] => format!("{} & {} Keywords", title_case(first), title_case(second)),
        [first, second, ..] => format!(
            "Mixed Keywords ({}, {})",
            title_case(first),
            title_case(second)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("credit card"), "Credit Card");
        assert_eq!(title_case("loan"), "Loan");
        assert_eq!(title_case("401k rollover"), "401k Rollover");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn combined_names_by_theme_count() {
        assert_eq!(combined_name(&[]), "Other Keywords");
        assert_eq!(
            combined_name(&["credit card".into()]),
            "Credit Card Keywords"
        );
        assert_eq!(
            combined_name(&["loan".into(), "mortgage".into()]),
            "Loan & Mortgage Keywords"
        );
        assert_eq!(
            combined_name(&["loan".into(), "mortgage".into(), "credit".into()]),
            "Mixed Keywords (Loan, Mortgage)"
        );
    }

    #[test]
    fn part_names_are_numbered() {
        assert_eq!(part_name("loan", 2), "Loan Keywords (Part 2)");
    }
}
