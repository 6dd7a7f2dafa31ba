//! Group selection policy.

/// Picks the group to resolve: the explicit selection when present,
/// otherwise the sole visible group, otherwise nothing.
///
/// The single-group fallback is what makes one-group households work with
/// zero configuration. With several groups and no selection there is no
/// defensible pick, so the answer is none rather than an arbitrary group.
pub fn resolve_implicit_group<'a>(
    groups: &'a [String],
    explicit: Option<&'a str>,
) -> Option<&'a str> {
    match explicit {
        Some(group) => Some(group),
        None if groups.len() == 1 => Some(groups[0].as_str()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn explicit_selection_always_wins() {
        let visible = groups(&["Kitchen"]);
        assert_eq!(
            resolve_implicit_group(&visible, Some("Office")),
            Some("Office")
        );
    }

    #[test]
    fn sole_group_is_implied_without_selection() {
        let visible = groups(&["Kitchen"]);
        assert_eq!(resolve_implicit_group(&visible, None), Some("Kitchen"));
    }

    #[test]
    fn zero_groups_resolve_to_none() {
        assert_eq!(resolve_implicit_group(&[], None), None);
    }

    #[test]
    fn multiple_groups_resolve_to_none_without_selection() {
        let visible = groups(&["Kitchen", "Office"]);
        assert_eq!(resolve_implicit_group(&visible, None), None);
    }

    #[test]
    fn explicit_selection_applies_even_with_no_visible_groups() {
        assert_eq!(resolve_implicit_group(&[], Some("Attic")), Some("Attic"));
    }
}
