use leptos::prelude::*;

/// Text shown in the badge; `None` hides it.
pub fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[component]
pub fn NotificationBadge(#[prop(into)] count: Signal<usize>) -> impl IntoView {
    move || {
        badge_label(count.get())
            .map(|label| view! { <span class="badge badge-error badge-sm">{label}</span> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(99).as_deref(), Some("99"));
        assert_eq!(badge_label(100).as_deref(), Some("99+"));
    }
}
