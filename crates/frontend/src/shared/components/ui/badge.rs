use contracts::enums::RiskLevel;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

/// Risk level pill: low = emerald, medium = amber, high = red
#[component]
pub fn RiskBadge(
    #[prop(into)]
    level: Signal<RiskLevel>,
    /// Show the score next to the label
    #[prop(optional, into)]
    score: MaybeProp<u8>,
) -> impl IntoView {
    let text = move || {
        let level = level.get();
        match score.get() {
            Some(score) => format!("{} ({})", level.display_name(), score),
            None => level.display_name().to_string(),
        }
    };

    view! {
        <span class=move || level.get().badge_class() data-color=move || level.get().badge_color()>
            {text}
        </span>
    }
}
