use super::view_model::DashboardViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Backend cache health with manual maintenance actions
#[component]
pub fn CacheStatusBar(vm: DashboardViewModel) -> impl IntoView {
    let summary = move || match vm.cache_status.get() {
        Some(status) => {
            let m = status.cache_metrics;
            format!(
                "Cache: {} items, {:.0}% fresh, avg age {:.1}h{}",
                m.total_cached_items,
                m.cache_freshness_percentage,
                m.average_cache_age_hours,
                if m.optimization_needed { " (optimizing)" } else { "" }
            )
        }
        None => "Cache: status unknown".to_string(),
    };

    let hint = move || {
        vm.cache_status
            .get()
            .and_then(|s| s.recommendations.first().cloned())
            .unwrap_or_default()
    };

    let no_vendors = Signal::derive(move || vm.vendors.with(|v| v.is_empty()));

    view! {
        <div class="cache-bar">
            <span class="cache-bar__summary" title=hint>
                {icon("database")}
                " "
                {summary}
            </span>
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| vm.preload_cache()
                disabled=no_vendors
            >
                "Preload cache"
            </Button>
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=move |_| vm.clear_expired_cache()
            >
                "Clear expired"
            </Button>
        </div>
    }
}
