use crate::dashboards::d400_vendor_dashboard::ui::VendorComparisonDashboard;
use crate::shared::api_utils::ApiConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_build_env();
    log::info!("Vendor API base: {}", config.base_url);

    // Backend location and cache polling interval for the whole app
    provide_context(config);

    view! {
        <VendorComparisonDashboard />
    }
}
