use super::cache_status::CacheStatusBar;
use super::kpi_cards::KpiCards;
use super::notifications::NotificationStack;
use super::recommendations_panel::RecommendationsPanel;
use super::risk_panel::RiskAnalysisPanel;
use super::vendor_detail::VendorDetailModal;
use super::vendor_table::VendorTable;
use super::view_model::DashboardViewModel;
use crate::shared::api_utils::use_api_config;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Vendor financial comparison dashboard
#[component]
pub fn VendorComparisonDashboard() -> impl IntoView {
    let vm = DashboardViewModel::new(use_api_config());

    vm.load();
    vm.start_cache_monitor();
    on_cleanup(move || vm.stop_cache_monitor());

    let busy = Signal::derive(move || vm.loading.get() || vm.refreshing.get());
    let no_data = Signal::derive(move || vm.vendors.with(|v| v.is_empty()));

    let content = move || {
        if vm.loading.get() && !vm.has_loaded.get() {
            return view! {
                <div class="d400-loading">
                    <span>"Loading vendor data..."</span>
                </div>
            }
            .into_any();
        }

        // Blocking error only while there is nothing to show
        if let Some(err) = vm.load_error.get().filter(|_| no_data.get()) {
            return view! {
                <div class="d400-error">
                    {icon("alert")}
                    <div>
                        <strong>"Unable to load vendor data"</strong>
                        <p>{err}</p>
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.load()>
                        "Retry"
                    </Button>
                </div>
            }
            .into_any();
        }

        view! {
            <KpiCards
                kpis=vm.kpis
                derived=Signal::derive(move || vm.server_kpis.with(|k| k.is_none()))
            />
            <VendorTable vm=vm />
            <div class="dashboard-columns">
                <RiskAnalysisPanel analysis=vm.risk_analysis />
                <RecommendationsPanel recommendations=vm.recommendations />
            </div>
        }
        .into_any()
    };

    view! {
        <div id="d400_vendor_comparison--dashboard" data-page-category="dashboard" class="page page--dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Vendor Financial Comparison"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.refresh()
                        disabled=busy
                    >
                        {icon("refresh")}
                        {move || if vm.refreshing.get() { " Refreshing..." } else { " Refresh" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.export_csv()
                        disabled=Signal::derive(move || vm.exporting.get() || busy.get())
                    >
                        {icon("download")}
                        " Export CSV"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.export_report()
                        disabled=busy
                    >
                        {icon("file-text")}
                        " Export Report"
                    </Button>
                </div>
            </div>

            <CacheStatusBar vm=vm />
            <NotificationStack vm=vm />

            <div class="page__content">
                {content}
            </div>

            <VendorDetailModal vm=vm />
        </div>
    }
}
