use crate::dashboards::d400_vendor_dashboard::api;
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::ApiConfig;
use crate::shared::export::{download_text, CSV_MIME, TEXT_MIME};
use contracts::dashboards::d400_vendor_comparison::{
    filter_and_sort, generate_recommendations, PortfolioKpis, Recommendation, RiskAnalysis,
    RiskFilter, SortField, SortState, TypeFilter, VendorFilters,
};
use contracts::domain::a001_vendor::VendorRecord;
use contracts::shared::export::{export_filename, generate_text_report, to_csv_string};
use contracts::system::sys_cache::dto::{CacheStatus, MAX_PRELOAD_SYMBOLS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a notification stays on screen
const NOTIFICATION_TTL_MS: u32 = 5_000;

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    /// Server export failed and a locally generated file was used instead
    Fallback,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Info => "notification notification--info",
            NotificationKind::Fallback => "notification notification--fallback",
            NotificationKind::Error => "notification notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

// ============================================================================
// Load outcomes
// ============================================================================

/// What a vendor list fetch does to the screen
#[derive(Debug, Clone, PartialEq)]
enum VendorLoad {
    /// Show this list
    Replace(Vec<VendorRecord>),
    /// Keep the list on screen and report the failure
    KeepStale(String),
    /// Nothing usable to show
    Blocking(String),
}

/// A refresh never wipes data that is already shown. An unreadable payload
/// on the first load shows an empty list.
fn classify_vendor_load(
    result: Result<Vec<VendorRecord>, ApiError>,
    is_refresh: bool,
    has_data: bool,
) -> VendorLoad {
    match result {
        Ok(list) => VendorLoad::Replace(list),
        Err(e) if is_refresh && has_data => VendorLoad::KeepStale(e.user_message()),
        Err(ApiError::Parse(_)) => VendorLoad::Replace(Vec::new()),
        Err(e) => VendorLoad::Blocking(e.user_message()),
    }
}

/// A late detail response applies only to the vendor still awaited
fn detail_still_wanted(pending: Option<&str>, symbol: &str) -> bool {
    pending == Some(symbol)
}

/// A monitor loop keeps polling only while it is the running generation
fn monitor_is_current(running: Option<u64>, generation: u64) -> bool {
    running == Some(generation)
}

// ============================================================================
// ViewModel
// ============================================================================

/// State and commands of the vendor comparison dashboard.
///
/// Rendering components only read signals from here; every async call,
/// fallback and timer lives in this type.
#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    config: StoredValue<ApiConfig>,

    pub vendors: RwSignal<Vec<VendorRecord>>,
    /// KPIs from the backend; `None` means the client-side fallback is shown
    pub server_kpis: RwSignal<Option<PortfolioKpis>>,
    pub loading: RwSignal<bool>,
    pub refreshing: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    pub has_loaded: RwSignal<bool>,

    pub filters: RwSignal<VendorFilters>,
    pub sort: RwSignal<SortState>,

    pub selected_vendor: RwSignal<Option<VendorRecord>>,
    pub detail_loading: RwSignal<bool>,
    /// Symbol whose detail is awaited; cleared on close
    pending_detail: StoredValue<Option<String>>,

    pub exporting: RwSignal<bool>,
    pub cache_status: RwSignal<Option<CacheStatus>>,
    pub notifications: RwSignal<Vec<Notification>>,

    next_notification_id: StoredValue<u64>,
    /// Generation of the running cache monitor, `None` when stopped
    monitor_running: StoredValue<Option<u64>>,
    monitor_generation: StoredValue<u64>,

    pub visible_vendors: Memo<Vec<VendorRecord>>,
    pub kpis: Memo<PortfolioKpis>,
    pub risk_analysis: Memo<RiskAnalysis>,
    pub recommendations: Memo<Vec<Recommendation>>,
}

impl DashboardViewModel {
    pub fn new(config: ApiConfig) -> Self {
        let vendors = RwSignal::new(Vec::<VendorRecord>::new());
        let server_kpis = RwSignal::new(None::<PortfolioKpis>);
        let filters = RwSignal::new(VendorFilters::default());
        let sort = RwSignal::new(SortState::default());

        let visible_vendors = Memo::new(move |_| {
            vendors.with(|list| filter_and_sort(list, &filters.get(), sort.get()))
        });
        let kpis = Memo::new(move |_| {
            server_kpis
                .get()
                .unwrap_or_else(|| vendors.with(|list| PortfolioKpis::derive(list)))
        });
        let risk_analysis =
            Memo::new(move |_| vendors.with(|list| RiskAnalysis::from_vendors(list)));
        let recommendations =
            Memo::new(move |_| vendors.with(|list| generate_recommendations(list)));

        Self {
            config: StoredValue::new(config),
            vendors,
            server_kpis,
            loading: RwSignal::new(false),
            refreshing: RwSignal::new(false),
            load_error: RwSignal::new(None),
            has_loaded: RwSignal::new(false),
            filters,
            sort,
            selected_vendor: RwSignal::new(None),
            detail_loading: RwSignal::new(false),
            pending_detail: StoredValue::new(None),
            exporting: RwSignal::new(false),
            cache_status: RwSignal::new(None),
            notifications: RwSignal::new(Vec::new()),
            next_notification_id: StoredValue::new(1),
            monitor_running: StoredValue::new(None),
            monitor_generation: StoredValue::new(0),
            visible_vendors,
            kpis,
            risk_analysis,
            recommendations,
        }
    }

    pub fn config(&self) -> ApiConfig {
        self.config.get_value()
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Initial load; a failure with no data yet becomes a blocking error
    pub fn load(&self) {
        if self.loading.get_untracked() {
            return;
        }
        self.loading.set(true);
        self.load_error.set(None);
        let this = *self;
        spawn_local(async move {
            this.fetch_all(false).await;
            this.loading.set(false);
        });
    }

    /// Re-fetch; on failure stale data stays and a notification is shown
    pub fn refresh(&self) {
        if self.refreshing.get_untracked() || self.loading.get_untracked() {
            return;
        }
        if !self.has_loaded.get_untracked() {
            self.load();
            return;
        }
        self.refreshing.set(true);
        let this = *self;
        spawn_local(async move {
            if this.fetch_all(true).await {
                this.notify(NotificationKind::Success, "Vendor data refreshed");
            }
            this.refreshing.set(false);
        });
    }

    /// Vendors and KPIs in parallel. Returns whether the vendor list loaded.
    async fn fetch_all(self, is_refresh: bool) -> bool {
        let config = self.config();
        let (vendors, kpis) = futures::join!(
            api::fetch_vendors(&config),
            api::fetch_portfolio_kpis(&config)
        );

        match kpis {
            Ok(kpis) => self.server_kpis.set(Some(kpis)),
            Err(e) => {
                log::warn!("Portfolio KPIs unavailable, deriving client-side: {}", e);
                self.server_kpis.set(None);
            }
        }

        let has_data = !self.vendors.with_untracked(|v| v.is_empty());
        let vendors = vendors.inspect_err(|e| log::error!("Failed to load vendors: {}", e));
        match classify_vendor_load(vendors, is_refresh, has_data) {
            VendorLoad::Replace(list) => {
                if list.is_empty() {
                    log::warn!("Vendor list is empty or unreadable");
                } else {
                    log::info!("Loaded {} vendors", list.len());
                }
                let placeholders = list.iter().filter(|v| v.is_placeholder).count();
                if placeholders > 0 {
                    log::debug!("{} vendor records could not be mapped", placeholders);
                }
                self.vendors.set(list);
                self.load_error.set(None);
                self.has_loaded.set(true);
                true
            }
            VendorLoad::KeepStale(message) => {
                self.notify(NotificationKind::Error, format!("Refresh failed: {}", message));
                false
            }
            VendorLoad::Blocking(message) => {
                self.load_error.set(Some(message));
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Table state
    // ------------------------------------------------------------------------

    pub fn set_search(&self, search: String) {
        self.filters.update(|f| f.search = search);
    }

    pub fn set_type_filter(&self, type_filter: TypeFilter) {
        self.filters.update(|f| f.type_filter = type_filter);
    }

    pub fn set_risk_filter(&self, risk_filter: RiskFilter) {
        self.filters.update(|f| f.risk_filter = risk_filter);
    }

    pub fn reset_filters(&self) {
        self.filters.set(VendorFilters::default());
    }

    pub fn toggle_sort(&self, field: SortField) {
        self.sort.update(|s| *s = s.toggle(field));
    }

    // ------------------------------------------------------------------------
    // Exports
    // ------------------------------------------------------------------------

    /// Server CSV first; on failure a locally generated CSV
    pub fn export_csv(&self) {
        if self.exporting.get_untracked() {
            return;
        }
        self.exporting.set(true);
        let this = *self;
        spawn_local(async move {
            let filename = export_filename(chrono::Local::now().naive_local(), "csv");
            match api::export_csv(&this.config()).await {
                Ok(csv) => match download_text(&csv, &filename, CSV_MIME) {
                    Ok(()) => this.notify(NotificationKind::Success, "CSV export downloaded"),
                    Err(e) => {
                        log::error!("CSV download failed: {}", e);
                        this.notify(NotificationKind::Error, "CSV download failed");
                    }
                },
                Err(e) => {
                    log::warn!("Server CSV export failed, generating locally: {}", e);
                    this.export_csv_locally(&filename);
                }
            }
            this.exporting.set(false);
        });
    }

    fn export_csv_locally(&self, filename: &str) {
        let csv = self.vendors.with_untracked(|list| to_csv_string(list));
        let result = csv
            .map_err(|e| e.to_string())
            .and_then(|content| download_text(&content, filename, CSV_MIME));
        match result {
            Ok(()) => self.notify(
                NotificationKind::Fallback,
                "Server export unavailable. Downloaded a locally generated CSV instead.",
            ),
            Err(e) => {
                log::error!("Local CSV export failed: {}", e);
                self.notify(NotificationKind::Error, "CSV export failed");
            }
        }
    }

    pub fn export_report(&self) {
        let now = chrono::Local::now().naive_local();
        let kpis = self.kpis.get_untracked();
        let report = self
            .vendors
            .with_untracked(|list| generate_text_report(list, &kpis, now));
        match download_text(&report, &export_filename(now, "txt"), TEXT_MIME) {
            Ok(()) => self.notify(NotificationKind::Success, "Report downloaded"),
            Err(e) => {
                log::error!("Report download failed: {}", e);
                self.notify(NotificationKind::Error, "Report generation failed");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Vendor detail
    // ------------------------------------------------------------------------

    /// Show the list record at once, then replace it with the detailed one
    pub fn open_vendor(&self, symbol: String) {
        let from_list = self
            .vendors
            .with_untracked(|list| list.iter().find(|v| v.symbol == symbol).cloned());
        self.selected_vendor.set(from_list);
        self.pending_detail.set_value(Some(symbol.clone()));
        self.detail_loading.set(true);

        let this = *self;
        spawn_local(async move {
            match api::fetch_vendor_detail(&this.config(), &symbol).await {
                Ok(detail) if !detail.is_placeholder => {
                    if this.is_awaiting(&symbol) {
                        this.selected_vendor.set(Some(detail));
                    } else {
                        log::debug!("Detail for {} arrived after close", symbol);
                    }
                }
                Ok(_) => log::warn!("Detail for {} could not be mapped, keeping list data", symbol),
                Err(e) => log::warn!("Detail for {} unavailable: {}", symbol, e),
            }
            if this.is_awaiting(&symbol) {
                this.pending_detail.set_value(None);
                this.detail_loading.set(false);
            }
        });
    }

    pub fn close_vendor(&self) {
        self.pending_detail.set_value(None);
        self.selected_vendor.set(None);
        self.detail_loading.set(false);
    }

    fn is_awaiting(&self, symbol: &str) -> bool {
        self.pending_detail
            .try_with_value(|pending| detail_still_wanted(pending.as_deref(), symbol))
            .unwrap_or(false)
    }

    fn is_showing(&self, symbol: &str) -> bool {
        self.selected_vendor
            .try_with_untracked(|s| s.as_ref().is_some_and(|v| v.symbol == symbol))
            .unwrap_or(false)
    }

    /// Force the backend to rebuild one vendor's cached data, then reload it
    pub fn refresh_vendor(&self, symbol: String) {
        let this = *self;
        self.detail_loading.set(true);
        spawn_local(async move {
            match api::refresh_vendor(&this.config(), &symbol).await {
                Ok(resp) => {
                    log::info!("Refreshed {}: {}", symbol, resp.message);
                    this.notify(NotificationKind::Success, format!("{} data refreshed", symbol));
                    if this.is_showing(&symbol) {
                        this.open_vendor(symbol);
                    }
                }
                Err(e) => {
                    log::error!("Refresh of {} failed: {}", symbol, e);
                    this.notify(NotificationKind::Error, e.user_message());
                    if this.is_showing(&symbol) {
                        this.detail_loading.try_set(false);
                    }
                }
            }
        });
    }

    // ------------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------------

    /// Periodic cache health check; runs until `stop_cache_monitor`
    pub fn start_cache_monitor(&self) {
        if self.monitor_running.get_value().is_some() {
            return;
        }
        let generation = self.monitor_generation.get_value() + 1;
        self.monitor_generation.set_value(generation);
        self.monitor_running.set_value(Some(generation));
        let this = *self;
        spawn_local(async move {
            let interval = this.config().cache_check_millis();
            loop {
                this.check_cache().await;
                TimeoutFuture::new(interval).await;
                let running = this.monitor_running.try_get_value().flatten();
                if !monitor_is_current(running, generation) {
                    log::debug!("Cache monitor {} stopped", generation);
                    break;
                }
            }
        });
    }

    pub fn stop_cache_monitor(&self) {
        self.monitor_running.try_set_value(None);
    }

    async fn check_cache(self) {
        let config = match self.config.try_get_value() {
            Some(config) => config,
            None => return,
        };
        match api::fetch_cache_status(&config).await {
            Ok(status) => {
                let needs_optimization = status.needs_optimization();
                self.cache_status.try_set(Some(status));
                if needs_optimization {
                    match api::optimize_cache(&config).await {
                        Ok(resp) => log::info!("Cache optimization: {}", resp.message),
                        Err(e) => log::warn!("Cache optimization failed: {}", e),
                    }
                }
            }
            // Backend offline is already reported by the vendor load
            Err(e) if e.is_network() => log::debug!("Cache status unavailable: {}", e),
            Err(e) => log::warn!("Cache status unavailable: {}", e),
        }
    }

    /// Warm the backend cache for the listed vendors
    pub fn preload_cache(&self) {
        let symbols: Vec<String> = self.vendors.with_untracked(|list| {
            list.iter()
                .filter(|v| !v.is_placeholder)
                .take(MAX_PRELOAD_SYMBOLS)
                .map(|v| v.symbol.clone())
                .collect()
        });
        let this = *self;
        spawn_local(async move {
            match api::preload_cache(&this.config(), &symbols).await {
                Ok(resp) => {
                    log::info!("Cache preload: {}", resp.message);
                    this.notify(
                        NotificationKind::Info,
                        format!(
                            "Preloading {} vendors (about {:.0} min)",
                            resp.symbols.len(),
                            resp.estimated_completion_minutes.ceil()
                        ),
                    );
                }
                Err(e) => {
                    log::error!("Cache preload failed: {}", e);
                    this.notify(NotificationKind::Error, e.user_message());
                }
            }
        });
    }

    pub fn clear_expired_cache(&self) {
        let this = *self;
        spawn_local(async move {
            match api::clear_expired_cache(&this.config()).await {
                Ok(resp) => {
                    log::info!("Cleared {} expired cache entries", resp.entries_cleared);
                    this.notify(
                        NotificationKind::Success,
                        format!("Cleared {} expired cache entries", resp.entries_cleared),
                    );
                    this.check_cache().await;
                }
                Err(e) => {
                    log::error!("Clearing expired cache failed: {}", e);
                    this.notify(NotificationKind::Error, e.user_message());
                }
            }
        });
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let Some(id) = self.next_notification_id.try_get_value() else {
            return;
        };
        self.next_notification_id.set_value(id + 1);
        self.notifications.try_update(|list| {
            list.push(Notification {
                id,
                kind,
                message: message.into(),
            })
        });

        let notifications = self.notifications;
        spawn_local(async move {
            TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
            notifications.try_update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|list| list.retain(|n| n.id != id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_vendor::normalize_vendor;
    use serde_json::json;

    fn vendors() -> Vec<VendorRecord> {
        vec![normalize_vendor(&json!({"symbol": "TEL", "name": "TE Connectivity"}))]
    }

    #[test]
    fn test_first_load_outcomes() {
        assert_eq!(
            classify_vendor_load(Ok(vendors()), false, false),
            VendorLoad::Replace(vendors())
        );
        assert_eq!(
            classify_vendor_load(Err(ApiError::Parse("not a list".into())), false, false),
            VendorLoad::Replace(Vec::new())
        );
        assert!(matches!(
            classify_vendor_load(Err(ApiError::Network("offline".into())), false, false),
            VendorLoad::Blocking(_)
        ));
    }

    #[test]
    fn test_failed_refresh_keeps_data_on_screen() {
        for err in [
            ApiError::Parse("not a list".into()),
            ApiError::Network("offline".into()),
            ApiError::Http { status: 500, url: String::new() },
        ] {
            assert!(matches!(
                classify_vendor_load(Err(err), true, true),
                VendorLoad::KeepStale(_)
            ));
        }
    }

    #[test]
    fn test_refresh_without_data_behaves_like_first_load() {
        assert_eq!(
            classify_vendor_load(Err(ApiError::Parse("x".into())), true, false),
            VendorLoad::Replace(Vec::new())
        );
    }

    #[test]
    fn test_empty_vendor_list_reads_as_healthy_portfolio() {
        let VendorLoad::Replace(list) = classify_vendor_load(Ok(Vec::new()), false, false) else {
            panic!("empty list should be shown");
        };
        assert!(generate_recommendations(&list).is_empty());
    }

    #[test]
    fn test_late_detail_is_ignored_after_close() {
        assert!(detail_still_wanted(Some("TEL"), "TEL"));
        assert!(!detail_still_wanted(None, "TEL"));
        assert!(!detail_still_wanted(Some("DD"), "TEL"));
    }

    #[test]
    fn test_restarted_monitor_retires_old_loop() {
        // stop() then start() before the first loop wakes up
        assert!(monitor_is_current(Some(1), 1));
        assert!(!monitor_is_current(None, 1));
        assert!(!monitor_is_current(Some(2), 1));
        assert!(monitor_is_current(Some(2), 2));
    }
}
