use crate::shared::components::stat_card::{StatCard, StatTone};
use contracts::dashboards::d400_vendor_comparison::PortfolioKpis;
use leptos::prelude::*;

/// Average combined score at or above this reads as healthy
const HEALTHY_SCORE: u32 = 70;

#[component]
pub fn KpiCards(
    #[prop(into)]
    kpis: Signal<PortfolioKpis>,
    /// True when the values were computed locally from the vendor list
    #[prop(into)]
    derived: Signal<bool>,
) -> impl IntoView {
    let source_note = Signal::derive(move || {
        derived
            .get()
            .then(|| "Calculated from vendor list".to_string())
    });

    let score_tone = Signal::derive(move || {
        let k = kpis.get();
        if k.active_vendors == 0 {
            StatTone::Neutral
        } else if k.avg_risk_score >= HEALTHY_SCORE {
            StatTone::Good
        } else {
            StatTone::Warning
        }
    });

    let high_risk_tone = Signal::derive(move || {
        if kpis.get().high_risk_vendors > 0 {
            StatTone::Bad
        } else {
            StatTone::Good
        }
    });

    view! {
        <div class="kpi-grid">
            <StatCard
                label="Total Portfolio Value".to_string()
                icon_name="dollar"
                value=Signal::derive(move || kpis.get().total_portfolio_value)
                subtitle=source_note
            />
            <StatCard
                label="Avg Profit Margin".to_string()
                icon_name="trending-up"
                value=Signal::derive(move || kpis.get().avg_profit_margin)
            />
            <StatCard
                label="Active Vendors".to_string()
                icon_name="suppliers"
                value=Signal::derive(move || kpis.get().active_vendors.to_string())
            />
            <StatCard
                label="Avg Risk Score".to_string()
                icon_name="shield"
                value=Signal::derive(move || kpis.get().avg_risk_score.to_string())
                tone=score_tone
            />
            <StatCard
                label="High Risk Vendors".to_string()
                icon_name="alert"
                value=Signal::derive(move || kpis.get().high_risk_vendors.to_string())
                tone=high_risk_tone
            />
            <StatCard
                label="Top Performer".to_string()
                icon_name="award"
                value=Signal::derive(move || kpis.get().top_performing_vendor)
            />
        </div>
    }
}
