use super::view_model::DashboardViewModel;
use crate::shared::components::ui::badge::RiskBadge;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a001_vendor::VendorRecord;
use contracts::shared::format::{
    format_change, format_currency_billions, format_pe_ratio, format_percentage, format_price,
    format_ratio, format_raw_currency_as_billions, NOT_AVAILABLE,
};
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

fn metric_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-metric">
            <span class="detail-metric__label">{label}</span>
            <span class="detail-metric__value">{value}</span>
        </div>
    }
}

fn vendor_body(v: VendorRecord) -> impl IntoView {
    let quarters = v.quarterly_revenue.clone();
    let quarter_count = quarters.len();
    let balance = v.balance_sheet;

    view! {
        <div class="vendor-detail">
            <div class="vendor-detail__summary">
                <RiskBadge level=v.risk_level score=v.risk_score />
                <span class="vendor-detail__type">{v.vendor_type.clone()}</span>
                <span class="vendor-detail__industry">{v.industry.display_name()}</span>
            </div>

            <div class="vendor-detail__grid">
                <div class="vendor-detail__block">
                    <h3>"Market"</h3>
                    {metric_row("Market Cap", format_currency_billions(v.market_cap))}
                    {metric_row("Current Price", format_price(v.current_price))}
                    {metric_row("52W High", format_price(v.week_high_52))}
                    {metric_row("52W Low", format_price(v.week_low_52))}
                    {metric_row(
                        "Position in 52W Range",
                        v.price_range_position
                            .map(|p| format!("{:.0}%", p))
                            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    )}
                    {metric_row("Beta", format!("{:.2}", v.beta))}
                    {metric_row("P/E Ratio", format_pe_ratio(v.pe_ratio))}
                </div>

                <div class="vendor-detail__block">
                    <h3>"Profitability"</h3>
                    {metric_row("Revenue", format_currency_billions(v.revenue))}
                    {metric_row("Profit Margin", format_percentage(v.profit_margin))}
                    {metric_row("ROE", format_percentage(v.roe))}
                    {metric_row("Revenue QoQ", format_change(v.revenue_qoq_change))}
                </div>

                <div class="vendor-detail__block">
                    <h3>"Balance Sheet"</h3>
                    {metric_row("Total Assets", format_raw_currency_as_billions(balance.total_assets))}
                    {metric_row("Total Liabilities", format_raw_currency_as_billions(balance.total_liabilities))}
                    {metric_row("Shareholder Equity", format_raw_currency_as_billions(balance.shareholder_equity))}
                    {metric_row("Cash", format_raw_currency_as_billions(balance.cash))}
                    {metric_row("Debt to Equity", format_ratio(v.debt_to_equity))}
                    {metric_row("Leverage", v.debt_equity_bucket.display_name().to_string())}
                    {metric_row("Current Ratio", format_ratio(v.current_ratio))}
                    {metric_row("Cash Ratio", format_ratio(v.cash_ratio))}
                </div>

                <div class="vendor-detail__block">
                    <h3>"Scores"</h3>
                    {metric_row("Financial Health", v.financial_health.to_string())}
                    {metric_row("Market Stability", v.market_stability.to_string())}
                    {metric_row("Growth Prospects", v.growth_prospects.to_string())}
                    {metric_row("Financial Stability", v.financial_stability.to_string())}
                </div>
            </div>

            <div class="vendor-detail__block">
                <h3>"Quarterly Revenue"</h3>
                {if quarters.is_empty() {
                    view! { <div class="vendor-detail__empty">"No quarterly data available."</div> }.into_any()
                } else {
                    view! {
                        <ol class="quarter-list">
                            {quarters
                                .into_iter()
                                .enumerate()
                                .map(|(i, revenue)| {
                                    let label = if i + 1 == quarter_count {
                                        "Latest".to_string()
                                    } else {
                                        format!("Q-{}", quarter_count - 1 - i)
                                    };
                                    view! {
                                        <li class="quarter-list__item">
                                            <span>{label}</span>
                                            <span>{format_currency_billions(revenue)}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ol>
                    }.into_any()
                }}
            </div>

            {v.last_updated.clone().map(|ts| view! {
                <div class="vendor-detail__updated">{format!("Last updated: {}", ts)}</div>
            })}
        </div>
    }
}

/// Detail dialog for the selected vendor
#[component]
pub fn VendorDetailModal(vm: DashboardViewModel) -> impl IntoView {
    let on_close = Callback::new(move |_: ()| vm.close_vendor());

    move || {
        vm.selected_vendor.get().map(|vendor| {
            let symbol = vendor.symbol.clone();
            let title = vendor.name.clone();
            let subtitle = Some(vendor.symbol.clone());
            let refresh_symbol = symbol.clone();
            let action_buttons: ChildrenFn = Arc::new(move || {
                let refresh_symbol = refresh_symbol.clone();
                view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        size=ButtonSize::Small
                        on_click=move |_| vm.refresh_vendor(refresh_symbol.clone())
                        disabled=Signal::derive(move || vm.detail_loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                }
                .into_any()
            });

            view! {
                <Modal
                    title=title
                    subtitle=subtitle
                    on_close=on_close
                    action_buttons=action_buttons
                >
                    {move || vm.detail_loading.get().then(|| view! {
                        <div class="vendor-detail__loading">"Loading latest details..."</div>
                    })}
                    {vendor_body(vendor.clone())}
                </Modal>
            }
        })
    }
}
