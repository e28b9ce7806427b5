use super::view_model::DashboardViewModel;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::ui::badge::{Badge, RiskBadge};
use crate::shared::icons::icon;
use contracts::dashboards::d400_vendor_comparison::{RiskFilter, SortField, TypeFilter};
use contracts::domain::a001_vendor::VendorRecord;
use contracts::enums::RiskLevel;
use contracts::shared::format::{
    format_currency_billions, format_pe_ratio, format_percentage, format_price, format_ratio,
};
use leptos::prelude::*;
use thaw::*;

const TABLE_ID: &str = "d400-vendor-comparison-table";

/// Position keeps rows with the same symbol apart (unmapped records all read
/// "UNKNOWN"); the figures force a re-render when a refresh changes them.
fn row_key(index: usize, v: &VendorRecord) -> String {
    format!("{}:{}:{}:{}", index, v.symbol, v.risk_score, v.market_cap)
}

// ============================================================================
// Filter bar
// ============================================================================

#[component]
fn VendorFilterBar(vm: DashboardViewModel) -> impl IntoView {
    let search = RwSignal::new(vm.filters.get_untracked().search);
    Effect::new(move |_| {
        let text = search.get();
        if vm.filters.with_untracked(|f| f.search != text) {
            vm.set_search(text);
        }
    });

    let active_count = move || vm.filters.with(|f| f.active_count());
    let total = move || vm.vendors.with(|v| v.len());
    let shown = move || vm.visible_vendors.with(|v| v.len());

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left">
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_count();
                        if count > 0 {
                            view! { <Badge variant="primary" class="filter-panel__badge">{count}</Badge> }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                <div class="filter-panel-header__center">
                    <span class="filter-panel__summary">
                        {move || format!("Showing {} of {} vendors", shown(), total())}
                    </span>
                </div>
            </div>

            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Search:"</Label>
                            <Input value=search placeholder="Name, symbol or industry..." />
                        </Flex>
                    </div>

                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Type:"</Label>
                        <select
                            class="filter-select"
                            prop:value=move || vm.filters.with(|f| f.type_filter.code())
                            on:change=move |ev| {
                                if let Some(filter) = TypeFilter::from_code(&event_target_value(&ev)) {
                                    vm.set_type_filter(filter);
                                }
                            }
                        >
                            {TypeFilter::all()
                                .into_iter()
                                .map(|t| view! { <option value=t.code()>{t.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </Flex>

                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Risk:"</Label>
                        <select
                            class="filter-select"
                            prop:value=move || vm.filters.with(|f| f.risk_filter.code())
                            on:change=move |ev| {
                                if let Some(filter) = RiskFilter::from_code(&event_target_value(&ev)) {
                                    vm.set_risk_filter(filter);
                                }
                            }
                        >
                            <option value="all">"All Risk Levels"</option>
                            {RiskLevel::all()
                                .into_iter()
                                .map(|l| view! { <option value=l.code()>{l.display_name()}</option> })
                                .collect_view()}
                        </select>
                    </Flex>

                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            search.set(String::new());
                            vm.reset_filters();
                        }
                        disabled=Signal::derive(move || active_count() == 0)
                    >
                        "Reset"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

// ============================================================================
// Table
// ============================================================================

#[component]
pub fn VendorTable(vm: DashboardViewModel) -> impl IntoView {
    let sort = Signal::derive(move || vm.sort.get());
    let on_sort = Callback::new(move |field: SortField| vm.toggle_sort(field));

    view! {
        <section class="dashboard-section">
            <h2 class="dashboard-section__title">"Vendor Comparison"</h2>
            <VendorFilterBar vm=vm />

            <div class="table-wrapper">
                <Table attr:id=TABLE_ID attr:style="width: 100%; min-width: 1100px;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Company" field=SortField::Name sort=sort on_sort=on_sort min_width=200.0 />
                            <SortableHeaderCell label="Industry" field=SortField::Industry sort=sort on_sort=on_sort />
                            <SortableHeaderCell label="Market Cap" field=SortField::MarketCap sort=sort on_sort=on_sort align="right" />
                            <SortableHeaderCell label="Revenue" field=SortField::Revenue sort=sort on_sort=on_sort align="right" />
                            <SortableHeaderCell label="Margin" field=SortField::ProfitMargin sort=sort on_sort=on_sort align="right" />
                            <SortableHeaderCell label="P/E" field=SortField::PeRatio sort=sort on_sort=on_sort align="right" min_width=70.0 />
                            <SortableHeaderCell label="Price" field=SortField::CurrentPrice sort=sort on_sort=on_sort align="right" min_width=140.0 />
                            <SortableHeaderCell label="D/E" field=SortField::DebtToEquity sort=sort on_sort=on_sort align="right" min_width=70.0 />
                            <SortableHeaderCell label="Beta" field=SortField::Beta sort=sort on_sort=on_sort align="right" min_width=70.0 />
                            <SortableHeaderCell label="ROE" field=SortField::Roe sort=sort on_sort=on_sort align="right" min_width=70.0 />
                            <SortableHeaderCell label="Risk" field=SortField::RiskScore sort=sort on_sort=on_sort min_width=130.0 />
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <For
                            each=move || vm.visible_vendors.get().into_iter().enumerate()
                            key=|(i, v)| row_key(*i, v)
                            children=move |(_, v)| {
                                let symbol = v.symbol.clone();
                                let level = v.risk_level;
                                let score = v.risk_score;
                                let range_width = v
                                    .price_range_position
                                    .map(|p| format!("width: {:.0}%;", p));
                                let margin_class = if v.profit_margin < 0.0 {
                                    "table__number table__number--negative"
                                } else {
                                    "table__number"
                                };

                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        vm.open_vendor(symbol.clone());
                                                    }
                                                >
                                                    <strong>{v.name.clone()}</strong>
                                                    <span class="table__muted">{format!(" {}", v.symbol)}</span>
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{v.industry.display_name()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_currency_billions(v.market_cap)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_currency_billions(v.revenue)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <span class=margin_class>{format_percentage(v.profit_margin)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_pe_ratio(v.pe_ratio)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <div class="price-cell">
                                                <span class="table__number">{format_price(v.current_price)}</span>
                                                {range_width.map(|style| view! {
                                                    <div class="price-range" title="Position in 52-week range">
                                                        <div class="price-range__fill" style=style></div>
                                                    </div>
                                                })}
                                            </div>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_ratio(v.debt_to_equity)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format!("{:.2}", v.beta)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <span class="table__number">{format_percentage(v.roe)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <RiskBadge level=level score=score />
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                {move || vm.visible_vendors.with(|v| v.is_empty()).then(|| view! {
                    <div class="table__empty">"No vendors match the current filters."</div>
                })}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_vendor::normalize_all;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_unmapped_rows_get_distinct_keys() {
        let rows = normalize_all(&[json!(null), json!(42), json!({"symbol": "TEL"})]);
        let keys: HashSet<String> =
            rows.iter().enumerate().map(|(i, v)| row_key(i, v)).collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[test]
    fn test_key_changes_with_refreshed_figures() {
        let before = normalize_all(&[json!({"symbol": "TEL", "riskScore": 70})]);
        let after = normalize_all(&[json!({"symbol": "TEL", "riskScore": 40})]);
        assert_ne!(row_key(0, &before[0]), row_key(0, &after[0]));
    }
}
