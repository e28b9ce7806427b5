//! Sortable table header cell bound to a [`SortField`]
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Market Cap"
//!     field=SortField::MarketCap
//!     sort=vm.sort
//!     on_sort=Callback::new(move |field| vm.toggle_sort(field))
//!     align="right"
//! />
//! ```

use contracts::dashboards::d400_vendor_comparison::{SortField, SortState};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    field: SortField,

    /// Current sort state
    #[prop(into)]
    sort: Signal<SortState>,

    on_sort: Callback<SortField>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// "left" or "right"
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    let indicator_class = move || {
        if sort.get().field == field {
            "table__sort-indicator table__sort-indicator--active"
        } else {
            "table__sort-indicator"
        }
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                data-sort-field=field.code()
                on:click=move |_| on_sort.run(field)
            >
                {label}
                <span class=indicator_class>
                    {move || sort.get().indicator(field)}
                </span>
            </div>
        </TableHeaderCell>
    }
}
