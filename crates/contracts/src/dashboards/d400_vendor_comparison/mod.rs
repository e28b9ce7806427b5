pub mod analytics;
pub mod recommendations;
pub mod table_view;

pub use analytics::{PortfolioKpis, RiskAnalysis};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use table_view::{
    filter_and_sort, RiskFilter, SortField, SortOrder, SortState, TypeFilter, VendorFilters,
};
