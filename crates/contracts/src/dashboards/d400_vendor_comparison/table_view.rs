use crate::domain::a001_vendor::VendorRecord;
use crate::enums::{Industry, RiskLevel};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Filters
// ============================================================================

/// Vendor type filter; Materials and Plastics share one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Sensors,
    Materials,
}

impl TypeFilter {
    pub fn code(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Sensors => "sensors",
            TypeFilter::Materials => "materials",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TypeFilter::All => "All Types",
            TypeFilter::Sensors => "Sensors",
            TypeFilter::Materials => "Materials & Plastics",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "all" => Some(TypeFilter::All),
            "sensors" => Some(TypeFilter::Sensors),
            "materials" => Some(TypeFilter::Materials),
            _ => None,
        }
    }

    pub fn all() -> Vec<TypeFilter> {
        vec![TypeFilter::All, TypeFilter::Sensors, TypeFilter::Materials]
    }

    pub fn matches(&self, industry: Industry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Sensors => industry == Industry::Sensors,
            TypeFilter::Materials => industry.is_materials_like(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    pub fn code(&self) -> &'static str {
        match self {
            RiskFilter::All => "all",
            RiskFilter::Level(level) => level.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        if code == "all" {
            Some(RiskFilter::All)
        } else {
            RiskLevel::from_code(code).map(RiskFilter::Level)
        }
    }

    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Level(expected) => *expected == level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VendorFilters {
    pub search: String,
    pub type_filter: TypeFilter,
    pub risk_filter: RiskFilter,
}

impl VendorFilters {
    /// Number of non-default filters, for the filter panel badge
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search.trim().is_empty() {
            count += 1;
        }
        if self.type_filter != TypeFilter::All {
            count += 1;
        }
        if self.risk_filter != RiskFilter::All {
            count += 1;
        }
        count
    }

    pub fn matches(&self, vendor: &VendorRecord) -> bool {
        self.type_filter.matches(vendor.industry)
            && self.risk_filter.matches(vendor.risk_level)
            && matches_search(vendor, &self.search)
    }
}

/// Case-insensitive substring match on name, symbol and industry
pub fn matches_search(vendor: &VendorRecord, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    vendor.name.to_lowercase().contains(&needle)
        || vendor.symbol.to_lowercase().contains(&needle)
        || vendor
            .industry
            .display_name()
            .to_lowercase()
            .contains(&needle)
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Symbol,
    Industry,
    MarketCap,
    Revenue,
    ProfitMargin,
    PeRatio,
    Beta,
    Roe,
    DebtToEquity,
    CurrentPrice,
    RiskLevel,
    RiskScore,
}

impl SortField {
    pub fn code(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Symbol => "symbol",
            SortField::Industry => "industry",
            SortField::MarketCap => "marketCap",
            SortField::Revenue => "revenue",
            SortField::ProfitMargin => "profitMargin",
            SortField::PeRatio => "peRatio",
            SortField::Beta => "beta",
            SortField::Roe => "roe",
            SortField::DebtToEquity => "debtToEquity",
            SortField::CurrentPrice => "currentPrice",
            SortField::RiskLevel => "riskLevel",
            SortField::RiskScore => "riskScore",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.code() == code)
    }

    pub fn all() -> Vec<SortField> {
        vec![
            SortField::Name,
            SortField::Symbol,
            SortField::Industry,
            SortField::MarketCap,
            SortField::Revenue,
            SortField::ProfitMargin,
            SortField::PeRatio,
            SortField::Beta,
            SortField::Roe,
            SortField::DebtToEquity,
            SortField::CurrentPrice,
            SortField::RiskLevel,
            SortField::RiskScore,
        ]
    }

    /// Numeric key; missing optional ratios count as 0
    fn numeric_key(&self, v: &VendorRecord) -> Option<f64> {
        match self {
            SortField::MarketCap => Some(v.market_cap),
            SortField::Revenue => Some(v.revenue),
            SortField::ProfitMargin => Some(v.profit_margin),
            SortField::PeRatio => Some(v.pe_ratio.unwrap_or(0.0)),
            SortField::Beta => Some(v.beta),
            SortField::Roe => Some(v.roe),
            SortField::DebtToEquity => Some(v.debt_to_equity.unwrap_or(0.0)),
            SortField::CurrentPrice => Some(v.current_price),
            SortField::RiskScore => Some(f64::from(v.risk_score)),
            SortField::Name | SortField::Symbol | SortField::Industry | SortField::RiskLevel => {
                None
            }
        }
    }

    fn text_key<'a>(&self, v: &'a VendorRecord) -> &'a str {
        match self {
            SortField::Name => &v.name,
            SortField::Symbol => &v.symbol,
            SortField::Industry => v.industry.display_name(),
            SortField::RiskLevel => v.risk_level.code(),
            _ => "",
        }
    }

    pub fn compare(&self, a: &VendorRecord, b: &VendorRecord) -> Ordering {
        match (self.numeric_key(a), self.numeric_key(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => locale_compare(self.text_key(a), self.text_key(b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn flipped(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn is_ascending(&self) -> bool {
        *self == SortOrder::Ascending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::MarketCap,
            order: SortOrder::Descending,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Same field flips the order; a new field starts descending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                order: self.order.flipped(),
            }
        } else {
            Self {
                field,
                order: SortOrder::Descending,
            }
        }
    }

    pub fn indicator(&self, field: SortField) -> &'static str {
        if self.field != field {
            " ⇅"
        } else if self.order.is_ascending() {
            " ▲"
        } else {
            " ▼"
        }
    }
}

/// Case-insensitive collation with a case-sensitive tie-break
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

// ============================================================================
// View-model
// ============================================================================

/// Filter then sort. Pure; ties keep the order of the input list.
pub fn filter_and_sort(
    vendors: &[VendorRecord],
    filters: &VendorFilters,
    sort: SortState,
) -> Vec<VendorRecord> {
    let mut rows: Vec<VendorRecord> = vendors
        .iter()
        .filter(|v| filters.matches(v))
        .cloned()
        .collect();

    // sort_by is stable; reversing the comparator keeps tie order intact
    rows.sort_by(|a, b| {
        let cmp = sort.field.compare(a, b);
        match sort.order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
    rows
}
