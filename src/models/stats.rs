use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: u64,
    pub menu_items: u64,
    pub orders: u64,
    pub revenue: f64,
}

/// One row of the per-category sales chart.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategorySales {
    pub category: String,
    pub quantity: i64,
    pub revenue: f64,
}
