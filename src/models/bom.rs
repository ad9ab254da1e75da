use serde::{Deserialize, Serialize};

/// One component of a deduction template, matched against stock by SKU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub sku: String,
    pub quantity_per_kit: i64,
}

/// A bill-of-materials template for one-click withdrawal of a kit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub items: Vec<BomLine>,
}
