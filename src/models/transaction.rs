use chrono::{Local, Utc};
use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement. Magnitude lives in `Transaction::quantity`
/// and is always non-negative; direction is carried here, never by sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
        }
    }
}

/// One immutable entry of the audit ledger.
///
/// `item_name` and `price_at_time` are frozen at creation: the ledger records
/// history, not current truth, so a later rename or deletion of the item does
/// not cascade here. `item_id` may therefore dangle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub quantity: i64,
    pub price_at_time: Decimal,
    pub date: String,
    pub operator: String,
}

impl Transaction {
    /// Ledger ids sort by creation: unix millis plus a random four-character
    /// disambiguator for entries created in the same millisecond.
    pub fn generate_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(4)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();
        format!("TX-{}-{}", Utc::now().timestamp_millis(), suffix)
    }

    /// Human-readable local timestamp, 24-hour clock.
    pub fn now_display() -> String {
        Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
    }
}

/// Operation labels as they appear in the ledger. The transaction bucket
/// matcher in `queries` keys off these strings, so they are centralized here.
pub mod labels {
    pub const QUICK_ADJUST: &str = "庫存快調";
    pub const DATA_UPDATE: &str = "資料更新";
    pub const INITIAL_STOCK_IN: &str = "初始入庫";
    pub const STOCK_EDIT: &str = "庫存調整";
    pub const COUNT_FIX: &str = "盤點修正";
    pub const RETURN_IN: &str = "返修入庫";
    pub const QTY_ADJUST: &str = "數量調整";
    pub const BATCH_APPEND: &str = "批量追加錄入";
    pub const BATCH_NEW_ITEM: &str = "批量全新品項錄入";
    pub const BATCH_DELETE: &str = "批次刪除";
    pub const DEFAULT_OPERATOR: &str = "系統";

    pub fn withdraw(machine: Option<&str>) -> String {
        format!("領料出庫{}", machine_tag(machine))
    }

    pub fn maintenance_out(machine: Option<&str>) -> String {
        format!("維修撥出{}", machine_tag(machine))
    }

    pub fn transfer_out(source: &str, target: &str) -> String {
        format!("移倉撥出 ({} -> {})", source, target)
    }

    pub fn transfer_receipt(source: &str) -> String {
        format!("移倉接收 (源自 {})", source)
    }

    pub fn batch_update(fields: &[&str]) -> String {
        format!("批次更新: {}", fields.join(", "))
    }

    pub fn warehouse_relocation(target: &str) -> String {
        format!("倉區刪除：自動移撥至 {}", target)
    }

    pub fn bom_deduction(template_name: &str) -> String {
        format!("領料出庫 [模板: {}]", template_name)
    }

    fn machine_tag(machine: Option<&str>) -> String {
        match machine {
            Some(m) if !m.trim().is_empty() => format!(" [機台: {}]", m.trim()),
            _ => String::new(),
        }
    }
}
