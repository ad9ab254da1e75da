//! Template-driven deduction: availability checks and all-or-nothing
//! execution.

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;

use zenith_wms::config::AppConfig;
use zenith_wms::errors::ServiceError;
use zenith_wms::models::{BomLine, BomTemplate, TransactionType};
use zenith_wms::services::InsightModel;
use zenith_wms::{seed, AppState};

struct StubModel;

#[async_trait]
impl InsightModel for StubModel {
    async fn generate(&self, _system: &str, _query: &str) -> Result<String, ServiceError> {
        Ok("ok".into())
    }
}

async fn app() -> AppState {
    let store = seed::demo_store().await;
    let (state, mut rx) = AppState::with_model(AppConfig::default(), store, Arc::new(StubModel));
    tokio::spawn(async move { while rx.recv().await.is_some() {} });
    state
}

fn maintenance_kit() -> BomTemplate {
    BomTemplate {
        id: "bom-1".into(),
        name: "標準保養組件".into(),
        description: "包含常用的線材與固定扣件".into(),
        items: vec![
            BomLine {
                sku: "ACC-USBC-02".into(),
                quantity_per_kit: 2,
            },
            BomLine {
                sku: "MBP-14-2023".into(),
                quantity_per_kit: 1,
            },
        ],
    }
}

#[tokio::test]
async fn availability_reports_unknown_skus_as_empty() {
    let app = app().await;
    let template = BomTemplate {
        items: vec![BomLine {
            sku: "NO-SUCH-SKU".into(),
            quantity_per_kit: 1,
        }],
        ..maintenance_kit()
    };
    let lines = app.deduction.check_availability(&template, 1).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].current, 0);
    assert!(!lines[0].is_enough);
    assert_eq!(lines[0].name, "未知品項");
}

#[tokio::test]
async fn deduction_withdraws_each_line_with_the_template_label() {
    let app = app().await;
    app.deduction
        .deduct(&maintenance_kit(), 3, "王小明")
        .await
        .unwrap();

    let items = app.store.items().await;
    assert_eq!(items.iter().find(|i| i.id == "3").unwrap().quantity, 194);
    assert_eq!(items.iter().find(|i| i.id == "1").unwrap().quantity, 42);

    let log = app.store.transactions().await;
    let deductions: Vec<_> = log
        .iter()
        .filter(|t| t.label.as_deref() == Some("領料出庫 [模板: 標準保養組件]"))
        .collect();
    assert_eq!(deductions.len(), 2);
    for tx in &deductions {
        assert_eq!(tx.kind, TransactionType::Out);
        assert_eq!(tx.operator, "王小明");
    }
}

#[tokio::test]
async fn shortage_rejects_before_any_mutation() {
    let app = app().await;
    let items_before = app.store.items().await;
    let log_before = app.store.transactions().await;

    // 46 kits need 46 MacBooks; only 45 on hand.
    let result = app.deduction.deduct(&maintenance_kit(), 46, "王小明").await;
    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));
    assert_eq!(app.store.items().await, items_before);
    assert_eq!(app.store.transactions().await, log_before);
}

#[tokio::test]
async fn zero_multiplier_is_rejected() {
    let app = app().await;
    assert_matches!(
        app.deduction.deduct(&maintenance_kit(), 0, "王小明").await,
        Err(ServiceError::ValidationError(_))
    );
}
