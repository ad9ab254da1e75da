use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zenith_wms::config::AppConfig;
use zenith_wms::models::{InventoryItemPatch, StockOperation};
use zenith_wms::queries;
use zenith_wms::{export, seed, AppState};

/// Demo session: seeds the store, bootstraps an operator and walks the core
/// mutation paths, logging the resulting ledger and dashboard stats.
#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let store = seed::demo_store().await;
    let (app, mut event_rx) = AppState::new(config, store)?;
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            info!(?event, "event");
        }
    });

    let operator = app.staff.bootstrap("系統管理員").await?;
    info!(name = %operator.name, "operator ready");

    app.inventory.quick_adjust("1", 40, &operator.name).await;
    app.inventory
        .apply_operation(
            "3",
            StockOperation::Withdraw {
                quantity: 20,
                machine: Some("A-07".into()),
            },
            &operator.name,
        )
        .await?;
    app.inventory
        .apply_operation(
            "3",
            StockOperation::Transfer {
                quantity: 30,
                target_warehouse: "P3 倉".into(),
            },
            &operator.name,
        )
        .await?;
    app.inventory
        .batch_update(
            &["1".into(), "2".into()],
            InventoryItemPatch {
                min_threshold: Some(12),
                ..Default::default()
            },
            &operator.name,
        )
        .await;

    let items = app.store.items().await;
    let stats = queries::dashboard_stats(&items);
    info!(
        total_items = stats.total_items,
        total_value = %stats.total_value,
        low_stock = stats.low_stock_count,
        "dashboard"
    );

    for tx in app.store.transactions().await.iter().take(6) {
        info!(
            id = %tx.id,
            kind = tx.kind.as_str(),
            quantity = tx.quantity,
            label = tx.label.as_deref().unwrap_or("-"),
            "ledger"
        );
    }

    println!("{}", export::inventory_csv(&items));
    Ok(())
}
