use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{transaction::labels, BomTemplate, TransactionType};
use crate::recorder::TransactionRecorder;
use crate::store::EntityStore;

/// Availability of one template line at the current multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct AvailabilityLine {
    pub sku: String,
    pub name: String,
    pub needed: i64,
    pub current: i64,
    pub is_enough: bool,
}

/// Template-driven bulk withdrawal: one kit definition, one multiplier, one
/// `OUT` ledger entry per component line.
#[derive(Clone)]
pub struct DeductionService {
    store: Arc<EntityStore>,
    recorder: TransactionRecorder,
    events: EventSender,
}

impl DeductionService {
    pub fn new(store: Arc<EntityStore>, recorder: TransactionRecorder, events: EventSender) -> Self {
        Self {
            store,
            recorder,
            events,
        }
    }

    /// Dry-run check, line by line. Lines whose SKU is not stocked anywhere
    /// report zero on hand rather than failing.
    pub async fn check_availability(
        &self,
        template: &BomTemplate,
        multiplier: u32,
    ) -> Vec<AvailabilityLine> {
        let items = self.store.items().await;
        template
            .items
            .iter()
            .map(|line| {
                let stock = items.iter().find(|i| i.sku == line.sku);
                let needed = line.quantity_per_kit * i64::from(multiplier);
                let current = stock.map(|i| i.quantity).unwrap_or(0);
                AvailabilityLine {
                    sku: line.sku.clone(),
                    name: stock.map(|i| i.name.clone()).unwrap_or_else(|| "未知品項".to_string()),
                    needed,
                    current,
                    is_enough: current >= needed,
                }
            })
            .collect()
    }

    /// Executes the deduction. Rejected before any mutation if a single line
    /// is short, so the operation is all-or-nothing.
    #[instrument(skip(self, template), fields(template_id = %template.id))]
    pub async fn deduct(
        &self,
        template: &BomTemplate,
        multiplier: u32,
        operator: &str,
    ) -> Result<(), ServiceError> {
        if multiplier == 0 {
            return Err(ServiceError::ValidationError(
                "multiplier must be at least 1".into(),
            ));
        }
        let shortage: Vec<AvailabilityLine> = self
            .check_availability(template, multiplier)
            .await
            .into_iter()
            .filter(|line| !line.is_enough)
            .collect();
        if let Some(short) = shortage.first() {
            return Err(ServiceError::InsufficientStock(format!(
                "{}: need {}, have {}",
                short.sku, short.needed, short.current
            )));
        }

        let label = labels::bom_deduction(&template.name);
        let mut next = self.store.items().await;
        let mut ledger: Vec<(String, String, i64)> = Vec::new();
        for line in &template.items {
            let needed = line.quantity_per_kit * i64::from(multiplier);
            if let Some(item) = next.iter_mut().find(|i| i.sku == line.sku) {
                item.quantity = (item.quantity - needed).max(0);
                item.touch();
                ledger.push((item.id.clone(), item.name.clone(), needed));
            }
        }
        self.store.replace_items(next).await;

        for (id, name, quantity) in ledger {
            self.recorder
                .record(
                    &id,
                    &name,
                    TransactionType::Out,
                    quantity,
                    operator,
                    Some(label.clone()),
                )
                .await;
        }
        info!(template = %template.name, multiplier, "bom deduction applied");
        self.events
            .send(Event::BomDeducted {
                template_id: template.id.clone(),
                multiplier,
            })
            .await;
        Ok(())
    }
}
