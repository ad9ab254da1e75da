//! Zenith warehouse inventory core.
//!
//! An in-memory, single-session inventory engine: stock items across
//! warehouses, an append-only capped audit ledger, batch operations, and a
//! read-only snapshot interface for an external AI assistant. All mutations
//! run synchronously to completion and install whole collections atomically.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod events;
pub mod export;
pub mod models;
pub mod queries;
pub mod recorder;
pub mod seed;
pub mod services;
pub mod store;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::recorder::TransactionRecorder;
use crate::services::{
    AssistantService, CategoryService, DeductionService, GeminiClient, InsightModel,
    InventoryService, StaffService, WarehouseService,
};
use crate::store::EntityStore;

/// Wires the store, recorder and services together for one session.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<EntityStore>,
    pub events: EventSender,
    pub inventory: InventoryService,
    pub warehouses: WarehouseService,
    pub categories: CategoryService,
    pub staff: StaffService,
    pub deduction: DeductionService,
    pub assistant: AssistantService,
}

impl AppState {
    /// Builds the application over an existing store with the default
    /// Gemini-backed assistant client.
    pub fn new(
        config: AppConfig,
        store: Arc<EntityStore>,
    ) -> Result<(Self, mpsc::Receiver<Event>), ServiceError> {
        let model: Arc<dyn InsightModel> = Arc::new(GeminiClient::new(config.assistant.clone())?);
        Ok(Self::with_model(config, store, model))
    }

    /// Same wiring with an injected assistant model, for tests and demos.
    pub fn with_model(
        config: AppConfig,
        store: Arc<EntityStore>,
        model: Arc<dyn InsightModel>,
    ) -> (Self, mpsc::Receiver<Event>) {
        let (events, event_rx) = events::channel(config.event_channel_capacity);
        let recorder = TransactionRecorder::new(store.clone(), config.transaction_log_cap);
        let state = Self {
            inventory: InventoryService::new(store.clone(), recorder.clone(), events.clone()),
            warehouses: WarehouseService::new(store.clone(), recorder.clone(), events.clone()),
            categories: CategoryService::new(store.clone(), events.clone()),
            staff: StaffService::new(store.clone(), events.clone()),
            deduction: DeductionService::new(store.clone(), recorder, events.clone()),
            assistant: AssistantService::new(store.clone(), model),
            config,
            store,
            events,
        };
        (state, event_rx)
    }
}
