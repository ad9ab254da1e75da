use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::config::AssistantConfig;
use crate::errors::ServiceError;
use crate::store::EntityStore;

/// Fixed reply used whenever the external model call fails for any reason.
pub const FALLBACK_MESSAGE: &str = "系統忙碌中，請先檢查您的庫存列表，或稍後再詢問我。";

/// Seam over the external text-generation call, mockable in tests.
#[async_trait]
pub trait InsightModel: Send + Sync {
    async fn generate(&self, system_instruction: &str, query: &str)
        -> Result<String, ServiceError>;
}

/// Gemini-style `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl InsightModel for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        query: &str,
    ) -> Result<String, ServiceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            self.config.api_key,
        );
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_instruction }] },
            "contents": [{ "parts": [{ "text": query }] }],
            "generationConfig": { "temperature": 0.7 },
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::ExternalServiceError("empty model response".to_string())
            })
    }
}

/// Adapter between the store and the external assistant. It is handed a
/// read-only snapshot; nothing it returns ever mutates core state, and every
/// failure collapses to [`FALLBACK_MESSAGE`].
#[derive(Clone)]
pub struct AssistantService {
    store: Arc<EntityStore>,
    model: Arc<dyn InsightModel>,
}

impl AssistantService {
    pub fn new(store: Arc<EntityStore>, model: Arc<dyn InsightModel>) -> Self {
        Self { store, model }
    }

    #[instrument(skip(self))]
    pub async fn inventory_insights(&self, query: &str) -> String {
        let items = self.store.items().await;
        let inventory_text: Vec<String> = items
            .iter()
            .map(|item| {
                format!(
                    "{}({}): 現貨 {} 件 / 存放於 {} / 狀態: {}",
                    item.name,
                    item.sku,
                    item.quantity,
                    item.warehouse,
                    if item.is_low_stock() { "⚠️ 缺貨中" } else { "正常" },
                )
            })
            .collect();

        let system_instruction = format!(
            "你是一位親切、專業的「智慧倉管小幫手」。\n\n\
             【當前倉庫情況】:\n{}\n\n\
             【任務】:\n\
             請用最簡單、白話的方式回答使用者的問題。\n\
             如果是要檢查庫存，請直接告訴我「哪幾個東西快沒了」。\n\
             如果是要分析營運，請告訴我「哪個東西賣最快」。\n\
             不要使用工程師術語，請使用倉管人員聽得懂的語言。\n\n\
             語氣：熱情、有幫助、條理分明。使用繁體中文。",
            inventory_text.join("\n"),
        );

        match self.model.generate(&system_instruction, query).await {
            Ok(text) => text,
            Err(e) => {
                warn!("assistant call failed: {}", e);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
