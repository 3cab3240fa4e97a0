//! PostgREST-backed implementation of [`RecipeStore`].
//!
//! Speaks the Supabase/PostgREST REST dialect: `/rest/v1/<table>` routes,
//! `column=eq.value` filters, `Prefer: return=representation` for writes
//! that need generated ids, and `Prefer: count=exact` for counts.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::StoreConfig;
use crate::error::{ExtractError, PersistStage};
use crate::model::{Chef, NewIngredientRow, NewRecipeRow, NewStepRow, RecipeRow};
use crate::store::RecipeStore;

pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Create a new store client from configuration
    pub fn new(config: &StoreConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        PostgrestStore {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        PostgrestStore {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.headers(self.auth_headers())
    }

    /// Batch-insert into `table`, tagged with the failing stage on error.
    async fn batch_insert<T: serde::Serialize>(
        &self,
        table: &str,
        rows: &[T],
        stage: PersistStage,
    ) -> Result<(), ExtractError> {
        if rows.is_empty() {
            return Ok(());
        }

        let response = self
            .request(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(|e| ExtractError::persistence(stage, e.to_string()))?;

        check_write_status(response, stage).await?;
        Ok(())
    }
}

async fn check_write_status(
    response: Response,
    stage: PersistStage,
) -> Result<Response, ExtractError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ExtractError::persistence(
        stage,
        format!("store returned status {status}: {body}"),
    ))
}

#[async_trait]
impl RecipeStore for PostgrestStore {
    async fn insert_recipe(&self, row: &NewRecipeRow) -> Result<String, ExtractError> {
        let response = self
            .request(self.client.post(self.table_url("recipes")))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| ExtractError::persistence(PersistStage::Recipe, e.to_string()))?;

        let response = check_write_status(response, PersistStage::Recipe).await?;
        let created: Vec<RecipeRow> = response
            .json()
            .await
            .map_err(|e| ExtractError::persistence(PersistStage::Recipe, e.to_string()))?;

        let id = created
            .first()
            .map(|r| r.id.clone())
            .ok_or_else(|| {
                ExtractError::persistence(
                    PersistStage::Recipe,
                    "insert returned no representation".to_string(),
                )
            })?;
        debug!("Created recipe row {id}");
        Ok(id)
    }

    async fn insert_ingredients(&self, rows: &[NewIngredientRow]) -> Result<(), ExtractError> {
        self.batch_insert("ingredients", rows, PersistStage::Ingredients)
            .await
    }

    async fn insert_steps(&self, rows: &[NewStepRow]) -> Result<(), ExtractError> {
        self.batch_insert("steps", rows, PersistStage::Steps).await
    }

    async fn delete_recipe(&self, recipe_id: &str) -> Result<(), ExtractError> {
        let url = format!("{}?id=eq.{}", self.table_url("recipes"), recipe_id);
        let response = self
            .request(self.client.delete(url))
            .send()
            .await
            .map_err(|e| ExtractError::persistence(PersistStage::Recipe, e.to_string()))?;

        check_write_status(response, PersistStage::Recipe).await?;
        Ok(())
    }

    async fn chef_exists(&self, chef_id: &str) -> Result<bool, ExtractError> {
        let url = format!("{}?id=eq.{}&select=id", self.table_url("chefs"), chef_id);
        let response = self
            .request(self.client.get(url))
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await
            .map_err(|e| ExtractError::Store(e.to_string()))?;

        let status = response.status();
        // PostgREST answers 206 for ranged reads
        if !status.is_success() && status != StatusCode::PARTIAL_CONTENT {
            return Err(ExtractError::Store(format!(
                "count request returned status {status}"
            )));
        }

        // content-range is "0-0/<total>" (or "*/<total>" when empty)
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|count| count.parse::<u64>().ok())
            .ok_or_else(|| ExtractError::Store("missing count in content-range".to_string()))?;

        Ok(total > 0)
    }

    async fn list_chefs(&self, limit: u32) -> Result<Vec<Chef>, ExtractError> {
        let url = format!("{}?select=*&limit={}", self.table_url("chefs"), limit);
        let response = self
            .request(self.client.get(url))
            .send()
            .await
            .map_err(|e| ExtractError::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractError::Store(format!(
                "chef list returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ExtractError::Store(e.to_string()))
    }

    async fn recipes_for_chef(&self, chef_id: &str) -> Result<Vec<RecipeRow>, ExtractError> {
        let url = format!(
            "{}?chef_id=eq.{}&select=*&order=created_at.desc",
            self.table_url("recipes"),
            chef_id
        );
        let response = self
            .request(self.client.get(url))
            .send()
            .await
            .map_err(|e| ExtractError::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractError::Store(format!(
                "recipe list returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ExtractError::Store(e.to_string()))
    }
}
