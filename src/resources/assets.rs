use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::http::{add_options, encode_path_segment};
use crate::types::{DeleteResponse, Key, UpsertResponse};

/// Query parameters for listing assets. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Case sensitive, comma separated Planhat names, e.g. `"companyId,name"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "companyId", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "sourceId", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssetService<'a> {
    client: &'a Client,
}

impl<'a> AssetService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_url(&self) -> String {
        format!("{}/assets", self.client.base_url())
    }

    fn item_url(&self, key: &Key) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            encode_path_segment(&key.path_segment())
        )
    }

    pub async fn create(&self, asset: &Asset) -> Result<Asset> {
        let url = self.collection_url();
        Ok(self
            .client
            .send_json(Method::POST, &url, asset)
            .await?
            .unwrap_or_default())
    }

    /// Updates by `_id`, or by `Key::ExternalId` / `Key::SourceId`.
    pub async fn update(&self, key: impl Into<Key>, asset: &Asset) -> Result<Asset> {
        let url = self.item_url(&key.into());
        Ok(self
            .client
            .send_json(Method::PUT, &url, asset)
            .await?
            .unwrap_or_default())
    }

    pub async fn get(&self, key: impl Into<Key>) -> Result<Asset> {
        let url = self.item_url(&key.into());
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    pub async fn get_by_external_id(&self, external_id: &str) -> Result<Asset> {
        self.get(Key::ExternalId(external_id.to_string())).await
    }

    pub async fn get_by_source_id(&self, source_id: &str) -> Result<Asset> {
        self.get(Key::SourceId(source_id.to_string())).await
    }

    pub async fn list(&self, options: Option<&AssetListOptions>) -> Result<Vec<Asset>> {
        let url = add_options(&self.collection_url(), &options)?;
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    /// Deletes by Planhat `_id`.
    pub async fn delete(&self, id: &str) -> Result<DeleteResponse> {
        let url = self.item_url(&Key::from(id));
        Ok(self
            .client
            .send(Method::DELETE, &url)
            .await?
            .unwrap_or_default())
    }

    /// Creates assets (name and companyId required) or updates them when one of
    /// `_id`, `sourceId` or `externalId` matches.
    ///
    /// The API accepts at most [`MAX_BULK_ITEMS`](crate::http::MAX_BULK_ITEMS) per call.
    pub async fn bulk_upsert(&self, assets: &[Asset]) -> Result<UpsertResponse> {
        debug!("bulk upserting {} assets", assets.len());
        let url = self.collection_url();
        Ok(self
            .client
            .send_json(Method::PUT, &url, assets)
            .await?
            .unwrap_or_default())
    }
}
