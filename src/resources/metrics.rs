use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{ErrorKind, Result};
use crate::http::{add_options, encode_path_segment};
use crate::types::UpsertMetricsResponse;

/// Query parameters for listing dimension data.
///
/// `from` and `to` are day numbers: days since 1970-01-01.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsListOptions {
    /// Company id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Dimension id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// A data point pushed to Planhat.
///
/// `dimension_id`, `value` and `external_id` are required by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Letters and digits only, e.g. `activeusershare`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// External id of the model object (a company unless `model` says otherwise).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// `Company` (default), `EndUser`, `Asset` or `Project`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// ISO date of the event; the receive time is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DimensionData {
    #[serde(rename = "_id")]
    pub id: String,
    pub dimension_id: String,
    pub time: Option<DateTime<Utc>>,
    pub value: f64,
    pub model: String,
    pub parent_id: String,
    pub company_id: String,
    pub company_name: String,
}

#[derive(Debug, Clone, Copy)]
pub struct MetricsService<'a> {
    client: &'a Client,
}

impl<'a> MetricsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, options: Option<&MetricsListOptions>) -> Result<Vec<DimensionData>> {
        let base = format!("{}/dimensiondata", self.client.base_url());
        let url = add_options(&base, &options)?;
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    /// Pushes dimension data to the analytics host under the configured tenant.
    ///
    /// Fails with [`ErrorKind::MissingTenantId`] before any I/O when no tenant is set.
    pub async fn bulk_upsert(&self, metrics: &[Metric]) -> Result<UpsertMetricsResponse> {
        let tenant = self
            .client
            .config()
            .tenant()
            .ok_or(ErrorKind::MissingTenantId)?;
        debug!("bulk upserting {} metrics", metrics.len());
        let url = format!(
            "{}/{}",
            self.client.metrics_url(),
            encode_path_segment(tenant)
        );
        Ok(self
            .client
            .send_json(Method::POST, &url, metrics)
            .await?
            .unwrap_or_default())
    }
}
