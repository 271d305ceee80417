use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::licenses::License;
use crate::client::Client;
use crate::error::Result;
use crate::http::{add_options, encode_path_segment};
use crate::types::{DeleteResponse, Key, Owner, UpsertResponse};

/// Query parameters for listing companies. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Property to sort by; prefix with `-` to reverse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Comma separated Planhat property names, e.g. `"name,externalId"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
}

/// Filters for the lean company list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeanCompanyListOptions {
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "sourceId", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeanCompany {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "sourceId")]
    pub source_id: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Company {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "sourceId", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(rename = "coOwner", skip_serializing_if = "Option::is_none")]
    pub co_owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(rename = "phaseSince", skip_serializing_if = "Option::is_none")]
    pub phase_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "csmScore", skip_serializing_if = "Option::is_none")]
    pub csm_score: Option<i64>,
    /// Health score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(rename = "customerFrom", skip_serializing_if = "Option::is_none")]
    pub customer_from: Option<DateTime<Utc>>,
    #[serde(rename = "customerTo", skip_serializing_if = "Option::is_none")]
    pub customer_to: Option<DateTime<Utc>>,
    #[serde(rename = "lastRenewal", skip_serializing_if = "Option::is_none")]
    pub last_renewal: Option<DateTime<Utc>>,
    #[serde(rename = "renewalDate", skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<DateTime<Utc>>,
    #[serde(rename = "renewalDaysFromNow", skip_serializing_if = "Option::is_none")]
    pub renewal_days_from_now: Option<i64>,
    #[serde(rename = "lastTouch", skip_serializing_if = "Option::is_none")]
    pub last_touch: Option<serde_json::Value>,
    #[serde(rename = "lastTouchType", skip_serializing_if = "Option::is_none")]
    pub last_touch_type: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<License>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrr: Option<f64>,
    #[serde(rename = "mrrTotal", skip_serializing_if = "Option::is_none")]
    pub mrr_total: Option<f64>,
    #[serde(rename = "mrTotal", skip_serializing_if = "Option::is_none")]
    pub mr_total: Option<f64>,
    #[serde(rename = "nrr30", skip_serializing_if = "Option::is_none")]
    pub nrr_30: Option<i64>,
    #[serde(rename = "nrrTotal", skip_serializing_if = "Option::is_none")]
    pub nrr_total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Company endpoints, borrowed from a [`Client`] via [`Client::companies`].
#[derive(Debug, Clone, Copy)]
pub struct CompanyService<'a> {
    client: &'a Client,
}

impl<'a> CompanyService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_url(&self) -> String {
        format!("{}/companies", self.client.base_url())
    }

    pub(crate) fn item_url(&self, key: &Key) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            encode_path_segment(&key.path_segment())
        )
    }

    pub async fn list(&self, options: Option<&CompanyListOptions>) -> Result<Vec<Company>> {
        let url = add_options(&self.collection_url(), &options)?;
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    /// Lightweight id/name listing of every company, for matching against your own ids.
    pub async fn lean_list(
        &self,
        options: Option<&LeanCompanyListOptions>,
    ) -> Result<Vec<LeanCompany>> {
        let base = format!("{}/leancompanies", self.client.base_url());
        let url = add_options(&base, &options)?;
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    pub async fn get(&self, key: impl Into<Key>) -> Result<Company> {
        let url = self.item_url(&key.into());
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    pub async fn get_by_external_id(&self, external_id: &str) -> Result<Company> {
        self.get(Key::ExternalId(external_id.to_string())).await
    }

    pub async fn get_by_source_id(&self, source_id: &str) -> Result<Company> {
        self.get(Key::SourceId(source_id.to_string())).await
    }

    pub async fn create(&self, company: &Company) -> Result<Company> {
        let url = self.collection_url();
        Ok(self
            .client
            .send_json(Method::POST, &url, company)
            .await?
            .unwrap_or_default())
    }

    /// Updates by `_id`, or by an alternate key.
    pub async fn update(&self, key: impl Into<Key>, company: &Company) -> Result<Company> {
        let url = self.item_url(&key.into());
        Ok(self
            .client
            .send_json(Method::PUT, &url, company)
            .await?
            .unwrap_or_default())
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResponse> {
        let url = self.item_url(&Key::from(id));
        Ok(self
            .client
            .send(Method::DELETE, &url)
            .await?
            .unwrap_or_default())
    }

    /// Creates or updates companies matched on `_id`, `sourceId` or `externalId`.
    ///
    /// The API accepts at most [`MAX_BULK_ITEMS`](crate::http::MAX_BULK_ITEMS) per call.
    pub async fn bulk_upsert(&self, companies: &[Company]) -> Result<UpsertResponse> {
        debug!("bulk upserting {} companies", companies.len());
        let url = self.collection_url();
        Ok(self
            .client
            .send_json(Method::PUT, &url, companies)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client() -> Client {
        Client::new(Config::new("k", "eu3")).unwrap()
    }

    #[test]
    fn item_urls() {
        let c = client();
        let svc = c.companies();
        assert_eq!(
            svc.item_url(&Key::ExternalId("abc".into())),
            "https://api-eu3.planhat.com/companies/extid-abc"
        );
        assert_eq!(
            svc.item_url(&Key::SourceId("xyz".into())),
            "https://api-eu3.planhat.com/companies/srcid-xyz"
        );
        assert_eq!(
            svc.item_url(&Key::from("a/b")),
            "https://api-eu3.planhat.com/companies/a%2Fb"
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let co = Company {
            name: Some("Acme".into()),
            csm_score: Some(0),
            ..Default::default()
        };
        let v = serde_json::to_value(&co).unwrap();
        assert_eq!(v, serde_json::json!({"name": "Acme", "csmScore": 0}));
    }

    #[test]
    fn decodes_list_shape() {
        let raw = r#"{
            "_id": "c1",
            "name": "Acme",
            "owner": {"_id": "u1", "nickName": "Ana"},
            "coOwner": "u2",
            "phase": "onboarding",
            "customerFrom": "2021-03-01T00:00:00.000Z",
            "mrr": 1200.5,
            "custom": {"tier": "gold"}
        }"#;
        let co: Company = serde_json::from_str(raw).unwrap();
        assert_eq!(co.id.as_deref(), Some("c1"));
        assert_eq!(co.owner.as_ref().and_then(Owner::id), Some("u1"));
        assert_eq!(co.co_owner, Some(Owner::Id("u2".into())));
        assert!(co.customer_from.is_some());
        assert_eq!(co.mrr, Some(1200.5));
        assert_eq!(co.custom.unwrap()["tier"], "gold");
    }
}
