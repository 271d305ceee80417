use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a bulk upsert.
///
/// The error and key entries are undocumented upstream and kept as raw JSON.
/// Per-item failures land here rather than failing the call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpsertResponse {
    pub created: i64,
    #[serde(rename = "createdErrors")]
    pub created_errors: Vec<serde_json::Value>,
    #[serde(rename = "insertsKeys")]
    pub inserts_keys: Vec<serde_json::Value>,
    pub updated: i64,
    #[serde(rename = "updatedErrors")]
    pub updated_errors: Vec<serde_json::Value>,
    #[serde(rename = "updatesKeys")]
    pub updates_keys: Vec<serde_json::Value>,
    #[serde(rename = "nonupdates")]
    pub non_updates: i64,
    pub modified: Vec<String>,
    #[serde(rename = "upsertedIds")]
    pub upserted_ids: Vec<String>,
    #[serde(rename = "permissionErrors")]
    pub permission_errors: Vec<serde_json::Value>,
}

/// Result of a metrics bulk upsert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpsertMetricsResponse {
    pub processed: i64,
    pub errors: Vec<serde_json::Value>,
}

/// Result of a delete: `n` records affected, `ok` is 1 on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeleteResponse {
    pub n: i64,
    pub ok: i64,
    #[serde(rename = "deletedCount", skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<i64>,
}

impl DeleteResponse {
    pub fn is_ok(&self) -> bool {
        self.ok == 1
    }
}

/// How a single record is addressed in a URL path.
///
/// Planhat accepts its own `_id`, or an alternate key prefixed with
/// `extid-` or `srcid-` in the same path position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Id(String),
    ExternalId(String),
    SourceId(String),
}

impl Key {
    pub fn path_segment(&self) -> String {
        match self {
            Key::Id(id) => id.clone(),
            Key::ExternalId(id) => format!("extid-{}", id),
            Key::SourceId(id) => format!("srcid-{}", id),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_segment())
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Key::Id(id.to_string())
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key::Id(id)
    }
}

/// Reference to a Planhat user as it appears on other records.
///
/// Single-record endpoints return a bare id string; list endpoints return an
/// object with the id and nickname.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Owner {
    Id(String),
    User {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "nickName", default, skip_serializing_if = "Option::is_none")]
        nick_name: Option<String>,
    },
    Other(serde_json::Value),
}

impl Owner {
    pub fn id(&self) -> Option<&str> {
        match self {
            Owner::Id(id) | Owner::User { id, .. } => Some(id.as_str()),
            Owner::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternate_keys() {
        assert_eq!(Key::ExternalId("abc".into()).path_segment(), "extid-abc");
        assert_eq!(Key::SourceId("xyz".into()).path_segment(), "srcid-xyz");
        assert_eq!(Key::from("5f1d").path_segment(), "5f1d");
    }

    #[test]
    fn owner_shapes() {
        let bare: Owner = serde_json::from_str(r#""58e3""#).unwrap();
        assert_eq!(bare, Owner::Id("58e3".into()));

        let rich: Owner = serde_json::from_str(r#"{"_id":"58e3","nickName":"Ana"}"#).unwrap();
        assert_eq!(
            rich,
            Owner::User {
                id: "58e3".into(),
                nick_name: Some("Ana".into())
            }
        );
        assert_eq!(rich.id(), Some("58e3"));

        let odd: Owner = serde_json::from_str("42").unwrap();
        assert!(matches!(odd, Owner::Other(_)));
        assert_eq!(odd.id(), None);
    }

    #[test]
    fn upsert_response_tolerates_missing_fields() {
        let r: UpsertResponse =
            serde_json::from_str(r#"{"created":2,"updated":1,"nonupdates":0,"upsertedIds":["a","b"]}"#)
                .unwrap();
        assert_eq!(r.created, 2);
        assert_eq!(r.updated, 1);
        assert_eq!(r.upserted_ids, vec!["a", "b"]);
        assert!(r.created_errors.is_empty());
    }

    #[test]
    fn delete_response_flag() {
        let r: DeleteResponse = serde_json::from_str(r#"{"n":1,"ok":1,"deletedCount":1}"#).unwrap();
        assert!(r.is_ok());
        assert_eq!(r.deleted_count, Some(1));
    }
}
