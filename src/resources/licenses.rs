use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A license attached to a company. Read-only here; it arrives embedded in company records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct License {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "externalId")]
    pub external_id: String,
    pub value: f64,
    #[serde(rename = "_currency")]
    pub currency: Currency,
    #[serde(rename = "fromDate")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(rename = "toDate")]
    pub to_date: Option<DateTime<Utc>>,
    pub product: String,
    #[serde(rename = "companyId")]
    pub company_id: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub custom: serde_json::Map<String, serde_json::Value>,
    pub status: String,
    #[serde(rename = "renewalStatus")]
    pub renewal_status: String,
    #[serde(rename = "fixedPeriod")]
    pub fixed_period: bool,
    #[serde(rename = "toDateIncluded")]
    pub to_date_included: bool,
    pub length: f64,
    pub mrr: f64,
    #[serde(rename = "renewalPeriod")]
    pub renewal_period: f64,
    #[serde(rename = "renewalUnit")]
    pub renewal_unit: String,
    #[serde(rename = "renewalDate")]
    pub renewal_date: Option<DateTime<Utc>>,
    #[serde(rename = "renewalDaysFromNow")]
    pub renewal_days_from_now: i64,
    #[serde(rename = "noticePeriod")]
    pub notice_period: f64,
    #[serde(rename = "noticeUnit")]
    pub notice_unit: String,
    #[serde(rename = "isOverdue")]
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Currency {
    #[serde(rename = "_id")]
    pub id: String,
    pub symbol: String,
    pub rate: f64,
    #[serde(rename = "isBase")]
    pub is_base: bool,
    pub overrides: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_license_decodes() {
        let raw = r#"{"_id":"l1","mrr":99.0,"_currency":{"_id":"USD","symbol":"$","rate":1,"isBase":true},"toDate":"2024-01-01T00:00:00Z"}"#;
        let lic: License = serde_json::from_str(raw).unwrap();
        assert_eq!(lic.id, "l1");
        assert_eq!(lic.currency.symbol, "$");
        assert!(lic.currency.is_base);
        assert!(lic.to_date.is_some());
        assert!(lic.from_date.is_none());
    }
}
