use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::http::encode_path_segment;

/// A Planhat (internal team) user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date: Option<DateTime<Utc>>,
    #[serde(rename = "__v", skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed_view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_log_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar_one_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collapsed_folders: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_report_period_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_layout_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_digest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_app_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub last_visited_companies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub last_visited_endusers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exposed_as_sender_option: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_meeting_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_open_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_getting_started_steps: Option<SkippedSteps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_open_tabs: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bubble_chart_settings: Option<BubbleChartSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_tab_searches: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "googleApi", skip_serializing_if = "Option::is_none")]
    pub google_api: Option<SyncSettings>,
    #[serde(rename = "msApi", skip_serializing_if = "Option::is_none")]
    pub ms_api: Option<SyncSettings>,
    #[serde(rename = "googleCalendarApi", skip_serializing_if = "Option::is_none")]
    pub google_calendar_api: Option<CalendarSyncSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkippedSteps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BubbleChartSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_param: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_initial: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synced_labels: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSyncSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_initial: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synced_calendars: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_to_save: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.client.base_url());
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        let url = format!(
            "{}/users/{}",
            self.client.base_url(),
            encode_path_segment(id)
        );
        Ok(self.client.send(Method::GET, &url).await?.unwrap_or_default())
    }
}
