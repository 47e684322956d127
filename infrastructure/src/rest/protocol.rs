//! Wire types of the REST endpoint.
//!
//! Field names follow the service's camelCase JSON. Absent optional fields
//! are omitted from requests.

use askbatch_domain::{DatasourceId, DatasourceInfo, RequestId, RequestState};
use serde::{Deserialize, Serialize};

/// Value of the `status` field on every successful response.
pub const STATUS_API_OK: &str = "API_OK";

pub const PATH_SIGNIN: &str = "user/signin";
pub const PATH_SIGNOUT: &str = "user/signout";
pub const PATH_DS_ADD: &str = "ds/add";
pub const PATH_DS_DELETE: &str = "ds/delete";
pub const PATH_DS_ALL: &str = "ds/all";
pub const PATH_CLEAR_CONVERSATION: &str = "clear/conversation";
pub const PATH_ASK: &str = "ask";
pub const PATH_CHECK: &str = "check";
pub const PATH_CANCEL: &str = "cancel";

/// Fixed descriptive values of throwaway datasources.
pub const TEST_DS_DESCRIPTION: &str = "Test datasource";
pub const TEST_MODEL_NAME: &str = "Test model";
pub const TEST_MODEL_VERSION: &str = "Test version";

// ==================== Requests ====================

#[derive(Debug, Serialize)]
pub struct SigninRequest<'a> {
    pub email: &'a str,
    pub passwd: &'a str,
}

/// Body of calls that only carry the session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest<'a> {
    pub access_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDatasourceRequest<'a> {
    pub access_token: &'a str,
    pub name: &'a str,
    pub short_desc: &'a str,
    pub mdl_id: &'a str,
    pub mdl_name: &'a str,
    pub mdl_ver: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDatasourceRequest<'a> {
    pub access_token: &'a str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearConversationRequest<'a> {
    pub access_token: &'a str,
    pub ds_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest<'a> {
    pub access_token: &'a str,
    pub txt: &'a str,
    pub ds_id: i64,
    pub is_test: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest<'a> {
    pub access_token: &'a str,
    pub srv_req_ids: Vec<&'a str>,
}

// ==================== Responses ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AddDatasourceResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourcesResponse {
    pub data_sources: Vec<DatasourceJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceJson {
    pub id: i64,
    pub mdl_id: String,
}

impl From<DatasourceJson> for DatasourceInfo {
    fn from(ds: DatasourceJson) -> Self {
        DatasourceInfo {
            id: DatasourceId::new(ds.id),
            model_id: ds.mdl_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub srv_req_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatesResponse {
    pub states: Vec<RequestStateJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStateJson {
    pub srv_req_id: String,
    #[serde(default)]
    pub usr_id: Option<i64>,
    pub ds_id: i64,
    #[serde(default)]
    pub res_type: Option<String>,
    #[serde(default)]
    pub res_body: Option<String>,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub create_tstamp: i64,
    #[serde(default)]
    pub update_tstamp: i64,
}

impl From<RequestStateJson> for RequestState {
    fn from(json: RequestStateJson) -> Self {
        RequestState {
            request_id: RequestId::new(json.srv_req_id),
            datasource_id: DatasourceId::new(json.ds_id),
            status: json.status.into(),
            result_type: json.res_type,
            result_body: json.res_body,
            error: json.error,
            create_timestamp: json.create_tstamp,
            update_timestamp: json.update_tstamp,
        }
    }
}
