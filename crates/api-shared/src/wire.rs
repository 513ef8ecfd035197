//! JSON wire types for the HTTP API.
//!
//! These mirror the core model with an OpenAPI schema attached. They carry no
//! behaviour; conversion from core types lives in `api-rest`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A search submission. Surrounding whitespace in `query` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchReq {
    #[schema(example = "Crocin")]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRes {
    #[schema(example = "Crocin")]
    pub brand_name: String,
    #[schema(example = "Paracetamol")]
    pub salt: String,
    #[schema(example = "500 mg")]
    pub dosage: String,
    #[schema(example = "GSK")]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRes {
    #[schema(example = "Same Salt & Dosage (Popular Brands)")]
    pub title: String,
    pub medicines: Vec<MedicineRes>,
}

/// The validated answer, field-for-field as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultRes {
    pub searched_medicine: Option<MedicineRes>,
    pub categories: Vec<CategoryRes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Prompt,
    Loading,
    Error,
    NotFound,
    NoAlternatives,
    Results,
}

/// Which view to render, with the copy and cards it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewRes {
    pub kind: ViewKind,
    pub title: String,
    pub message: String,
    pub searched: Option<MedicineRes>,
    /// Only non-empty categories, in service order.
    pub categories: Vec<CategoryRes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Searching,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchStateRes {
    pub status: SearchStatus,
    pub query: Option<String>,
    /// User-facing failure message; present only when `status` is `failed`.
    pub message: Option<String>,
    pub result: Option<SearchResultRes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchRes {
    pub query: String,
    pub view: ViewRes,
    pub result: SearchResultRes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRes {
    pub session_id: String,
    pub state: SearchStateRes,
    pub view: ViewRes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}
