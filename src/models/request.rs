use std::collections::HashMap;

use actix_web::http::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};

use crate::logic::validator::BlockReason;
use crate::models::{
    garden::Garden,
    plant::{PlantVariant, Season},
    score::LayoutScore,
    Coordinate, Matrix,
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links, pagination: Pagination) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

/// Error body; `reason` is set when a placement was refused.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub reason: Option<BlockReason>,
}

/// Catalog search parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VariantQuery {
    /// Category id, or `all`.
    pub category: Option<String>,
    /// Case-insensitive text matched against name, id and tags.
    pub q: Option<String>,
}

/// Plant variant for use in responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantResponse {
    #[serde(flatten)]
    pub variant: PlantVariant,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub variant_count: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGardenRequest {
    pub rows: usize,
    pub cols: usize,
    /// Defaults to spring.
    #[serde(default)]
    pub season: Season,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GardenRequest {
    pub garden: Garden,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectableRequest {
    pub garden: Garden,
    /// Selected anchor cell; absent when nothing is selected.
    pub anchor: Option<Coordinate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaceRequest {
    pub garden: Garden,
    pub anchor: Option<Coordinate>,
    /// Variant id to anchor at `anchor`; absent or `null` clears the cell.
    pub plant: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub garden: Garden,
    /// Fraction of cells to cover, `0..=1`; defaults to the configured target.
    pub target_coverage: Option<f64>,
    /// Seed for a reproducible layout.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResizeRequest {
    pub garden: Garden,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SeasonRequest {
    pub garden: Garden,
    pub season: Season,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResponse {
    pub rows: usize,
    pub cols: usize,
    pub occupied: Matrix<bool>,
    pub coverage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaceResponse {
    pub garden: Garden,
    pub score: LayoutScore,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub garden: Garden,
    pub score: LayoutScore,
    pub target_coverage: f64,
    #[schema(value_type = String, format = DateTime)]
    pub generated_at: DateTime<Utc>,
}
