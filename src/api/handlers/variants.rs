use std::collections::HashMap;

use actix_web::{get, http::Method, web, HttpResponse, Responder};

use crate::{
    api::state::AppState,
    logic::filter::filter_variants,
    models::{
        plant::PlantVariant,
        request::{
            link, ApiResponse, CategorySummary, ErrorResponse, Links, PaginatedResponse,
            Pagination, VariantQuery, VariantResponse,
        },
    },
};

fn variant_links(id: &str) -> Links {
    let mut links = HashMap::new();
    links.insert("self".into(), link(format!("/api/variants/{id}"), Method::GET));
    links.insert("collection".into(), link("/api/variants", Method::GET));
    links
}

/// GET /api/variants
/// Lists catalog variants, optionally narrowed by category and search text.
#[utoipa::path(
    context_path = "/api",
    tag = "catalog",
    params(VariantQuery),
    responses((status = 200, description = "Matching variants", body = [VariantResponse]))
)]
#[get("/variants")]
pub async fn list_variants(
    state: web::Data<AppState>,
    query: web::Query<VariantQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let variants = filter_variants(
        &state.catalog,
        query.category.as_deref(),
        query.q.as_deref(),
    );
    let total = variants.len();
    let items: Vec<ApiResponse<VariantResponse>> = variants
        .into_iter()
        .map(|v: &PlantVariant| {
            ApiResponse::new(VariantResponse { variant: v.clone() }, variant_links(&v.id))
        })
        .collect();
    let mut collection_links = HashMap::new();
    collection_links.insert("self".into(), link("/api/variants", Method::GET));
    collection_links.insert("categories".into(), link("/api/categories", Method::GET));
    HttpResponse::Ok().json(PaginatedResponse::new(
        items,
        collection_links,
        Pagination {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        },
    ))
}

/// GET /api/variants/{id}
/// Returns a single variant by id.
#[utoipa::path(
    context_path = "/api",
    tag = "catalog",
    params(("id" = String, Path, description = "Variant id")),
    responses(
        (status = 200, description = "The variant", body = VariantResponse),
        (status = 404, description = "Unknown variant", body = ErrorResponse),
    )
)]
#[get("/variants/{id}")]
pub async fn get_variant(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match state.catalog.get(&id) {
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Variant '{id}' not found."),
            reason: None,
        }),
        Some(variant) => HttpResponse::Ok().json(ApiResponse::new(
            VariantResponse {
                variant: variant.clone(),
            },
            variant_links(&id),
        )),
    }
}

/// GET /api/categories
/// Lists catalog categories with their variant counts.
#[utoipa::path(
    context_path = "/api",
    tag = "catalog",
    responses((status = 200, description = "Catalog categories", body = [CategorySummary]))
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    let categories: Vec<CategorySummary> = state
        .catalog
        .categories()
        .iter()
        .map(|c| CategorySummary {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            variant_count: c.variants.len(),
        })
        .collect();
    let mut links = HashMap::new();
    links.insert("self".into(), link("/api/categories", Method::GET));
    links.insert("variants".into(), link("/api/variants", Method::GET));
    HttpResponse::Ok().json(ApiResponse::new(categories, links))
}
