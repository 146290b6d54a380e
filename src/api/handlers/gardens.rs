use std::collections::HashMap;

use actix_web::{http::Method, patch, post, web, HttpResponse, Responder};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    api::{handlers::error_response, state::AppState},
    logic::{
        generator::{generate_auto_layout, generate_auto_layout_with_rng, GeneratorOptions},
        mutator::place_variant,
        occupancy::build_occupancy,
        resize::resize_garden,
        scorer::{score_layout_with, ScoringConfig},
        validator::{selectable_variants, VariantAvailability},
    },
    models::{
        garden::Garden,
        request::{
            link, ApiResponse, CreateGardenRequest, ErrorResponse, GardenRequest,
            GenerateRequest, GenerateResponse, Links, OccupancyResponse, PlaceRequest,
            PlaceResponse, ResizeRequest, SeasonRequest, SelectableRequest,
        },
        score::LayoutScore,
    },
};

fn garden_links(self_href: &str, method: Method) -> Links {
    let mut links = HashMap::new();
    links.insert("self".into(), link(self_href, method));
    links.insert("score".into(), link("/api/gardens/score", Method::POST));
    links.insert("place".into(), link("/api/gardens/place", Method::POST));
    links.insert("generate".into(), link("/api/gardens/generate", Method::POST));
    links
}

fn scoring_config(state: &AppState) -> ScoringConfig {
    ScoringConfig {
        target_coverage: state.config.target_coverage,
        ..ScoringConfig::default()
    }
}

fn score(state: &AppState, garden: &Garden) -> LayoutScore {
    score_layout_with(garden, &state.catalog, &scoring_config(state))
}

/// POST /api/gardens
/// Creates an empty garden.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = CreateGardenRequest,
    responses(
        (status = 200, description = "Empty garden", body = Garden),
        (status = 400, description = "Invalid dimensions", body = ErrorResponse),
    )
)]
#[post("/gardens")]
pub async fn create_garden(body: web::Json<CreateGardenRequest>) -> impl Responder {
    let request = body.into_inner();
    match Garden::new(request.rows, request.cols, request.season) {
        Ok(garden) => HttpResponse::Ok().json(ApiResponse::new(
            garden,
            garden_links("/api/gardens", Method::POST),
        )),
        Err(e) => error_response(&e),
    }
}

/// POST /api/gardens/occupancy
/// Returns which cells are covered by some plant's footprint.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = GardenRequest,
    responses(
        (status = 200, description = "Occupancy matrix", body = OccupancyResponse),
        (status = 400, description = "Malformed garden", body = ErrorResponse),
    )
)]
#[post("/gardens/occupancy")]
pub async fn post_occupancy(
    state: web::Data<AppState>,
    body: web::Json<GardenRequest>,
) -> impl Responder {
    let garden = body.into_inner().garden;
    if let Err(e) = garden.validate() {
        return error_response(&e);
    }
    let occupancy = build_occupancy(&garden, &state.catalog);
    let coverage = occupancy.coverage();
    HttpResponse::Ok().json(ApiResponse::new(
        OccupancyResponse {
            rows: garden.rows,
            cols: garden.cols,
            occupied: occupancy.into_matrix(),
            coverage,
        },
        garden_links("/api/gardens/occupancy", Method::POST),
    ))
}

/// POST /api/gardens/selectable
/// Tells, for every catalog variant, whether it can be anchored at the selected cell.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = SelectableRequest,
    responses(
        (status = 200, description = "Availability per variant", body = [VariantAvailability]),
        (status = 400, description = "Malformed garden", body = ErrorResponse),
    )
)]
#[post("/gardens/selectable")]
pub async fn post_selectable(
    state: web::Data<AppState>,
    body: web::Json<SelectableRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.garden.validate() {
        return error_response(&e);
    }
    let report = selectable_variants(&request.garden, &state.catalog, request.anchor);
    HttpResponse::Ok().json(ApiResponse::new(
        report,
        garden_links("/api/gardens/selectable", Method::POST),
    ))
}

/// POST /api/gardens/place
/// Anchors a variant at the selected cell (or clears it) and rescores the garden.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = PlaceRequest,
    responses(
        (status = 200, description = "Updated garden and score", body = PlaceResponse),
        (status = 400, description = "Malformed garden", body = ErrorResponse),
        (status = 404, description = "Unknown variant", body = ErrorResponse),
        (status = 409, description = "Placement blocked", body = ErrorResponse),
    )
)]
#[post("/gardens/place")]
pub async fn post_place(
    state: web::Data<AppState>,
    body: web::Json<PlaceRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.garden.validate() {
        return error_response(&e);
    }
    match place_variant(
        &request.garden,
        &state.catalog,
        request.anchor,
        request.plant.as_deref(),
    ) {
        Ok(garden) => {
            let score = score(&state, &garden);
            HttpResponse::Ok().json(ApiResponse::new(
                PlaceResponse { garden, score },
                garden_links("/api/gardens/place", Method::POST),
            ))
        }
        Err(e) => {
            log::debug!("Placement refused: {e}");
            error_response(&e)
        }
    }
}

/// POST /api/gardens/generate
/// Replaces the garden with an automatically generated layout.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated garden and score", body = GenerateResponse),
        (status = 400, description = "Malformed garden or target", body = ErrorResponse),
    )
)]
#[post("/gardens/generate")]
pub async fn post_generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.garden.validate() {
        return error_response(&e);
    }
    let target_coverage = request
        .target_coverage
        .unwrap_or(state.config.target_coverage);
    if !(0.0..=1.0).contains(&target_coverage) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("targetCoverage must lie in 0..=1 (got {target_coverage})."),
            reason: None,
        });
    }
    let options = GeneratorOptions {
        target_coverage,
        max_attempts: state.config.max_attempts,
    };
    let garden = match request.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generate_auto_layout_with_rng(&request.garden, &state.catalog, &options, &mut rng)
        }
        None => generate_auto_layout(&request.garden, &state.catalog, &options),
    };
    let score = score_layout_with(
        &garden,
        &state.catalog,
        &ScoringConfig {
            target_coverage,
            ..ScoringConfig::default()
        },
    );
    HttpResponse::Ok().json(ApiResponse::new(
        GenerateResponse {
            garden,
            score,
            target_coverage,
            generated_at: Utc::now(),
        },
        garden_links("/api/gardens/generate", Method::POST),
    ))
}

/// POST /api/gardens/score
/// Scores a garden.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = GardenRequest,
    responses(
        (status = 200, description = "Layout score", body = LayoutScore),
        (status = 400, description = "Malformed garden", body = ErrorResponse),
    )
)]
#[post("/gardens/score")]
pub async fn post_score(
    state: web::Data<AppState>,
    body: web::Json<GardenRequest>,
) -> impl Responder {
    let garden = body.into_inner().garden;
    if let Err(e) = garden.validate() {
        return error_response(&e);
    }
    HttpResponse::Ok().json(ApiResponse::new(
        score(&state, &garden),
        garden_links("/api/gardens/score", Method::POST),
    ))
}

/// POST /api/gardens/resize
/// Re-keys the garden over new dimensions, dropping plants that no longer fit.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = ResizeRequest,
    responses(
        (status = 200, description = "Resized garden", body = Garden),
        (status = 400, description = "Malformed garden or dimensions", body = ErrorResponse),
    )
)]
#[post("/gardens/resize")]
pub async fn post_resize(
    state: web::Data<AppState>,
    body: web::Json<ResizeRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let resized = request
        .garden
        .validate()
        .and_then(|_| resize_garden(&request.garden, &state.catalog, request.rows, request.cols));
    match resized {
        Ok(garden) => HttpResponse::Ok().json(ApiResponse::new(
            garden,
            garden_links("/api/gardens/resize", Method::POST),
        )),
        Err(e) => error_response(&e),
    }
}

/// PATCH /api/gardens/season
/// Switches the garden's season.
#[utoipa::path(
    context_path = "/api",
    tag = "garden",
    request_body = SeasonRequest,
    responses(
        (status = 200, description = "Garden in the new season", body = Garden),
        (status = 400, description = "Malformed garden", body = ErrorResponse),
    )
)]
#[patch("/gardens/season")]
pub async fn patch_season(body: web::Json<SeasonRequest>) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.garden.validate() {
        return error_response(&e);
    }
    HttpResponse::Ok().json(ApiResponse::new(
        request.garden.with_season(request.season),
        garden_links("/api/gardens/season", Method::PATCH),
    ))
}

