use utoipa::OpenApi;

use crate::{
    logic::validator::{BlockReason, VariantAvailability},
    models::{
        garden::{Cell, Garden},
        plant::{PlantCategory, PlantVariant, Season, Sun, Water},
        request::{
            CategorySummary, CreateGardenRequest, ErrorResponse, GardenRequest, GenerateRequest,
            GenerateResponse, Link, OccupancyResponse, Pagination, PlaceRequest, PlaceResponse,
            ResizeRequest, SeasonRequest, SelectableRequest, VariantResponse,
        },
        score::{LayoutScore, ScoreBreakdown},
        Coordinate,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Layout API",
        description = "Grid garden designer: browse a plant catalogue, place multi-cell plants without overlap, generate layouts towards a coverage target and score them.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::variants::list_variants,
        crate::api::handlers::variants::get_variant,
        crate::api::handlers::variants::list_categories,
        crate::api::handlers::gardens::create_garden,
        crate::api::handlers::gardens::post_occupancy,
        crate::api::handlers::gardens::post_selectable,
        crate::api::handlers::gardens::post_place,
        crate::api::handlers::gardens::post_generate,
        crate::api::handlers::gardens::post_score,
        crate::api::handlers::gardens::post_resize,
        crate::api::handlers::gardens::patch_season,
    ),
    components(
        schemas(
            // Enums
            Season, Sun, Water, BlockReason,
            // Catalogue
            PlantVariant, PlantCategory, VariantResponse, CategorySummary,
            // Garden
            Coordinate, Cell, Garden, VariantAvailability,
            // Scoring
            LayoutScore, ScoreBreakdown,
            // Requests
            CreateGardenRequest, GardenRequest, SelectableRequest, PlaceRequest,
            GenerateRequest, ResizeRequest, SeasonRequest,
            // Responses
            OccupancyResponse, PlaceResponse, GenerateResponse,
            // Shared
            Link, Pagination, ErrorResponse,
        )
    ),
    tags(
        (name = "catalog", description = "Plant catalogue: categories, variants, search"),
        (name = "garden", description = "Garden grid: placement, generation, scoring"),
    )
)]
pub struct ApiDoc;
