use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/media", media_routes())
        .nest("/marketing", marketing_routes())
        .nest("/seo", seo_routes())
}

fn media_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::media::resolve_media_urls))
}

fn marketing_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::marketing::marketing_asset_url))
}

fn seo_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::seo::get_seo_settings))
}
