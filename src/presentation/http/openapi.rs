// src/presentation/http/openapi.rs
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::logout,
        crate::presentation::http::controllers::sessions::list_sessions,
        crate::presentation::http::controllers::sessions::terminate_session,
        crate::presentation::http::controllers::sessions::session_stats,
        super::routes::health
    ),
    components(schemas(
        StatusResponse,
        crate::presentation::http::error::ErrorResponse,
        crate::presentation::http::controllers::auth::LoginRequest,
        crate::presentation::http::controllers::auth::LoginResponse,
        crate::application::dto::UserDto,
        crate::application::dto::AuthTokenDto,
        crate::application::dto::SessionDto,
        crate::application::queries::sessions::SessionStatsDto,
        crate::application::queries::sessions::GroupCountDto,
        crate::application::dto::CursorPage<crate::application::dto::SessionDto>
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and logout"),
        (name = "Sessions", description = "Session history and termination"),
        (name = "System", description = "Service plumbing")
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}
