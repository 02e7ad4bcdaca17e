/// Application state and router builder
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                      # Health check (public)
/// └── /v1/
///     ├── /users                   # User accounts
///     ├── /roles                   # Read-only reference data
///     ├── /companies               # Companies (incl. list by owning user)
///     ├── /projects                # Projects (incl. per-user aggregation)
///     ├── /activities              # Units of work
///     ├── /user-activities         # Category tags
///     └── /hour-bags               # Purchased hour pools
/// ```
///
/// # Example
///
/// ```no_run
/// use timebank_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the config
/// is behind an Arc so clones stay cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users)
                .post(routes::users::create_user)
                .put(routes::users::update_user),
        )
        .route(
            "/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        );

    let role_routes = Router::new()
        .route("/", get(routes::roles::list_roles))
        .route("/:id", get(routes::roles::get_role));

    let company_routes = Router::new()
        .route(
            "/",
            get(routes::companies::list_companies)
                .post(routes::companies::create_company)
                .put(routes::companies::update_company),
        )
        .route("/user/:id", get(routes::companies::list_companies_by_user))
        .route(
            "/:id",
            get(routes::companies::get_company).delete(routes::companies::delete_company),
        );

    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::list_projects)
                .post(routes::projects::create_project)
                .put(routes::projects::update_project),
        )
        .route("/user/:id", get(routes::projects::list_projects_by_user))
        .route(
            "/:id",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        );

    let activity_routes = Router::new()
        .route(
            "/",
            get(routes::activities::list_activities)
                .post(routes::activities::create_activity)
                .put(routes::activities::update_activity),
        )
        .route(
            "/:id",
            get(routes::activities::get_activity).delete(routes::activities::delete_activity),
        );

    let user_activity_routes = Router::new()
        .route(
            "/",
            get(routes::user_activities::list_user_activities)
                .post(routes::user_activities::create_user_activity)
                .put(routes::user_activities::update_user_activity),
        )
        .route(
            "/:id",
            get(routes::user_activities::get_user_activity)
                .delete(routes::user_activities::delete_user_activity),
        );

    let hour_bag_routes = Router::new()
        .route(
            "/",
            get(routes::hour_bags::list_hour_bags)
                .post(routes::hour_bags::create_hour_bag)
                .put(routes::hour_bags::update_hour_bag),
        )
        .route("/active", get(routes::hour_bags::list_active_hour_bags))
        .route(
            "/:id",
            get(routes::hour_bags::get_hour_bag).delete(routes::hour_bags::delete_hour_bag),
        );

    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/roles", role_routes)
        .nest("/companies", company_routes)
        .nest("/projects", project_routes)
        .nest("/activities", activity_routes)
        .nest("/user-activities", user_activity_routes)
        .nest("/hour-bags", hour_bag_routes);

    let cors = build_cors_layer(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Configures CORS from the allowed-origins list; "*" selects the permissive
/// development mode.
fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    }
}
