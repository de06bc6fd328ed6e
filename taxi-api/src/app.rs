/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taxi_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taxi_shared::{
    auth::middleware::{authenticate_bearer, AuthError},
    models::driver::Driver,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /v1
///     ├── /auth                       public
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── GET  /                      fleet counts
///     ├── /manufacturers              list, create, detail, update, delete
///     ├── /cars                       list, create, detail, update, delete
///     │   ├── POST /:id/assign
///     │   └── POST /:id/unassign
///     └── /drivers                    list, create, detail, update, delete
///         └── PUT  /:id/license
/// ```
///
/// Everything under `/v1` except `/v1/auth` requires a bearer access token
/// belonging to an active driver.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let manufacturer_routes = Router::new()
        .route(
            "/",
            get(routes::manufacturers::list_manufacturers).post(routes::manufacturers::create_manufacturer),
        )
        .route(
            "/:id",
            get(routes::manufacturers::get_manufacturer)
                .put(routes::manufacturers::update_manufacturer)
                .delete(routes::manufacturers::delete_manufacturer),
        );

    let car_routes = Router::new()
        .route("/", get(routes::cars::list_cars).post(routes::cars::create_car))
        .route(
            "/:id",
            get(routes::cars::get_car)
                .put(routes::cars::update_car)
                .delete(routes::cars::delete_car),
        )
        .route("/:id/assign", post(routes::cars::assign))
        .route("/:id/unassign", post(routes::cars::unassign));

    let driver_routes = Router::new()
        .route("/", get(routes::drivers::list_drivers).post(routes::drivers::create_driver))
        .route(
            "/:id",
            get(routes::drivers::get_driver)
                .put(routes::drivers::update_driver)
                .delete(routes::drivers::delete_driver),
        )
        .route("/:id/license", put(routes::drivers::update_license));

    let protected_routes = Router::new()
        .route("/", get(routes::index::index))
        .nest("/manufacturers", manufacturer_routes)
        .nest("/cars", car_routes)
        .nest("/drivers", driver_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

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
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Resolves the acting driver and injects its `AuthContext`
///
/// The token must be a valid access token and its driver must still exist
/// and be active.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context = authenticate_bearer(req.headers(), state.jwt_secret())?;

    let driver = Driver::find_by_id(&state.db, auth_context.driver_id)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

    if !driver.is_some_and(|d| d.is_active) {
        return Err(AuthError::InactiveDriver.into());
    }

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
