use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_admin_key, trace_id};
use crate::routes::{
    admin_events, contact_shares, events, feedback, health, likes, live, messages, notifications,
    profiles, sessions,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Attendee routes; each handler extracts and validates X-Session-Id.
    let attendee_routes = Router::new()
        .route("/api/v1/sessions", post(sessions::create_session))
        .route("/api/v1/events/join", post(events::join_event))
        .route("/api/v1/events/:event_id", get(events::get_event))
        .route(
            "/api/v1/events/:event_id/profiles",
            post(profiles::create_profile),
        )
        .route(
            "/api/v1/events/:event_id/profiles/me",
            get(profiles::get_my_profile)
                .patch(profiles::update_my_profile)
                .delete(profiles::delete_my_profile),
        )
        .route(
            "/api/v1/events/:event_id/profiles/:session_id",
            get(profiles::get_profile),
        )
        .route(
            "/api/v1/events/:event_id/discover",
            get(profiles::discover_profiles),
        )
        .route(
            "/api/v1/events/:event_id/likes",
            get(likes::list_likes).post(likes::create_like),
        )
        .route("/api/v1/events/:event_id/matches", get(likes::list_matches))
        .route(
            "/api/v1/events/:event_id/messages",
            post(messages::send_message),
        )
        .route(
            "/api/v1/events/:event_id/conversations/:other_session_id/messages",
            get(messages::list_conversation),
        )
        .route(
            "/api/v1/events/:event_id/conversations/:other_session_id/read",
            post(messages::mark_conversation_read),
        )
        .route(
            "/api/v1/events/:event_id/contact-shares",
            get(contact_shares::list_contact_shares).post(contact_shares::share_contact),
        )
        .route(
            "/api/v1/events/:event_id/feedback",
            post(feedback::submit_feedback),
        )
        .route(
            "/api/v1/events/:event_id/notifications",
            get(notifications::get_notifications),
        )
        .route("/api/v1/events/:event_id/live", get(live::live_feed));

    // Organizer routes (require X-Admin-Key)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/events",
            get(admin_events::list_events).post(admin_events::create_event),
        )
        .route(
            "/api/v1/admin/events/:event_id",
            get(admin_events::get_event)
                .patch(admin_events::update_event)
                .delete(admin_events::delete_event),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_key,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Global middleware (bottom layers run first)
    Router::new()
        .merge(public_routes)
        .merge(attendee_routes)
        .merge(admin_routes)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
