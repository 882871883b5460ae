//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

/// Router options that differ between deployment and tests
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    /// Per-IP limiting on public write routes; needs connect info on the listener
    pub rate_limit_enabled: bool,
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps, options: AppOptions) -> Router {
    let jwt_service = server_deps.jwt_service.clone();

    let app_state = AppState {
        db_pool: server_deps.db_pool.clone(),
        server_deps: Arc::new(server_deps),
    };

    // Unauthenticated writes
    let mut public = Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/admissions", post(submit_application_handler));

    if options.rate_limit_enabled {
        // 10 requests/sec per client IP with bursts of 20
        match GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
        {
            Some(config) => {
                public = public.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => tracing::warn!("Invalid rate limiter configuration, public routes unthrottled"),
        }
    }

    let api = Router::new()
        .route("/api", get(banner_handler))
        .route("/api/auth/me", get(me_handler))
        // Admissions
        .route("/api/admissions", get(list_applications_handler))
        .route("/api/admissions/:id", get(get_application_handler))
        .route("/api/admissions/:id/approve", put(review_application_handler))
        // Courses
        .route(
            "/api/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/api/courses/:id",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
        // Enrollments
        .route(
            "/api/enrollments",
            get(list_enrollments_handler).post(enroll_handler),
        )
        .route(
            "/api/enrollments/:id",
            axum::routing::delete(drop_enrollment_handler),
        )
        // Attendance
        .route("/api/attendance", get(list_attendance_handler))
        .route("/api/attendance/mark", post(mark_attendance_handler))
        .route(
            "/api/attendance/stats/:student_id",
            get(attendance_stats_handler),
        )
        // Exams
        .route(
            "/api/exams",
            get(list_exams_handler).post(create_exam_handler),
        )
        .route(
            "/api/exams/:id",
            get(get_exam_handler)
                .put(update_exam_handler)
                .delete(delete_exam_handler),
        )
        // Results
        .route(
            "/api/results",
            get(list_results_handler).post(enter_result_handler),
        )
        .route(
            "/api/results/student/:student_id",
            get(student_results_handler),
        )
        .route("/api/results/:id", put(update_result_handler))
        // Fees
        .route("/api/fees", get(list_fees_handler).post(create_fee_handler))
        .route("/api/fees/pay", post(pay_fee_handler))
        .route("/api/fees/student/:student_id", get(student_fees_handler))
        .route("/api/fees/:id", put(update_fee_handler))
        // Hostels
        .route(
            "/api/hostels",
            get(list_allocations_handler).post(allocate_room_handler),
        )
        .route("/api/hostels/apply", post(apply_for_hostel_handler))
        .route("/api/hostels/:id", put(update_allocation_handler))
        // Alumni
        .route(
            "/api/alumni",
            get(list_alumni_handler).post(create_alumnus_handler),
        )
        .route(
            "/api/alumni/:id",
            get(get_alumnus_handler).put(update_alumnus_handler),
        )
        // Reporting
        .route("/api/analytics/dashboard", get(dashboard_handler));

    Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .merge(api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
