pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{applications, dashboard, jobs, saved_jobs, users};

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts & profiles
        .route("/api/users/register", post(users::handlers::register))
        .route("/api/users/login", post(users::handlers::login))
        .route(
            "/api/users/me",
            get(users::handlers::me).put(users::handlers::update_profile),
        )
        .route("/api/users/me/resume", post(users::handlers::upload_resume))
        .route("/api/users/me/avatar", post(users::handlers::upload_avatar))
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handlers::list_jobs).post(jobs::handlers::create_job),
        )
        .route("/api/jobs/mine", get(jobs::handlers::my_jobs))
        .route("/api/jobs/saved", get(saved_jobs::handlers::list_saved))
        .route(
            "/api/jobs/:id",
            get(jobs::handlers::get_job)
                .put(jobs::handlers::update_job)
                .delete(jobs::handlers::delete_job),
        )
        .route(
            "/api/jobs/:id/save",
            post(saved_jobs::handlers::save_job).delete(saved_jobs::handlers::unsave_job),
        )
        .route(
            "/api/jobs/:id/applications",
            get(jobs::handlers::job_applications),
        )
        // Applications
        .route(
            "/api/applications",
            post(applications::handlers::apply).get(applications::handlers::list_applications),
        )
        .route(
            "/api/applications/:id",
            get(applications::handlers::get_application)
                .delete(applications::handlers::withdraw),
        )
        .route(
            "/api/applications/:id/status",
            patch(applications::handlers::update_status),
        )
        // Dashboard
        .route("/api/dashboard", get(dashboard::handlers::dashboard))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}
