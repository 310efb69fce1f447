use axum::{
    Router,
    routing::{MethodRouter, get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let page_routes: [(&str, MethodRouter<AppState>); 6] = [
        ("/accounts/login/", post(handlers::auth::login)),
        ("/accounts/logout/", post(handlers::auth::logout)),
        ("/teacher/", get(handlers::teacher::dashboard)),
        (
            "/teacher/mark/",
            get(handlers::teacher::mark_attendance_form)
                .post(handlers::teacher::submit_mark_attendance),
        ),
        (
            "/student/",
            get(handlers::student::dashboard).post(handlers::student::submit_complaint),
        ),
        ("/admin-dashboard/", get(handlers::admin::dashboard)),
    ];

    // Every page answers both with and without its trailing slash.
    page_routes.into_iter().fold(
        Router::new()
            .route("/", get(handlers::home::home))
            .route("/healthz", get(healthz)),
        |router, (path, method_router)| {
            router
                .route(path, method_router.clone())
                .route(path.trim_end_matches('/'), method_router)
        },
    )
}

async fn healthz() -> &'static str {
    "ok"
}
