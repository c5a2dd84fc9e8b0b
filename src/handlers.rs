use crate::chart::SvgChart;
use crate::errors::AppError;
use crate::models::{Activity, ActivityRequest, DashboardView};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::info;

// Each page load counts as a visit and increments the counters.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut dashboard = state.dashboard.lock().await;
    let view = dashboard.mount(SvgChart::default());
    Html(render_index(&view))
}

pub async fn mount(State(state): State<AppState>) -> Json<DashboardView> {
    let mut dashboard = state.dashboard.lock().await;
    Json(dashboard.mount(SvgChart::default()))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.view())
}

pub async fn set_activity(
    State(state): State<AppState>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let activity: Activity = payload.activity.parse().map_err(AppError::bad_request)?;

    let mut dashboard = state.dashboard.lock().await;
    let view = match payload.value {
        Some(value) => dashboard.set_activity(activity, value),
        None => dashboard.toggle_activity(activity),
    };
    info!(%activity, value = view.activities.get(activity), "updated activity");
    Ok(Json(view))
}

pub async fn reset(State(state): State<AppState>) -> Json<DashboardView> {
    let mut dashboard = state.dashboard.lock().await;
    Json(dashboard.reset())
}
