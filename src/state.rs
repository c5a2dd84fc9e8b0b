use crate::chart::SvgChart;
use crate::dashboard::Dashboard;
use crate::storage::JsonFileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type WebDashboard = Dashboard<JsonFileStore, SvgChart>;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<WebDashboard>>,
}

impl AppState {
    pub fn new(dashboard: WebDashboard) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }
}
