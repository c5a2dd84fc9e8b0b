pub mod app;
pub mod calories;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use calories::compute_calorie_series;
pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use habits::HabitStore;
pub use policy::IncrementPolicy;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
