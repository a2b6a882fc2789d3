pub mod app;
pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use dashboard::Dashboard;
pub use state::AppState;
