use crate::dashboard::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}
