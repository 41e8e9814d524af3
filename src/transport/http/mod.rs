pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod dashboards;
    pub mod health;
    pub mod panels;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
