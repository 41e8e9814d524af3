pub mod dashboard;
pub mod dispatcher;
pub mod panel;
pub mod resource_store;
