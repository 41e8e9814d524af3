pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::dashboard::Dashboard;
pub use app::dispatcher::MutationDispatcher;
pub use app::panel::Panel;
pub use app::resource_store::{Listing, LoadStatus, ResourceStore};
pub use domain::draft::{Draft, DraftController, DraftMode};
pub use domain::filter::FilterState;
pub use domain::model::{EntitySchema, ResourceModel, SchemaRegistry};
pub use domain::record::{Record, RecordId};
pub use domain::role::Role;
pub use error::{ConsoleError, ConsoleResult};
pub use infra::source::{DataSource, MemorySource, RestSource};
