pub mod draft;
pub mod filter;
pub mod model;
pub mod paginate;
pub mod record;
pub mod role;
