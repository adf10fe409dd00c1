pub(crate) mod catalog;
pub(crate) mod definition;
pub mod executor;
mod server;

pub use catalog::RepeatGroupCatalog;
pub use definition::AuthContext;
pub use server::{SurveyCtoClient, SurveyCtoClientBuilder};
