pub mod api;
pub mod envelope;
pub mod models;

pub use api::*;
pub use envelope::ListEnvelope;
pub use models::*;
