pub mod api;
pub mod envelope;
pub mod error;
pub mod mock;
pub mod query;
pub mod session;
pub mod transport;

pub use api::{Page, RentalApi};
pub use error::ApiError;
pub use query::{ListQuery, SortKey};
pub use session::Session;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, MockTransport, Transport};
