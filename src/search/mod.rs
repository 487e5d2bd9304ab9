pub mod client;
pub mod error;
pub mod paginate;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::DomainClient;
pub use error::FetchError;
pub use paginate::fetch_all;
pub use traits::ListingSource;
pub use types::FetchSettings;
