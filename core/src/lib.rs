pub mod browser;
pub mod error;
pub mod response;

pub use browser::{BrowserClient, InstanceQuery, RawResponse};
pub use error::BrowserError;
pub use response::InstanceInfo;
