pub mod cache;
pub mod client;
pub mod error;
pub mod model;
pub mod rest;

pub mod prelude {
    pub use crate::cache::{Cache, DefaultCache, DefaultGuildCache, GuildCache};
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::error::{ClientError, ValidationError};
    pub use crate::rest::{JsonBody, Rest};
    pub use crate::model::*;
}
