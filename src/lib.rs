mod admin;
mod config;
mod envelope;
mod error;
mod memory;
mod routes;
mod token;
mod types;

pub use admin::*;
pub use config::*;
pub use envelope::*;
pub use error::*;
pub use memory::*;
pub use routes::*;
pub use token::*;
pub use types::*;
