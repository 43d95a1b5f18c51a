//! Matrix-style error catalogue and its HTTP renderings

pub mod catalogue;
pub mod codes;
pub mod failure;
pub mod handler;
pub mod response;

pub use catalogue::{find, lookup, Catalogue, ErrorDescriptor, CATALOGUE};
pub use codes::ErrorCode;
pub use failure::Failure;
pub use handler::{handle_errors, handle_panic, not_found};
pub use response::{render_flat, render_hal, render_response, ErrorBody, ErrorFormat, ErrorReport};
