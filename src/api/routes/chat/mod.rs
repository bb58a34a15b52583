pub mod public;
mod router;
pub use router::{SESSION_ID_HEADER, router};
