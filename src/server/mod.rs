//! HTTP server for the invoice service
//!
//! - [`ServerBuilder`]: assembles store, pricing and templates into a `Router`
//! - [`router`]: the route table
//! - [`handlers`]: one handler per invoice operation

pub mod builder;
pub mod handlers;
pub mod preview;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
