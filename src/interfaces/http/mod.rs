//! HTTP interface: router, shared state and per-area modules.

pub mod common;
pub mod modules;
pub mod router;

pub use common::{Notice, NoticeKind, NoticeParams};
pub use router::{create_router, AppState};
