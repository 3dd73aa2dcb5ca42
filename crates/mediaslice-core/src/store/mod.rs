//! Store module: per-site media state and its transitions.

mod state;

pub use state::{MediaState, SiteMedia};
