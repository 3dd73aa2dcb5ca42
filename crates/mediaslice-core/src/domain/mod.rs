//! Domain model (ids, records, events, errors).

pub mod errors;
pub mod events;
pub mod ids;
pub mod record;

pub use self::errors::MediaError;
pub use self::events::{MediaEvent, OneOrMany};
pub use self::ids::{MediaId, SiteId};
pub use self::record::MediaRecord;
