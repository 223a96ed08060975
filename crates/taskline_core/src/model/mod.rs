mod record;

pub use record::{REMINDED_MARKER, Record, SEPARATOR};
