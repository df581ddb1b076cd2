//! Sentinel names for types every target provides in some form.
//!
//! A sentinel ends in `!` and is never imported directly. Renderers map it
//! onto the target's own type, e.g. `time!` becomes `time.Time` in Go and
//! `java.time.Instant` in Java.

pub const BOOL: &str = "bool!";
pub const BYTE: &str = "byte!";
pub const RUNE: &str = "rune!";
pub const INT: &str = "int!";
pub const INT16: &str = "int16!";
pub const INT32: &str = "int32!";
pub const INT64: &str = "int64!";
pub const FLOAT32: &str = "float32!";
pub const FLOAT64: &str = "float64!";
pub const STRING: &str = "string!";
pub const ERROR: &str = "error!";
pub const ANY: &str = "any!";
pub const MAP: &str = "map!";
pub const LIST: &str = "list!";
pub const UUID: &str = "uuid!";
pub const TIME: &str = "time!";
pub const DURATION: &str = "duration!";
pub const URL: &str = "url!";

/// Every known sentinel.
pub const ALL: &[&str] = &[
    BOOL, BYTE, RUNE, INT, INT16, INT32, INT64, FLOAT32, FLOAT64, STRING, ERROR, ANY, MAP, LIST,
    UUID, TIME, DURATION, URL,
];

/// True if `name` is one of the known sentinels.
pub fn is_known(name: &str) -> bool {
    ALL.contains(&name)
}
