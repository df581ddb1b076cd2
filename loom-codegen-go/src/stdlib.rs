//! Go names of the stdlib sentinels.

use loom_core::Name;
use loom_ir::stdlib;

/// Map a stdlib sentinel onto its Go name. Other names pass through.
///
/// `map!` and `list!` are kept: they only appear as generic bases and are
/// rendered as `map[K]V` and `[]T`.
pub fn go_stdlib(name: &Name) -> Name {
    let mapped = match name.as_str() {
        stdlib::BOOL => "bool",
        stdlib::BYTE => "byte",
        stdlib::RUNE => "rune",
        stdlib::INT => "int",
        stdlib::INT16 => "int16",
        stdlib::INT32 => "int32",
        stdlib::INT64 => "int64",
        stdlib::FLOAT32 => "float32",
        stdlib::FLOAT64 => "float64",
        stdlib::STRING => "string",
        stdlib::ERROR => "error",
        stdlib::ANY => "any",
        stdlib::UUID => "github.com/google/uuid.UUID",
        stdlib::TIME => "time.Time",
        stdlib::DURATION => "time.Duration",
        stdlib::URL => "net/url.URL",
        _ => return name.clone(),
    };
    Name::new(mapped)
}
