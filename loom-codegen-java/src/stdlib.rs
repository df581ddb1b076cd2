//! Java names of the stdlib sentinels.

use loom_core::Name;
use loom_ir::stdlib;

/// Map a stdlib sentinel onto its Java name. Other names pass through.
pub fn java_stdlib(name: &Name) -> Name {
    let mapped = match name.as_str() {
        stdlib::BOOL => "boolean",
        stdlib::BYTE => "byte",
        stdlib::RUNE => "char",
        stdlib::INT => "int",
        stdlib::INT16 => "short",
        stdlib::INT32 => "int",
        stdlib::INT64 => "long",
        stdlib::FLOAT32 => "float",
        stdlib::FLOAT64 => "double",
        stdlib::STRING => "java.lang.String",
        stdlib::ERROR => "java.lang.Exception",
        stdlib::ANY => "java.lang.Object",
        stdlib::UUID => "java.util.UUID",
        stdlib::TIME => "java.time.Instant",
        stdlib::DURATION => "java.time.Duration",
        stdlib::URL => "java.net.URI",
        stdlib::MAP => "java.util.Map",
        stdlib::LIST => "java.util.List",
        _ => return name.clone(),
    };
    Name::new(mapped)
}

/// The wrapper class of a primitive, for use as a type argument.
pub fn boxed(ty: &str) -> &str {
    match ty {
        "boolean" => "Boolean",
        "byte" => "Byte",
        "char" => "Character",
        "short" => "Short",
        "int" => "Integer",
        "long" => "Long",
        "float" => "Float",
        "double" => "Double",
        other => other,
    }
}
