//! Test utilities for renderers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use eyre::Result;
use loom_ir::{
    Binary, Block, Enum, EnumBase, ErrorCase, ErrorGroup, Field, Func, Lang, Module, Package,
    Param, Property, Return, SrcFile, Struct, Target, TypeDecl, stdlib,
};

use crate::render::Rendered;
use crate::stdlib::lang;

/// The canonical small model: package `example.com/m` named `main` with
/// one file `main` holding
///
/// ```go
/// type Point struct { X int; Y int }
/// func (p Point) Sum() int { return p.X + p.Y }
/// ```
pub fn point_module(lang: Lang) -> Result<Module> {
    let sum = Func::new("Sum")
        .add_results([Param::unnamed(TypeDecl::simple(stdlib::INT))])?
        .with_body(Block::new().add(Return::new([Binary::new(
            lang::attr("X"),
            "+",
            lang::attr("Y"),
        )?])?)?)?;
    let point = Struct::new("Point")
        .with_doc("...is a location in the plane.")
        .add_fields([
            Field::new("X", TypeDecl::simple(stdlib::INT)),
            Field::new("Y", TypeDecl::simple(stdlib::INT)),
        ])?
        .add_methods([sum])?;
    let module = Module::new(Target::lang(lang)).add_packages([Package::new("example.com/m")
        .with_name("main")
        .add_files([SrcFile::new("main").add_types([point])?])?])?;
    Ok(module)
}

/// An integer enum with the cases `unknown`, `running` and `stopped`.
pub fn status_enum() -> Enum {
    Enum::new("Status", EnumBase::Int)
        .with_doc("...is the run state of a job.")
        .add_cases(["unknown", "running", "stopped"])
}

/// An error group `TicketError` with the cases `NotFound(ID int64)` and
/// `Forbidden(User string, Reason string)`.
pub fn ticket_errors() -> Result<ErrorGroup> {
    let group = ErrorGroup::new("TicketError")
        .with_doc("...enumerates failures of ticket operations.")
        .add_cases([
            ErrorCase::new("NotFound")
                .with_doc("...means no ticket has the given id.")
                .add_properties([Property::new("ID", TypeDecl::simple(stdlib::INT64))]),
            ErrorCase::new("Forbidden").add_properties([
                Property::new("User", TypeDecl::simple(stdlib::STRING)),
                Property::new("Reason", TypeDecl::simple(stdlib::STRING)),
            ]),
        ])?;
    Ok(group)
}

/// Wrap `types` into a module with a single package and file.
pub fn single_file_module(
    lang: Lang,
    import_path: &str,
    file: &str,
    types: impl IntoIterator<Item = loom_ir::NamedType>,
) -> Result<Module> {
    let module = Module::new(Target::lang(lang)).add_packages([
        Package::new(import_path).add_files([SrcFile::new(file).add_types(types)?])?,
    ])?;
    Ok(module)
}

/// Assert that two strings are equal, with a nice diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        // Simple line-by-line diff
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Install a `RUST_LOG` filtered subscriber that writes through the test
/// harness. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write a render result into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn write_to_temp(rendered: &Rendered) -> Result<tempfile::TempDir> {
    let temp_dir = tempfile::TempDir::new()?;
    loom_core::write(temp_dir.path(), &rendered.root)?;
    Ok(temp_dir)
}

/// Read a file below `dir` as text.
pub fn read_text(dir: &Path, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(dir.join(path))?)
}
