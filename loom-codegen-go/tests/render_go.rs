//! End-to-end rendering tests for the Go backend.
//!
//! Run `cargo insta review` to update inline snapshots when making
//! intentional changes.

use loom_codegen::RenderConfig;
use loom_codegen::stdlib::errors::{self, CheckKind};
use loom_codegen::stdlib::{fmt, lang};
use loom_codegen::testing::{
    assert_content_eq, init_tracing, point_module, read_text, single_file_module, status_enum,
    ticket_errors, write_to_temp,
};
use loom_codegen_go::render;
use loom_ir::{
    Block, Enum, EnumBase, ErrorCase, ErrorGroup, Field, Func, Ident, Interface, Lang, Macro,
    Module, Node, Package, Param, Property, Return, SrcFile, Struct, Target, Tpl, TypeBound,
    TypeDecl, Visibility,
};

fn render_text(module: &Module, path: &str) -> String {
    init_tracing();
    let rendered = render(module, &RenderConfig::default());
    if let Some(err) = &rendered.error {
        panic!("render failed: {err:#}");
    }
    rendered.text(path).expect("file not rendered")
}

#[test]
fn test_point_end_to_end() {
    let module = point_module(Lang::Go).unwrap();
    let text = render_text(&module, "example.com/m/main.go");
    insta::assert_snapshot!(text, @r#"
package main

// Point is a location in the plane.
type Point struct {
	X int
	Y int
}

func (p Point) Sum() int {
	return p.X + p.Y
}
"#);
}

#[test]
fn test_declaration_order_is_kept() {
    let s = Struct::new("Triple")
        .add_fields([
            Field::new("C", "int!"),
            Field::new("A", "string!"),
            Field::new("B", "bool!"),
        ])
        .unwrap()
        .add_methods([
            Func::new("Zeta"),
            Func::new("Alpha")
                .add_params([
                    Param::new("c", "int!"),
                    Param::new("a", "int!"),
                    Param::new("b", "int!"),
                ])
                .unwrap(),
        ])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/m", "triple", [s.into()]).unwrap();
    let text = render_text(&module, "example.com/m/triple.go");
    assert_content_eq(
        "package m\n\ntype Triple struct {\n\tC int\n\tA string\n\tB bool\n}\n\n\
         func (t Triple) Zeta() {\n}\n\n\
         func (t Triple) Alpha(c int, a int, b int) {\n}\n",
        &text,
    );
}

#[test]
fn test_importer_disambiguates_collisions() {
    let s = Struct::new("Pair")
        .add_fields([
            Field::new("Left", "a/foo.Thing"),
            Field::new("Right", "b/foo.Thing"),
            Field::new("When", "time!"),
        ])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/m", "pair", [s.into()]).unwrap();
    let text = render_text(&module, "example.com/m/pair.go");
    insta::assert_snapshot!(text, @r#"
package m

import (
	"a/foo"
	foo2 "b/foo"
	"time"
)

type Pair struct {
	Left  foo.Thing
	Right foo2.Thing
	When  time.Time
}
"#);
}

#[test]
fn test_import_aliases_for_keywords_and_versions() {
    let s = Struct::new("Ref")
        .add_fields([
            Field::new("Kind", "example.com/x/type.Kind"),
            Field::new("Doc", "gopkg.in/yaml.v3.Node"),
        ])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/m", "ref", [s.into()]).unwrap();
    let text = render_text(&module, "example.com/m/ref.go");
    insta::assert_snapshot!(text, @r#"
package m

import (
	type2 "example.com/x/type"
	yamlv3 "gopkg.in/yaml.v3"
)

type Ref struct {
	Kind type2.Kind
	Doc  yamlv3.Node
}
"#);
}

fn reader_interface() -> Interface {
    Interface::new("Reader")
        .with_doc("...reads bytes.")
        .add_methods([
            Func::new("Read")
                .add_params([Param::new("p", TypeDecl::slice("byte!".into()))])
                .unwrap()
                .add_results([Param::new("n", "int!"), Param::new("err", "error!")])
                .unwrap(),
            Func::new("Close"),
        ])
        .unwrap()
}

#[test]
fn test_interface_stub_implementation() {
    let imp = reader_interface().implement(true).unwrap();
    let module = single_file_module(Lang::Go, "example.com/io", "reader", [imp.into()]).unwrap();
    let text = render_text(&module, "example.com/io/reader.go");
    insta::assert_snapshot!(text, @r#"
package io

// ReaderImpl is an implementation of Reader.
// Reader reads bytes.
type ReaderImpl struct{}

func (r *ReaderImpl) Read(p []byte) (n int, err error) {
}

func (r *ReaderImpl) Close() {
}
"#);
}

#[test]
fn test_interface_mock_forwards_to_func_fields() {
    let mock = reader_interface().implement_mock().unwrap();
    let module = single_file_module(Lang::Go, "example.com/io", "mock", [mock.into()]).unwrap();
    let text = render_text(&module, "example.com/io/mock.go");
    insta::assert_snapshot!(text, @r#"
package io

// ReaderMock is a mock implementation of Reader.
// Reader reads bytes.
type ReaderMock struct {
	// ReadFunc mocks the Read method.
	ReadFunc  func([]byte) (int, error)
	// CloseFunc mocks the Close method.
	CloseFunc func()
}

func (m ReaderMock) Read(p []byte) (n int, err error) {
	if m.ReadFunc != nil {
		return m.ReadFunc(p)
	}
	panic("mock not available: Read")
}

func (m ReaderMock) Close() {
	if m.CloseFunc != nil {
		m.CloseFunc()
		return
	}
	panic("mock not available: Close")
}
"#);
}

#[test]
fn test_mock_passes_variadic_tail_as_slice() {
    let sink = Interface::new("Sink")
        .add_methods([Func::new("Write")
            .with_variadic(true)
            .add_params([Param::unnamed("string!"), Param::unnamed("any!")])
            .unwrap()])
        .unwrap();
    let mock = sink.implement_mock().unwrap();
    let module = single_file_module(Lang::Go, "example.com/io", "sink", [mock.into()]).unwrap();
    let text = render_text(&module, "example.com/io/sink.go");
    assert!(text.contains("\tWriteFunc func(string, []any)\n"), "{text}");
    assert!(text.contains("func (m SinkMock) Write(p0 string, p1 ...any) {\n"), "{text}");
    assert!(text.contains("\t\tm.WriteFunc(p0, p1)\n"), "{text}");
}

#[test]
fn test_importers_are_per_file() {
    let first = Struct::new("A").add_fields([Field::new("T", "b/foo.Thing")]).unwrap();
    let second = Struct::new("B")
        .add_fields([
            Field::new("T", "a/foo.Thing"),
            Field::new("U", "b/foo.Thing"),
        ])
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/m")
            .add_files([
                SrcFile::new("a").add_types([first]).unwrap(),
                SrcFile::new("b").add_types([second]).unwrap(),
            ])
            .unwrap()])
        .unwrap();
    let a = render_text(&module, "example.com/m/a.go");
    let b = render_text(&module, "example.com/m/b.go");
    assert!(a.contains("\t\"b/foo\"\n"));
    assert!(a.contains("T foo.Thing"));
    assert!(b.contains("\tfoo2 \"b/foo\"\n"));
    assert!(b.contains("U foo2.Thing"));
}

#[test]
fn test_int_enum() {
    let module =
        single_file_module(Lang::Go, "example.com/jobs", "status", [status_enum().into()])
            .unwrap();
    let text = render_text(&module, "example.com/jobs/status.go");
    insta::assert_snapshot!(text, @r#"
package jobs

import (
	"strconv"
)

// Status is the run state of a job.
type Status int

const (
	StatusUnknown Status = iota + 1
	StatusRunning
	StatusStopped
)

// StatusValues lists every Status in declaration order.
var StatusValues = []Status{StatusUnknown, StatusRunning, StatusStopped}

// String returns the label of s.
func (s Status) String() string {
	switch s {
	case StatusUnknown:
		return "unknown"
	case StatusRunning:
		return "running"
	case StatusStopped:
		return "stopped"
	default:
		return strconv.Itoa(int(s))
	}
}

// IsValid reports whether s is a declared Status.
func (s Status) IsValid() bool {
	return s >= StatusUnknown && s <= StatusStopped
}
"#);
}

#[test]
fn test_string_enum() {
    let color = Enum::new("Color", EnumBase::String).add_cases(["red", "green"]);
    let module = single_file_module(Lang::Go, "example.com/paint", "color", [color.into()])
        .unwrap();
    let text = render_text(&module, "example.com/paint/color.go");
    assert!(text.contains("const (\n\tColorRed   Color = \"red\"\n\tColorGreen Color = \"green\"\n)\n"));
    assert!(text.contains("func (c Color) String() string {\n\treturn string(c)\n}\n"));
    assert!(text.contains("\tcase ColorRed, ColorGreen:\n\t\treturn true\n"));
    assert!(!text.contains("import"));
}

#[test]
fn test_error_property_may_not_shadow_members() {
    let group = ErrorGroup::new("IOError")
        .add_cases([ErrorCase::new("Failed")
            .add_properties([Property::new("cause", TypeDecl::simple("string!"))])])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/io", "errors", [group.into()]).unwrap();
    let rendered = render(&module, &RenderConfig::default());
    let chain = format!("{:#}", rendered.error.expect("should fail"));
    assert!(chain.contains("case Failed"), "{chain}");
    assert!(chain.contains("'cause' clashes with the generated cause field"), "{chain}");
}

#[test]
fn test_error_group_lowering() {
    let module = single_file_module(
        Lang::Go,
        "example.com/tickets",
        "errors",
        [ticket_errors().unwrap().into()],
    )
    .unwrap();
    let text = render_text(&module, "example.com/tickets/errors.go");
    assert!(text.starts_with("package tickets\n\nimport (\n\t\"fmt\"\n)\n\n"));
    assert!(text.contains(
        "// TicketError enumerates failures of ticket operations.\n\
         type TicketError interface {\n\terror\n\tTicket() bool\n}\n"
    ));
    assert!(text.contains(
        "// TicketNotFoundError means no ticket has the given id.\n\
         type TicketNotFoundError interface {\n\tTicketError\n\tTicketNotFound() bool\n\tID() int64\n}\n"
    ));
    assert!(text.contains("type ticketNotFoundError struct {\n\tid    int64\n\tcause error\n}\n"));
    assert!(text.contains("func (e *ticketNotFoundError) Ticket() bool {\n\treturn true\n}\n"));
    assert!(text.contains("func (e *ticketNotFoundError) Unwrap() error {\n\treturn e.cause\n}\n"));
    assert!(text.contains(
        "func (e *ticketNotFoundError) Error() string {\n\treturn fmt.Sprintf(\"NotFound id=%v\", e.id)\n}\n"
    ));
    assert!(text.contains(
        "return fmt.Sprintf(\"Forbidden user=%v reason=%v\", e.user, e.reason)"
    ));
}

#[test]
fn test_error_make_and_check() {
    let group = ticket_errors().unwrap();
    let not_found = group.cases()[0].clone();
    let make = errors::make(&not_found, [Ident::new("id").into()]).unwrap();
    let find = Func::new("Find")
        .add_params([Param::new("id", "int64!")])
        .unwrap()
        .add_results([Param::unnamed("error!")])
        .unwrap()
        .with_body(Block::new().add(Return::new([make]).unwrap()).unwrap())
        .unwrap();

    let print = fmt::println([lang::call_ident("nf", "ID", []).into()]);
    let check = errors::check(
        &not_found,
        CheckKind::Exact,
        "err",
        "nf",
        Block::new().add(print).unwrap(),
    );
    let handle = Func::new("Handle")
        .add_params([Param::new("err", "error!")])
        .unwrap()
        .with_body(Block::new().add(check).unwrap())
        .unwrap();

    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/tickets")
            .add_files([SrcFile::new("errors")
                .add_types([group])
                .unwrap()
                .add_funcs([find, handle])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/tickets/errors.go");
    assert!(text.contains(
        "func Find(id int64) error {\n\treturn &ticketNotFoundError{id, nil}\n}\n"
    ));
    assert!(text.contains(
        "func Handle(err error) {\n\
         \tif nf, ok := err.(TicketNotFoundError); ok && nf.Ticket() && nf.TicketNotFound() {\n\
         \t\tfmt.Println(nf.ID())\n\
         \t}\n\
         }\n"
    ));
}

#[test]
fn test_sum_check_asserts_group() {
    let group = ticket_errors().unwrap();
    let case = group.cases()[1].clone();
    let check = errors::check(&case, CheckKind::Sum, "err", "te", Block::new());
    let handle = Func::new("Handle")
        .add_params([Param::new("err", "error!")])
        .unwrap()
        .with_body(Block::new().add(check).unwrap())
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/tickets")
            .add_files([SrcFile::new("errors")
                .add_types([group])
                .unwrap()
                .add_funcs([handle])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/tickets/errors.go");
    assert!(text.contains("\tif te, ok := err.(TicketError); ok && te.Ticket() {\n\t}\n"));
}

#[test]
fn test_try_define() {
    let parse = Func::new("Parse")
        .add_params([Param::new("s", "string!")])
        .unwrap()
        .add_results([Param::unnamed("int!"), Param::unnamed("error!")])
        .unwrap()
        .with_body(
            Block::new()
                .add(lang::try_define(
                    "n",
                    lang::call_static("strconv.Atoi", [Ident::new("s").into()]),
                    "parse",
                ))
                .unwrap()
                .add(Return::new([Node::from(Ident::new("n")), loom_ir::BasicLit::nil().into()]).unwrap())
                .unwrap(),
        )
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/conv")
            .add_files([SrcFile::new("parse").add_funcs([parse]).unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/conv/parse.go");
    insta::assert_snapshot!(text, @r#"
package conv

import (
	"fmt"
	"strconv"
)

func Parse(s string) (int, error) {
	n, err := strconv.Atoi(s)
	if err != nil {
		return 0, fmt.Errorf("parse: %w", err)
	}
	return n, nil
}
"#);
}

#[test]
fn test_try_define_zero_value_of_interface() {
    let open = Func::new("Open")
        .add_params([Param::new("path", "string!")])
        .unwrap()
        .add_results([Param::unnamed("io.Reader"), Param::unnamed("error!")])
        .unwrap()
        .with_body(
            Block::new()
                .add(lang::try_define(
                    "f",
                    lang::call_static("os.Open", [Ident::new("path").into()]),
                    "open",
                ))
                .unwrap()
                .add(Return::new([Node::from(Ident::new("f")), loom_ir::BasicLit::nil().into()]).unwrap())
                .unwrap(),
        )
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/files")
            .add_files([SrcFile::new("open").add_funcs([open]).unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/files/open.go");
    assert!(
        text.contains("\t\treturn *new(io.Reader), fmt.Errorf(\"open: %w\", err)\n"),
        "{text}"
    );
}

#[test]
fn test_first_macro_match_wins() {
    let mac = Macro::new("greet")
        .with_matcher(Target::lang(Lang::Go), |_| Ok(vec![Tpl::text("first()").into()]))
        .with_matcher(Target::lang(Lang::Go), |_| {
            Ok(vec![fmt::println([Ident::new("second").into()]).into()])
        });
    let run = Func::new("Run")
        .with_body(Block::new().add(mac).unwrap())
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/m")
            .add_files([SrcFile::new("run").add_funcs([run]).unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/m/run.go");
    assert_content_eq("package m\n\nfunc Run() {\n\tfirst()\n}\n", &text);
}

#[test]
fn test_macro_miss_is_soft() {
    let mac = Macro::new("java_only")
        .with_matcher(Target::lang(Lang::Java), |_| Ok(vec![Tpl::text("x();").into()]));
    let run = Func::new("Run")
        .with_body(Block::new().add(mac).unwrap())
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/m")
            .add_files([SrcFile::new("run").add_funcs([run]).unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "example.com/m/run.go");
    assert!(text.contains("\t// no macro match found: java_only\n"));
}

#[test]
fn test_partial_result_on_error() {
    let good = Package::new("example.com/good")
        .add_files([SrcFile::new("point")
            .add_types([Struct::new("Point")
                .add_fields([Field::new("X", "int!")])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let bad = Package::new("example.com/bad")
        .add_files([SrcFile::new("broken")
            .add_types([Struct::new("Broken")
                .add_fields([Field::new(
                    "V",
                    TypeDecl::bounded_param("T", TypeBound::Extends, TypeDecl::simple("int!")),
                )])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([good, bad])
        .unwrap();

    let rendered = render(&module, &RenderConfig::default());
    let err = rendered.error.as_ref().expect("render should fail");
    let chain = format!("{err:#}");
    assert!(chain.contains("package example.com/bad"), "{chain}");
    assert!(chain.contains("type Broken"), "{chain}");
    assert!(chain.contains("not supported by go"), "{chain}");

    let good = rendered.text("example.com/good/point.go").unwrap();
    assert!(good.contains("type Point struct {\n\tX int\n}\n"));
    let broken = rendered.file("example.com/bad/broken.go").unwrap();
    assert!(broken.error.is_some());
    assert!(broken.text().contains("type Broken struct {"));
}

#[test]
fn test_export_rule() {
    let s = Struct::new("point")
        .add_fields([Field::new("X", "int!")])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/m", "point", [s.into()]).unwrap();
    let rendered = render(&module, &RenderConfig::default());
    let chain = format!("{:#}", rendered.error.expect("should fail"));
    assert!(chain.contains("'point' is public but not an exported identifier"), "{chain}");

    let hidden = Struct::new("point")
        .with_visibility(Visibility::PackagePrivate)
        .add_fields([Field::new("x", "int!").with_visibility(Visibility::Private)])
        .unwrap();
    let module = single_file_module(Lang::Go, "example.com/m", "point", [hidden.into()]).unwrap();
    let text = render_text(&module, "example.com/m/point.go");
    assert!(text.contains("type point struct {\n\tx int\n}\n"));
}

#[test]
fn test_doc_file_and_banner() {
    let module = Module::new(Target::lang(Lang::Go))
        .add_packages([Package::new("example.com/geo")
            .with_doc("...works with points.")
            .add_files([SrcFile::new("point")
                .with_doc("Points and their arithmetic.")
                .add_types([Struct::new("Point")])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let config = RenderConfig::new().with_header("Code generated by loom. DO NOT EDIT.");
    let rendered = render(&module, &config);
    assert!(rendered.is_ok());

    let doc = rendered.text("example.com/geo/doc.go").unwrap();
    assert_content_eq(
        "// Code generated by loom. DO NOT EDIT.\n\n// Package geo works with points.\npackage geo\n",
        &doc,
    );
    let point = rendered.text("example.com/geo/point.go").unwrap();
    assert_content_eq(
        "// Code generated by loom. DO NOT EDIT.\n\npackage geo\n\n\
         // Points and their arithmetic.\n\ntype Point struct{}\n",
        &point,
    );
}

#[test]
fn test_written_to_disk() {
    let module = point_module(Lang::Go).unwrap();
    let rendered = render(&module, &RenderConfig::default());
    let dir = write_to_temp(&rendered).unwrap();
    let text = read_text(dir.path(), "example.com/m/main.go").unwrap();
    assert!(text.contains("func (p Point) Sum() int {"));
}
