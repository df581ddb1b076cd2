//! End-to-end rendering tests for the Java backend.
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
use loom_codegen_java::render;
use loom_ir::{
    Annotation, Block, Enum, EnumBase, Field, Func, Ident, Interface, Lang, Macro, Module, Package,
    Param, Return, SrcFile, Struct, Target, Tpl, Visibility,
};

fn render_text(module: &Module, path: &str) -> String {
    init_tracing();
    let rendered = render(module, &RenderConfig::default());
    if let Some(err) = &rendered.error {
        panic!("render failed: {err:#}");
    }
    rendered.text(path).expect("file not rendered")
}

fn funcs_module(import_path: &str, file: SrcFile) -> Module {
    Module::new(Target::lang(Lang::Java))
        .add_packages([Package::new(import_path).add_files([file]).unwrap()])
        .unwrap()
}

#[test]
fn test_point_end_to_end() {
    let module = point_module(Lang::Java).unwrap();
    let text = render_text(&module, "example.com/m/Main.java");
    insta::assert_snapshot!(text, @r#"
package example.com.m;

/**
 * Point is a location in the plane.
 */
public class Point {
    public int X;
    public int Y;

    public int Sum() {
        return this.X + this.Y;
    }
}
"#);
}

#[test]
fn test_class_imports_and_collisions() {
    let s = Struct::new("Pair")
        .add_fields([
            Field::new("left", "a.foo.Thing"),
            Field::new("right", "b.foo.Thing"),
            Field::new("id", "uuid!"),
            Field::new("name", "string!").with_visibility(Visibility::Private),
        ])
        .unwrap();
    let module = single_file_module(Lang::Java, "com/example/app", "pair", [s.into()]).unwrap();
    let text = render_text(&module, "com/example/app/Pair.java");
    insta::assert_snapshot!(text, @r#"
package com.example.app;

import a.foo.Thing;
import java.util.UUID;

public class Pair {
    public Thing left;
    public b.foo.Thing right;
    public UUID id;
    private String name;
}
"#);
}

#[test]
fn test_nested_types_and_interfaces() {
    let shape = Interface::new("Shape")
        .add_methods([Func::new("area")
            .add_results([Param::unnamed("float64!")])
            .unwrap()])
        .unwrap();
    let kind = Enum::new("Kind", EnumBase::String).add_cases(["round"]);
    let circle = Struct::new("Circle")
        .with_final(true)
        .implements("com.example.shapes.Shape")
        .add_annotations([Annotation::new("java.lang.Deprecated")])
        .add_fields([Field::new("radius", "float64!").with_visibility(Visibility::Private)])
        .unwrap()
        .add_types([kind])
        .unwrap();
    let module = single_file_module(
        Lang::Java,
        "com/example/shapes",
        "shapes",
        [shape.into(), circle.into()],
    )
    .unwrap();
    let text = render_text(&module, "com/example/shapes/Shapes.java");
    assert!(text.contains("public interface Shape {\n    double area();\n}\n"));
    assert!(text.contains(
        "@Deprecated\npublic final class Circle implements Shape {\n    private double radius;\n\n    public enum Kind {\n        ROUND(\"round\");\n"
    ));
    assert!(!text.contains("import"));
}

#[test]
fn test_int_enum() {
    let module =
        single_file_module(Lang::Java, "com/example/jobs", "status", [status_enum().into()])
            .unwrap();
    let text = render_text(&module, "com/example/jobs/Status.java");
    insta::assert_snapshot!(text, @r#"
package com.example.jobs;

/**
 * Status is the run state of a job.
 */
public enum Status {
    UNKNOWN(1, "unknown"),
    RUNNING(2, "running"),
    STOPPED(3, "stopped");

    private final int value;
    private final String label;

    Status(int value, String label) {
        this.value = value;
        this.label = label;
    }

    public int value() {
        return value;
    }

    @Override
    public String toString() {
        return label;
    }

    /** Reports whether {@code value} is the value of a constant. */
    public static boolean isValid(int value) {
        return value >= 1 && value <= 3;
    }

    /** The constant with the given value, or {@code null}. */
    public static Status of(int value) {
        for (Status c : values()) {
            if (c.value == value) {
                return c;
            }
        }
        return null;
    }
}
"#);
}

#[test]
fn test_string_enum() {
    let color = Enum::new("Color", EnumBase::String).add_cases(["red", "green"]);
    let module =
        single_file_module(Lang::Java, "com/example/paint", "color", [color.into()]).unwrap();
    let text = render_text(&module, "com/example/paint/Color.java");
    assert!(text.contains("    RED(\"red\"),\n    GREEN(\"green\");\n"));
    assert!(text.contains("    public static boolean isValid(String value) {\n        return parse(value) != null;\n    }\n"));
    assert!(text.contains("            if (c.value.equals(value)) {\n"));
}

#[test]
fn test_error_group_lowering() {
    let module = single_file_module(
        Lang::Java,
        "com/example/tickets",
        "ticket_error",
        [ticket_errors().unwrap().into()],
    )
    .unwrap();
    let text = render_text(&module, "com/example/tickets/TicketError.java");
    assert!(text.contains(
        "/**\n * TicketError enumerates failures of ticket operations.\n */\n\
         public abstract class TicketError extends Exception {\n\
         \x20   protected TicketError(Throwable cause) {\n\
         \x20       super(cause);\n\
         \x20   }\n"
    ));
    assert!(text.contains(
        "    /**\n     * NotFound means no ticket has the given id.\n     */\n\
         \x20   public static final class NotFound extends TicketError {\n\
         \x20       private final long id;\n\n\
         \x20       public NotFound(long id) {\n\
         \x20           this(id, null);\n\
         \x20       }\n\n\
         \x20       public NotFound(long id, Throwable cause) {\n\
         \x20           super(cause);\n\
         \x20           this.id = id;\n\
         \x20       }\n\n\
         \x20       public long getID() {\n\
         \x20           return id;\n\
         \x20       }\n"
    ));
    assert!(text.contains("return String.format(\"NotFound id=%s\", id);"));
    assert!(text.contains("return String.format(\"Forbidden user=%s reason=%s\", user, reason);"));
}

#[test]
fn test_error_make_and_check() {
    let group = ticket_errors().unwrap();
    let not_found = group.cases()[0].clone();
    let make = errors::make(&not_found, [Ident::new("id").into()]).unwrap();
    let find = Func::new("find")
        .add_params([Param::new("id", "int64!")])
        .unwrap()
        .add_results([Param::unnamed("com.example.tickets.TicketError")])
        .unwrap()
        .with_body(Block::new().add(Return::new([make]).unwrap()).unwrap())
        .unwrap();

    let print = fmt::println([lang::call_ident("nf", "getID", []).into()]);
    let check = errors::check(
        &not_found,
        CheckKind::Exact,
        "err",
        "nf",
        Block::new().add(print).unwrap(),
    );
    let handle = Func::new("handle")
        .add_params([Param::new("err", "error!")])
        .unwrap()
        .with_body(Block::new().add(check).unwrap())
        .unwrap();

    let module = Module::new(Target::lang(Lang::Java))
        .add_packages([Package::new("com/example/tickets")
            .add_files([SrcFile::new("tickets")
                .add_types([group])
                .unwrap()
                .add_funcs([find, handle])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "com/example/tickets/Tickets.java");
    assert!(text.contains(
        "public final class Tickets {\n    private Tickets() {\n    }\n\n\
         \x20   public static TicketError find(long id) {\n\
         \x20       return new TicketError.NotFound(id);\n\
         \x20   }\n"
    ));
    assert!(text.contains(
        "    public static void handle(Exception err) {\n\
         \x20       if (err instanceof TicketError && err instanceof TicketError.NotFound) {\n\
         \x20           TicketError.NotFound nf = (TicketError.NotFound) err;\n\
         \x20           System.out.println(nf.getID());\n\
         \x20       }\n\
         \x20   }\n"
    ));
}

#[test]
fn test_sum_check_casts_to_group() {
    let group = ticket_errors().unwrap();
    let case = group.cases()[1].clone();
    let check = errors::check(&case, CheckKind::Sum, "err", "te", Block::new());
    let handle = Func::new("handle")
        .add_params([Param::new("err", "error!")])
        .unwrap()
        .with_body(Block::new().add(check).unwrap())
        .unwrap();
    let module = Module::new(Target::lang(Lang::Java))
        .add_packages([Package::new("com/example/tickets")
            .add_files([SrcFile::new("tickets")
                .add_types([group])
                .unwrap()
                .add_funcs([handle])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let text = render_text(&module, "com/example/tickets/Tickets.java");
    assert!(text.contains(
        "        if (err instanceof TicketError) {\n\
         \x20           TicketError te = (TicketError) err;\n\
         \x20       }\n"
    ));
}

#[test]
fn test_try_define() {
    let parse = Func::new("parse")
        .add_params([Param::new("s", "string!")])
        .unwrap()
        .add_results([Param::unnamed("int!"), Param::unnamed("error!")])
        .unwrap()
        .with_body(
            Block::new()
                .add(lang::try_define(
                    "n",
                    lang::call_static("java.lang.Integer.parseInt", [Ident::new("s").into()]),
                    "parse",
                ))
                .unwrap()
                .add(Return::new([Ident::new("n")]).unwrap())
                .unwrap(),
        )
        .unwrap();
    let module = funcs_module(
        "com/example/conv",
        SrcFile::new("conv").add_funcs([parse]).unwrap(),
    );
    let text = render_text(&module, "com/example/conv/Conv.java");
    insta::assert_snapshot!(text, @r#"
package com.example.conv;

public final class Conv {
    private Conv() {
    }

    public static int parse(String s) throws Exception {
        var n = Integer.parseInt(s);
        return n;
    }
}
"#);
}

#[test]
fn test_first_macro_match_wins() {
    let mac = Macro::new("greet")
        .with_matcher(Target::lang(Lang::Java), |_| Ok(vec![Tpl::text("first();").into()]))
        .with_matcher(Target::lang(Lang::Java), |_| {
            Ok(vec![fmt::println([Ident::new("second").into()]).into()])
        });
    let run = Func::new("run")
        .with_body(Block::new().add(mac).unwrap())
        .unwrap();
    let module = funcs_module("com/example/app", SrcFile::new("app").add_funcs([run]).unwrap());
    let text = render_text(&module, "com/example/app/App.java");
    assert_content_eq(
        "package com.example.app;\n\n\
         public final class App {\n    private App() {\n    }\n\n\
         \x20   public static void run() {\n        first();\n    }\n}\n",
        &text,
    );
}

#[test]
fn test_macro_miss_is_soft() {
    let mac = Macro::new("go_only")
        .with_matcher(Target::lang(Lang::Go), |_| Ok(vec![Tpl::text("x()").into()]));
    let run = Func::new("run")
        .with_body(Block::new().add(mac).unwrap())
        .unwrap();
    let module = funcs_module("com/example/app", SrcFile::new("app").add_funcs([run]).unwrap());
    let text = render_text(&module, "com/example/app/App.java");
    assert!(text.contains("        // no macro match found: go_only\n"));
}

#[test]
fn test_partial_result_on_error() {
    let good = Package::new("com/example/good")
        .add_files([SrcFile::new("point")
            .add_types([Struct::new("Point")
                .add_fields([Field::new("x", "int!")])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let split = Func::new("split")
        .add_results([Param::unnamed("int!"), Param::unnamed("int!")])
        .unwrap();
    let bad = Package::new("com/example/bad")
        .add_files([SrcFile::new("pair")
            .add_types([Struct::new("Pair").add_methods([split]).unwrap()])
            .unwrap()])
        .unwrap();
    let module = Module::new(Target::lang(Lang::Java))
        .add_packages([good, bad])
        .unwrap();

    let rendered = render(&module, &RenderConfig::default());
    let err = rendered.error.as_ref().expect("render should fail");
    let chain = format!("{err:#}");
    assert!(chain.contains("package com/example/bad"), "{chain}");
    assert!(chain.contains("method split"), "{chain}");
    assert!(chain.contains("java supports at most one"), "{chain}");

    let good = rendered.text("com/example/good/Point.java").unwrap();
    assert!(good.contains("public class Point {\n    public int x;\n}\n"));
    let broken = rendered.file("com/example/bad/Pair.java").unwrap();
    assert!(broken.error.is_some());
    assert!(broken.text().contains("public class Pair {"));
}

#[test]
fn test_package_info_and_banner() {
    let module = Module::new(Target::lang(Lang::Java))
        .add_packages([Package::new("com/example/geo")
            .with_doc("Geometry primitives.")
            .add_files([SrcFile::new("point")
                .with_doc("Points only.")
                .add_types([Struct::new("Point")])
                .unwrap()])
            .unwrap()])
        .unwrap();
    let config = RenderConfig::default().with_header("Code generated by loom. DO NOT EDIT.");
    let rendered = render(&module, &config);
    assert!(rendered.is_ok());

    let info = rendered.text("com/example/geo/package-info.java").unwrap();
    assert_content_eq(
        "// Code generated by loom. DO NOT EDIT.\n\n\
         /**\n * Geometry primitives.\n */\n\
         package com.example.geo;\n",
        &info,
    );
    let point = rendered.text("com/example/geo/Point.java").unwrap();
    assert_content_eq(
        "// Code generated by loom. DO NOT EDIT.\n\n\
         package com.example.geo;\n\n\
         // Points only.\n\n\
         public class Point {}\n",
        &point,
    );
}

#[test]
fn test_written_to_disk() {
    let module = point_module(Lang::Java).unwrap();
    let rendered = render(&module, &RenderConfig::default());
    let dir = write_to_temp(&rendered).unwrap();
    let text = read_text(dir.path(), "example.com/m/Main.java").unwrap();
    assert!(text.starts_with("package example.com.m;\n"));
}
