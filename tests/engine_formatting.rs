//! End-to-end engine formatting through the public pipeline
//!
//! These cover the width-aware layout the engine applies when no grid is
//! involved: group breaking, numeric fill wrapping, comment placement and
//! option handling, all through `format_source` so the final-newline rule
//! is part of every expectation.

use gridfmt::gridfmt::options::{FormatOptions, TrailingComma};
use gridfmt::gridfmt::pipeline::format_source;

fn fmt(source: &str) -> String {
    format_source(source, &FormatOptions::default()).unwrap()
}

fn fmt_at(source: &str, print_width: usize) -> String {
    let options = FormatOptions {
        print_width,
        ..FormatOptions::default()
    };
    format_source(source, &options).unwrap()
}

#[test]
fn test_spacing_normalizes() {
    assert_eq!(fmt("[1,2,   3]"), "[1, 2, 3]\n");
    assert_eq!(fmt("f( 1 )"), "f(1)\n");
    assert_eq!(fmt("const   x=[ 1 ]"), "const x = [1]\n");
}

#[test]
fn test_output_ends_with_one_newline() {
    assert_eq!(fmt("[1]"), "[1]\n");
    assert_eq!(fmt("[1]\n"), "[1]\n");
}

#[test]
fn test_empty_and_blank_sources_stay_empty() {
    assert_eq!(fmt(""), "");
    assert_eq!(fmt("\n\n  \n"), "");
}

#[test]
fn test_array_breaks_at_print_width() {
    assert_eq!(fmt_at("[alpha, beta]", 80), "[alpha, beta]\n");
    assert_eq!(fmt_at("[alpha, beta]", 8), "[\n  alpha,\n  beta,\n]\n");
}

#[test]
fn test_numeric_array_wraps_like_prose() {
    assert_eq!(fmt_at("[1,2,3,4,5,6]", 13), "[\n  1, 2, 3, 4,\n  5, 6,\n]\n");
}

#[test]
fn test_indent_width_option() {
    let options = FormatOptions {
        print_width: 8,
        indent_width: 4,
        ..FormatOptions::default()
    };
    assert_eq!(
        format_source("[alpha, beta]", &options).unwrap(),
        "[\n    alpha,\n    beta,\n]\n"
    );
}

#[test]
fn test_es5_commas_split_arrays_from_calls() {
    let options = FormatOptions {
        print_width: 8,
        trailing_comma: TrailingComma::Es5,
        ..FormatOptions::default()
    };
    assert_eq!(
        format_source("[alpha, beta]", &options).unwrap(),
        "[\n  alpha,\n  beta,\n]\n"
    );
    assert_eq!(
        format_source("f(alpha, beta)", &options).unwrap(),
        "f(\n  alpha,\n  beta\n)\n"
    );
}

#[test]
fn test_width_is_measured_in_characters() {
    // 'é' is two bytes; byte counting would push this over the limit
    assert_eq!(fmt_at("['éé', 'aa']", 12), "['éé', 'aa']\n");
}

#[test]
fn test_statements_and_blank_regions() {
    assert_eq!(fmt("[1];[2]"), "[1]\n[2]\n");
    assert_eq!(fmt("[1]\n\n\n\n[2]"), "[1]\n\n[2]\n");
}

#[test]
fn test_document_with_comments_and_declarations() {
    let source = "// data set\nconst rows = [1, 2, 3]\n\nplot(rows) // draw";
    let expected = "// data set\nconst rows = [1, 2, 3]\n\nplot(rows) // draw\n";
    assert_eq!(fmt(source), expected);
}

#[test]
fn test_template_literal_lines_survive_reflow() {
    assert_eq!(fmt("f(`a\nb`)"), "f(`a\nb`)\n");
}

#[test]
fn test_member_calls_keep_their_shape() {
    assert_eq!(fmt("chart.axes?.scale<n>(1, [2])"), "chart.axes?.scale<n>(1, [2])\n");
}
