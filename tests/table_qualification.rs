//! Which nodes qualify for grid rendering
//!
//! Non-qualifying sources must come out byte-identical to the engine-only
//! pipeline; qualifying ones get the grid layout. Each case runs both
//! pipelines and compares.

use gridfmt::gridfmt::options::FormatOptions;
use gridfmt::gridfmt::pipeline::{format_source, Formatter};
use rstest::rstest;

fn standard(source: &str) -> String {
    format_source(source, &FormatOptions::default()).unwrap()
}

fn engine(source: &str) -> String {
    Formatter::engine_only()
        .format(source, &FormatOptions::default())
        .unwrap()
}

#[rstest]
#[case::single_row("// prettier-table\n[[1, 2]]")]
#[case::empty_array("// prettier-table\n[]")]
#[case::non_array_item("// prettier-table\n[[1], 2]")]
#[case::hole_item("// prettier-table\n[[1], , [2]]")]
#[case::scalar_node("// prettier-table\nx")]
#[case::blank_line_between("// prettier-table\n\n[[1], [2]]")]
#[case::block_comment_marker("/* prettier-table */\n[[1], [2]]")]
#[case::marker_not_a_whole_token("// prettier-tables\n[[1], [2]]")]
#[case::marker_on_the_node_line("[[1], [2]] // prettier-table")]
#[case::marker_two_lines_up("// prettier-table\n// filler\n[[1], [2]]")]
#[case::call_single_argument("// prettier-table\nf([1])")]
#[case::call_non_array_argument("// prettier-table\nf([1], 2)")]
#[case::call_no_arguments("// prettier-table\nf()")]
fn test_non_qualifying_sources_match_engine_output(#[case] source: &str) {
    assert_eq!(standard(source), engine(source));
}

#[rstest]
#[case::array(
    "// prettier-table\n[[1], [2]]",
    "// prettier-table\n[\n  [1],\n  [2],\n]\n"
)]
#[case::marker_among_other_words(
    "// keep prettier-table aligned\n[[1], [2]]",
    "// keep prettier-table aligned\n[\n  [1],\n  [2],\n]\n"
)]
#[case::marker_trailing_previous_statement(
    "[9] // prettier-table\n[[1], [2]]",
    "[9] // prettier-table\n[\n  [1],\n  [2],\n]\n"
)]
#[case::call(
    "// prettier-table\nf([1], [2])",
    "// prettier-table\nf(\n  [1],\n  [2],\n)\n"
)]
fn test_qualifying_sources_render_as_grids(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(standard(source), expected);
    assert_ne!(standard(source), engine(source));
}

#[test]
fn test_only_the_adjacent_node_is_marked() {
    // the sibling array right after the grid keeps the engine layout
    assert_eq!(
        standard("// prettier-table\n[[1], [2]]\n[[3], [4]]"),
        "// prettier-table\n[\n  [1],\n  [2],\n]\n[[3], [4]]\n"
    );
}

#[test]
fn test_marker_detection_is_case_sensitive() {
    let source = "// PRETTIER-TABLE\n[[1], [2]]";
    assert_eq!(standard(source), engine(source));
}
