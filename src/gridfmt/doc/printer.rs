//! Width-aware serialization of a layout document to text
//!
//! The serializer walks a command stack of `(indent, mode, doc)` frames.
//! Groups encountered in break mode measure their contents against the
//! remaining width and render flat when they fit; a pre-pass propagates
//! forced breaks (hard lines, `BreakParent`) up to every enclosing group
//! so those never even attempt a flat layout. Conditional groups keep
//! their alternatives to themselves and block that propagation.

use super::builders::{Doc, LineMode};
use crate::gridfmt::options::FormatOptions;

/// Width used to serialize content that must never wrap. Large enough that
/// no realistic line reaches it, small enough to keep width arithmetic in
/// range.
pub const UNBOUNDED_WIDTH: usize = u32::MAX as usize;

/// Serialized output plus the positions recorded by cursor documents
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintedDoc {
    pub formatted: String,
    /// Byte offsets into `formatted`, one per cursor, in serialization order
    pub cursor: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Break,
    Flat,
}

#[derive(Debug, Clone)]
struct Command {
    indent: usize,
    mode: Mode,
    doc: Doc,
}

/// Serialize a document, breaking lines to stay within `width` where the
/// document allows it
pub fn print_doc(doc: Doc, options: &FormatOptions, width: usize) -> PrintedDoc {
    let (doc, _) = propagate_breaks(doc);

    let mut out = String::new();
    let mut cursors: Vec<usize> = Vec::new();
    let mut pos: usize = 0;
    let mut cmds: Vec<Command> = vec![Command {
        indent: 0,
        mode: Mode::Break,
        doc,
    }];
    let mut line_suffixes: Vec<Command> = Vec::new();

    loop {
        let Some(Command { indent, mode, doc }) = cmds.pop() else {
            if line_suffixes.is_empty() {
                break;
            }
            // Pending suffixes at the end of output still get printed
            cmds.extend(line_suffixes.drain(..).rev());
            continue;
        };

        match doc {
            Doc::Text(text) => {
                pos += text.chars().count();
                out.push_str(&text);
            }
            Doc::Concat(items) => {
                for item in items.into_iter().rev() {
                    cmds.push(Command {
                        indent,
                        mode,
                        doc: item,
                    });
                }
            }
            Doc::Indent(inner) => cmds.push(Command {
                indent: indent + options.indent_width,
                mode,
                doc: *inner,
            }),
            Doc::Align(columns, inner) => cmds.push(Command {
                indent: indent + columns,
                mode,
                doc: *inner,
            }),
            Doc::Label(_, inner) => cmds.push(Command {
                indent,
                mode,
                doc: *inner,
            }),
            Doc::Cursor => cursors.push(out.len()),
            Doc::BreakParent => {}
            Doc::LineSuffix(inner) => line_suffixes.push(Command {
                indent,
                mode,
                doc: *inner,
            }),
            Doc::IfBreak {
                break_contents,
                flat_contents,
            } => {
                let chosen = match mode {
                    Mode::Break => *break_contents,
                    Mode::Flat => *flat_contents,
                };
                cmds.push(Command {
                    indent,
                    mode,
                    doc: chosen,
                });
            }
            Doc::Group {
                contents,
                should_break,
                expanded_states,
            } => match mode {
                Mode::Flat => {
                    // Inside an already fitting region nothing is measured
                    cmds.push(Command {
                        indent,
                        mode: if should_break { Mode::Break } else { Mode::Flat },
                        doc: *contents,
                    });
                }
                Mode::Break => {
                    if expanded_states.is_empty() {
                        let probe = Command {
                            indent,
                            mode: Mode::Flat,
                            doc: *contents,
                        };
                        if !should_break && fits(&probe, &cmds, width.saturating_sub(pos), false) {
                            cmds.push(probe);
                        } else {
                            cmds.push(Command {
                                mode: Mode::Break,
                                ..probe
                            });
                        }
                    } else if should_break {
                        let mut states = expanded_states;
                        if let Some(most_expanded) = states.pop() {
                            cmds.push(Command {
                                indent,
                                mode: Mode::Break,
                                doc: most_expanded,
                            });
                        }
                    } else {
                        // Try each alternative flat; the last one renders
                        // broken when none fit
                        let count = expanded_states.len();
                        let mut chosen = None;
                        for (i, state) in expanded_states.into_iter().enumerate() {
                            let probe = Command {
                                indent,
                                mode: Mode::Flat,
                                doc: state,
                            };
                            if fits(&probe, &cmds, width.saturating_sub(pos), false) {
                                chosen = Some(probe);
                                break;
                            }
                            if i + 1 == count {
                                chosen = Some(Command {
                                    mode: Mode::Break,
                                    ..probe
                                });
                            }
                        }
                        if let Some(command) = chosen {
                            cmds.push(command);
                        }
                    }
                }
            },
            Doc::Fill(parts) => {
                // Fill alternates content and separator parts. Each separator
                // breaks individually, depending on whether the content on
                // both of its sides fits on the current line.
                let remaining = width.saturating_sub(pos);
                let mut iter = parts.into_iter();
                let Some(content) = iter.next() else {
                    continue;
                };
                let content_flat = Command {
                    indent,
                    mode: Mode::Flat,
                    doc: content,
                };
                let content_fits = fits(&content_flat, &[], remaining, true);

                let Some(separator) = iter.next() else {
                    if content_fits {
                        cmds.push(content_flat);
                    } else {
                        cmds.push(Command {
                            mode: Mode::Break,
                            ..content_flat
                        });
                    }
                    continue;
                };

                let rest: Vec<Doc> = iter.collect();
                if rest.is_empty() {
                    if content_fits {
                        cmds.push(Command {
                            indent,
                            mode: Mode::Flat,
                            doc: separator,
                        });
                        cmds.push(content_flat);
                    } else {
                        cmds.push(Command {
                            indent,
                            mode: Mode::Break,
                            doc: separator,
                        });
                        cmds.push(Command {
                            mode: Mode::Break,
                            ..content_flat
                        });
                    }
                    continue;
                }

                let pair = Doc::Concat(vec![
                    content_flat.doc.clone(),
                    separator.clone(),
                    rest[0].clone(),
                ]);
                let pair_flat = Command {
                    indent,
                    mode: Mode::Flat,
                    doc: pair,
                };
                let pair_fits = fits(&pair_flat, &[], remaining, true);

                let remainder = Command {
                    indent,
                    mode,
                    doc: Doc::Fill(rest),
                };
                if pair_fits {
                    cmds.push(remainder);
                    cmds.push(Command {
                        indent,
                        mode: Mode::Flat,
                        doc: separator,
                    });
                    cmds.push(content_flat);
                } else if content_fits {
                    cmds.push(remainder);
                    cmds.push(Command {
                        indent,
                        mode: Mode::Break,
                        doc: separator,
                    });
                    cmds.push(content_flat);
                } else {
                    cmds.push(remainder);
                    cmds.push(Command {
                        indent,
                        mode: Mode::Break,
                        doc: separator,
                    });
                    cmds.push(Command {
                        mode: Mode::Break,
                        ..content_flat
                    });
                }
            }
            Doc::Line(line_mode) => {
                let forced = matches!(line_mode, LineMode::Hard | LineMode::Literal);
                if mode == Mode::Flat && !forced {
                    if line_mode == LineMode::Space {
                        out.push(' ');
                        pos += 1;
                    }
                    continue;
                }

                // Suffixes print before the break that flushed them
                if !line_suffixes.is_empty() {
                    cmds.push(Command {
                        indent,
                        mode,
                        doc: Doc::Line(line_mode),
                    });
                    cmds.extend(line_suffixes.drain(..).rev());
                    continue;
                }

                if line_mode == LineMode::Literal {
                    out.push('\n');
                    pos = 0;
                } else {
                    trim_trailing_spaces(&mut out);
                    out.push('\n');
                    for _ in 0..indent {
                        out.push(' ');
                    }
                    pos = indent;
                }
            }
        }
    }

    PrintedDoc {
        formatted: out,
        cursor: cursors,
    }
}

/// Mark groups containing forced breaks so they never try a flat layout.
/// Returns the rewritten document and whether it forces its parent to break.
/// Conditional groups keep forced breaks to themselves.
fn propagate_breaks(doc: Doc) -> (Doc, bool) {
    match doc {
        Doc::BreakParent => (Doc::BreakParent, true),
        Doc::Line(mode @ (LineMode::Hard | LineMode::Literal)) => (Doc::Line(mode), true),
        Doc::Line(mode) => (Doc::Line(mode), false),
        Doc::Text(_) | Doc::Cursor => (doc, false),
        Doc::Concat(items) => {
            let mut any = false;
            let items = items
                .into_iter()
                .map(|item| {
                    let (item, breaks) = propagate_breaks(item);
                    any |= breaks;
                    item
                })
                .collect();
            (Doc::Concat(items), any)
        }
        Doc::Fill(parts) => {
            let mut any = false;
            let parts = parts
                .into_iter()
                .map(|part| {
                    let (part, breaks) = propagate_breaks(part);
                    any |= breaks;
                    part
                })
                .collect();
            (Doc::Fill(parts), any)
        }
        Doc::Indent(inner) => {
            let (inner, breaks) = propagate_breaks(*inner);
            (Doc::Indent(Box::new(inner)), breaks)
        }
        Doc::Align(columns, inner) => {
            let (inner, breaks) = propagate_breaks(*inner);
            (Doc::Align(columns, Box::new(inner)), breaks)
        }
        Doc::Label(name, inner) => {
            let (inner, breaks) = propagate_breaks(*inner);
            (Doc::Label(name, Box::new(inner)), breaks)
        }
        Doc::LineSuffix(inner) => {
            let (inner, breaks) = propagate_breaks(*inner);
            (Doc::LineSuffix(Box::new(inner)), breaks)
        }
        Doc::IfBreak {
            break_contents,
            flat_contents,
        } => {
            let (break_contents, break_breaks) = propagate_breaks(*break_contents);
            let (flat_contents, flat_breaks) = propagate_breaks(*flat_contents);
            (
                Doc::IfBreak {
                    break_contents: Box::new(break_contents),
                    flat_contents: Box::new(flat_contents),
                },
                break_breaks || flat_breaks,
            )
        }
        Doc::Group {
            contents,
            should_break,
            expanded_states,
        } => {
            let (contents, contents_break) = propagate_breaks(*contents);
            if expanded_states.is_empty() {
                let should_break = should_break || contents_break;
                (
                    Doc::Group {
                        contents: Box::new(contents),
                        should_break,
                        expanded_states: Vec::new(),
                    },
                    should_break,
                )
            } else {
                let expanded_states = expanded_states
                    .into_iter()
                    .map(|state| propagate_breaks(state).0)
                    .collect();
                (
                    Doc::Group {
                        contents: Box::new(contents),
                        should_break,
                        expanded_states,
                    },
                    should_break,
                )
            }
        }
    }
}

/// Whether `next` (and whatever already follows it on the stack) fits on
/// the current line. Hard breaks end the line, so anything up to one fits.
fn fits(next: &Command, rest: &[Command], width: usize, must_be_flat: bool) -> bool {
    let mut remaining = width as i64;
    let mut stack: Vec<(Mode, &Doc)> = vec![(next.mode, &next.doc)];
    let mut rest_idx = rest.len();

    while remaining >= 0 {
        let (mode, doc) = match stack.pop() {
            Some(frame) => frame,
            None => {
                if rest_idx == 0 {
                    return true;
                }
                rest_idx -= 1;
                let command = &rest[rest_idx];
                (command.mode, &command.doc)
            }
        };

        match doc {
            Doc::Text(text) => remaining -= text.chars().count() as i64,
            Doc::Concat(items) => {
                for item in items.iter().rev() {
                    stack.push((mode, item));
                }
            }
            Doc::Fill(parts) => {
                for part in parts.iter().rev() {
                    stack.push((mode, part));
                }
            }
            Doc::Indent(inner) => stack.push((mode, inner)),
            Doc::Align(_, inner) => stack.push((mode, inner)),
            Doc::Label(_, inner) => stack.push((mode, inner)),
            Doc::LineSuffix(_) => {}
            Doc::BreakParent => {}
            Doc::Cursor => {}
            Doc::IfBreak {
                break_contents,
                flat_contents,
            } => {
                let chosen = match mode {
                    Mode::Break => break_contents.as_ref(),
                    Mode::Flat => flat_contents.as_ref(),
                };
                stack.push((mode, chosen));
            }
            Doc::Group {
                contents,
                should_break,
                expanded_states,
            } => {
                if must_be_flat && *should_break {
                    return false;
                }
                let group_mode = if *should_break { Mode::Break } else { mode };
                let inner = match expanded_states.last() {
                    Some(state) if group_mode == Mode::Break => state,
                    _ => contents.as_ref(),
                };
                stack.push((group_mode, inner));
            }
            Doc::Line(line_mode) => {
                if mode == Mode::Break {
                    return true;
                }
                match line_mode {
                    LineMode::Hard | LineMode::Literal => return true,
                    LineMode::Space => remaining -= 1,
                    LineMode::Soft => {}
                }
            }
        }
    }

    false
}

/// Strip spaces and tabs from the end of the buffer; a newline stops the
/// scan, so only the current line is affected
fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches([' ', '\t']).len();
    out.truncate(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridfmt::doc::builders::*;

    fn print(doc: Doc, width: usize) -> String {
        print_doc(doc, &FormatOptions::default(), width).formatted
    }

    fn bracketed_pair() -> Doc {
        group(concat(vec![
            text("["),
            indent(concat(vec![
                softline(),
                text("1"),
                text(","),
                line(),
                text("2"),
            ])),
            softline(),
            text("]"),
        ]))
    }

    #[test]
    fn test_group_fits_flat() {
        assert_eq!(print(bracketed_pair(), 80), "[1, 2]");
    }

    #[test]
    fn test_group_breaks_when_too_wide() {
        assert_eq!(print(bracketed_pair(), 3), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_hardline_forces_enclosing_group_to_break() {
        let doc = group(concat(vec![
            text("a"),
            indent(concat(vec![hardline(), text("b")])),
        ]));
        assert_eq!(print(doc, 80), "a\n  b");
    }

    #[test]
    fn test_if_break_follows_group_mode() {
        let make = || {
            group(concat(vec![
                text("x"),
                line(),
                text("y"),
                if_break(text("!"), text("?")),
            ]))
        };
        assert_eq!(print(make(), 80), "x y?");
        assert_eq!(print(make(), 2), "x\ny!");
    }

    #[test]
    fn test_nested_indent_accumulates() {
        let doc = concat(vec![
            text("a"),
            indent(concat(vec![
                hardline(),
                text("b"),
                indent(concat(vec![hardline(), text("c")])),
            ])),
        ]);
        assert_eq!(print(doc, 80), "a\n  b\n    c");
    }

    #[test]
    fn test_align_adds_columns() {
        let doc = concat(vec![
            text("a"),
            align(3, concat(vec![hardline(), text("b")])),
        ]);
        assert_eq!(print(doc, 80), "a\n   b");
    }

    #[test]
    fn test_fill_breaks_separators_individually() {
        let make = || {
            fill(vec![
                text("aaa"),
                line(),
                text("bbb"),
                line(),
                text("ccc"),
            ])
        };
        assert_eq!(print(make(), 80), "aaa bbb ccc");
        assert_eq!(print(make(), 8), "aaa bbb\nccc");
    }

    #[test]
    fn test_line_suffix_flushes_before_newline() {
        let doc = concat(vec![
            text("a"),
            line_suffix(text(" // x")),
            hardline(),
            text("b"),
        ]);
        assert_eq!(print(doc, 80), "a // x\nb");
    }

    #[test]
    fn test_line_suffix_flushes_at_end_of_output() {
        let doc = concat(vec![text("a"), line_suffix(text(" // x"))]);
        assert_eq!(print(doc, 80), "a // x");
    }

    #[test]
    fn test_literal_line_resets_to_column_zero() {
        let doc = concat(vec![
            text("start"),
            indent(concat(vec![
                hardline(),
                text("in"),
                literal_line(),
                text("raw"),
            ])),
        ]);
        assert_eq!(print(doc, 80), "start\n  in\nraw");
    }

    #[test]
    fn test_trailing_spaces_trimmed_at_breaks() {
        let doc = concat(vec![text("a"), text("   "), hardline(), text("b")]);
        assert_eq!(print(doc, 80), "a\nb");
    }

    #[test]
    fn test_literal_line_keeps_trailing_spaces() {
        let doc = concat(vec![text("a  "), literal_line(), text("b")]);
        assert_eq!(print(doc, 80), "a  \nb");
    }

    #[test]
    fn test_cursor_records_positions() {
        let doc = concat(vec![text("ab"), cursor(), text("cd"), cursor()]);
        let printed = print_doc(doc, &FormatOptions::default(), 80);
        assert_eq!(printed.formatted, "abcd");
        assert_eq!(printed.cursor, vec![2, 4]);
    }

    #[test]
    fn test_unbounded_width_never_breaks_groups() {
        let items: Vec<Doc> = (0..200)
            .map(|i| {
                if i % 2 == 0 {
                    text("xxxxxxxxxx")
                } else {
                    line()
                }
            })
            .collect();
        let doc = group(concat(items));
        let out = print(doc, UNBOUNDED_WIDTH);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_conditional_group_picks_first_fitting_state() {
        let doc = conditional_group(vec![text("much-too-long-for-this"), text("short")]);
        assert_eq!(print(doc, 10), "short");
    }

    #[test]
    fn test_conditional_group_last_state_breaks() {
        let last = concat(vec![text("a"), line(), text("b")]);
        let doc = conditional_group(vec![text("much-too-long-for-this"), last]);
        // no state fits flat in 2 columns; the last renders broken
        assert_eq!(print(doc, 2), "a\nb");
    }

    #[test]
    fn test_conditional_group_blocks_break_propagation() {
        // the hard break inside the alternative must not force the outer
        // group to break
        let doc = group(concat(vec![
            text("a"),
            line(),
            conditional_group(vec![text("b"), concat(vec![hardline(), text("b")])]),
        ]));
        assert_eq!(print(doc, 80), "a b");
    }

    #[test]
    fn test_group_in_flat_region_stays_flat() {
        let doc = group(concat(vec![
            text("a"),
            line(),
            group(concat(vec![text("b"), line(), text("c")])),
        ]));
        assert_eq!(print(doc, 80), "a b c");
    }
}
