//! Unit tests for cursor block geometry and the paragraph mirror

use termprompt::ui::cursor::{cursor_geometry, html_mirror};
use termprompt::ui::{CharMetrics, CursorRect, Selection};

fn metrics() -> CharMetrics {
    CharMetrics {
        char_width: 10.0,
        row_height: 22.0,
    }
}

#[test]
fn test_caret_on_first_line() {
    // 80 characters per line
    let rect = cursor_geometry(10, Some(Selection::caret(4)), 800.0, metrics(), 1.0);
    assert_eq!(
        rect,
        CursorRect {
            width: 10.0,
            left: 40.0,
            top: 0.0
        }
    );
    assert_eq!(rect.css(), "width: 10px; left: 40px; top: 0px");
}

#[test]
fn test_caret_wraps_to_second_row() {
    // 30 characters per line: offset 35 is column 5 of row 1
    let rect = cursor_geometry(40, Some(Selection::caret(35)), 300.0, metrics(), 1.0);
    assert_eq!(rect.left, 50.0);
    assert_eq!(rect.top, 22.0);
}

#[test]
fn test_selection_width_clamped_to_line() {
    let rect = cursor_geometry(100, Some(Selection::new(0, 100)), 300.0, metrics(), 1.0);
    assert_eq!(rect.width, 300.0);

    let rect = cursor_geometry(100, Some(Selection::new(2, 5)), 300.0, metrics(), 1.0);
    assert_eq!(rect.width, 30.0);
    assert_eq!(rect.left, 20.0);
}

#[test]
fn test_no_selection_covers_last_character() {
    let rect = cursor_geometry(5, None, 800.0, metrics(), 1.0);
    assert_eq!(rect.left, 40.0);
    assert_eq!(rect.width, 10.0);

    // Empty text keeps a one-character block at the origin
    let rect = cursor_geometry(0, None, 800.0, metrics(), 1.0);
    assert_eq!(rect.left, 0.0);
    assert_eq!(rect.width, 10.0);
}

#[test]
fn test_zoom_scales_metrics() {
    // 20px characters, 40 per line
    let rect = cursor_geometry(10, Some(Selection::caret(3)), 800.0, metrics(), 2.0);
    assert_eq!(rect.width, 20.0);
    assert_eq!(rect.left, 60.0);

    let rect = cursor_geometry(100, Some(Selection::caret(45)), 800.0, metrics(), 2.0);
    assert_eq!(rect.top, 44.0);
}

#[test]
fn test_invalid_zoom_falls_back() {
    let normal = cursor_geometry(10, Some(Selection::caret(3)), 800.0, metrics(), 1.0);
    assert_eq!(cursor_geometry(10, Some(Selection::caret(3)), 800.0, metrics(), 0.0), normal);
    assert_eq!(
        cursor_geometry(10, Some(Selection::caret(3)), 800.0, metrics(), f32::NAN),
        normal
    );
}

#[test]
fn test_collapsed_paragraph_keeps_one_char_per_line() {
    let rect = cursor_geometry(3, Some(Selection::caret(2)), 0.0, metrics(), 1.0);
    assert_eq!(rect.left, 0.0);
    assert_eq!(rect.top, 44.0);
    assert_eq!(rect.width, 10.0);
}

#[test]
fn test_html_mirror() {
    assert_eq!(html_mirror("git  log"), "git&nbsp;&nbsp;log");
    assert_eq!(html_mirror("a<b>&c"), "a&lt;b&gt;&amp;c");
    assert_eq!(html_mirror("line\nbreak\n"), "linebreak");
    assert_eq!(html_mirror(""), "");
}
