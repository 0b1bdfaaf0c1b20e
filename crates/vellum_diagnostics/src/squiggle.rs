//! The `~` underline drawn beneath each source line a warning spans.

use vellum_source::SourceRange;

const SQUIGGLE: char = '~';

/// Computes the underline for one line of a range.
///
/// `line_text` is the literal text of line `line_num`, which must lie within
/// `range.start.line..=range.end.line`. The result is meant to be printed on
/// the line directly below `line_text`.
///
/// - A middle line of a multi-line range is underlined in full.
/// - The start line is underlined from the start column to the end column
///   (single-line range) or to the end of the line (multi-line range). The
///   text before the start column becomes spaces, except tabs, which are kept
///   so the underline lines up however the terminal expands them.
/// - The end line of a multi-line range is underlined from column zero up to
///   the end column.
///
/// At least one `~` is always drawn on the start line, so zero-width ranges
/// stay visible.
pub fn squiggle_underline(line_text: &str, line_num: u32, range: &SourceRange) -> String {
    let start = range.start;
    let end = range.end;

    if line_num != start.line && line_num != end.line {
        return repeat(line_text.chars().count());
    }

    if line_num == start.line {
        let start_column = start.column as usize;
        let end_column = if end.line == start.line {
            end.column as usize
        } else {
            line_text.chars().count()
        };
        let prefix: String = line_text
            .chars()
            .take(start_column)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = end_column.saturating_sub(start_column).max(1);
        return prefix + &repeat(width);
    }

    repeat(end.column as usize)
}

fn repeat(count: usize) -> String {
    std::iter::repeat(SQUIGGLE).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_source::Position;

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> SourceRange {
        SourceRange::new("test.js", Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn single_line_range() {
        let r = range(0, 2, 0, 5);
        assert_eq!(squiggle_underline("  foo(bar);", 0, &r), "  ~~~");
    }

    #[test]
    fn zero_width_range_draws_one_squiggle() {
        let r = range(3, 4, 3, 4);
        assert_eq!(squiggle_underline("let x = 1;", 3, &r), "    ~");
    }

    #[test]
    fn zero_width_range_at_line_start() {
        let r = range(0, 0, 0, 0);
        assert_eq!(squiggle_underline("", 0, &r), "~");
    }

    #[test]
    fn tabs_in_prefix_are_preserved() {
        let r = range(0, 3, 0, 6);
        assert_eq!(squiggle_underline("\t\tx(yz);", 0, &r), "\t\t ~~~");
    }

    #[test]
    fn multi_line_range_across_three_lines() {
        let lines = ["function f() {", "  return 1;", "}  // end"];
        let r = range(4, 9, 6, 1);
        assert_eq!(squiggle_underline(lines[0], 4, &r), "         ~~~~~");
        assert_eq!(squiggle_underline(lines[1], 5, &r), "~~~~~~~~~~~");
        assert_eq!(squiggle_underline(lines[2], 6, &r), "~");
    }

    #[test]
    fn end_line_has_no_prefix() {
        let r = range(0, 0, 1, 6);
        assert_eq!(squiggle_underline("    foo();", 1, &r), "~~~~~~");
    }

    #[test]
    fn start_line_of_multi_line_ignores_end_column() {
        let r = range(0, 4, 2, 1);
        assert_eq!(squiggle_underline("var abc", 0, &r), "    ~~~");
    }

    #[test]
    fn start_column_past_line_end_still_visible() {
        let r = range(0, 10, 1, 0);
        assert_eq!(squiggle_underline("abc", 0, &r), "   ~");
    }

    #[test]
    fn columns_count_chars() {
        let r = range(0, 2, 0, 4);
        assert_eq!(squiggle_underline("é=ü+1", 0, &r), "  ~~");
    }
}
