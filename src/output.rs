const COLOR_START: &str = "\x1b[31;1m";
const COLOR_RESET: &str = "\x1b[0m";

pub fn maybe_colorize(s: &str, use_color: bool) -> String {
    if use_color {
        format!("{COLOR_START}{s}{COLOR_RESET}")
    } else {
        s.to_string()
    }
}

/// Wraps every matched range of `line` (byte offsets from `find_all`) in
/// the colorizing escape sequence, leaving unmatched text untouched.
pub fn highlight_matches(line: &str, matches: &[(usize, usize)], use_color: bool) -> String {
    if !use_color || matches.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    let mut last_end = 0usize;
    for &(start, end) in matches {
        out.push_str(&line[last_end..start]);
        out.push_str(&maybe_colorize(&line[start..end], true));
        last_end = end;
    }
    out.push_str(&line[last_end..]);
    out
}
