use std::io::{self, BufRead, Write};

use log::debug;

use crate::output::{highlight_matches, maybe_colorize};
use crate::regex::CompiledPattern;

/// Interactive line mode: reads lines from `reader` until EOF. Each line
/// is printed with its matches highlighted, or `> No matches` when the
/// line had none.
pub fn run_interactive<R: BufRead, W: Write>(
    pattern: &mut CompiledPattern,
    mut reader: R,
    mut writer: W,
    use_o: bool,
    use_color: bool,
) -> io::Result<bool> {
    let mut any_matched = false;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);

        let matches = pattern.find_all(line);
        debug!("stdin line {line:?}: {} match(es)", matches.len());

        if matches.is_empty() {
            writeln!(writer, "> No matches")?;
            continue;
        }

        any_matched = true;
        print_matches(&mut writer, line, &matches, None, use_o, use_color)?;
    }

    Ok(any_matched)
}

/// File-scan mode: iterates `content`'s lines with 1-based numbering,
/// stripping trailing whitespace before matching. Lines with at least one
/// match print `<line-number>: <colorized-line>`; lines with none print
/// nothing. `filename`, when present, prefixes every printed line
/// (`<filename>:<line-number>: ...`), matching grep's multi-file output.
pub fn run_file_scan<W: Write>(
    pattern: &mut CompiledPattern,
    content: &str,
    filename: Option<&str>,
    mut writer: W,
    use_o: bool,
    use_color: bool,
) -> io::Result<bool> {
    let mut any_matched = false;

    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end();
        let matches = pattern.find_all(line);
        if matches.is_empty() {
            continue;
        }
        any_matched = true;
        let line_number = idx + 1;
        debug!(
            "{}:{line_number}: {} match(es)",
            filename.unwrap_or("<stdin>"),
            matches.len()
        );
        print_matches(&mut writer, line, &matches, Some((filename, line_number)), use_o, use_color)?;
    }

    Ok(any_matched)
}

fn print_matches<W: Write>(
    writer: &mut W,
    line: &str,
    matches: &[(usize, usize)],
    location: Option<(Option<&str>, usize)>,
    use_o: bool,
    use_color: bool,
) -> io::Result<()> {
    let prefix = match location {
        Some((Some(filename), line_number)) => format!("{filename}:{line_number}: "),
        Some((None, line_number)) => format!("{line_number}: "),
        None => String::new(),
    };

    if use_o {
        for &(s, e) in matches {
            writeln!(writer, "{prefix}{}", maybe_colorize(&line[s..e], use_color))?;
        }
    } else {
        writeln!(writer, "{prefix}{}", highlight_matches(line, matches, use_color))?;
    }
    Ok(())
}
