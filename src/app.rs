use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::error;

use crate::cli::Mode;
use crate::fs_walk::collect_files;
use crate::regex::CompiledPattern;
use crate::search::{run_file_scan, run_interactive};

/// Pattern compiled, driver ran. (Line-oriented / file-scan exit status
/// reflects only parse success, per the driver's documented contract.)
pub const EXIT_OK: i32 = 0;
/// Legacy `-E` single-shot mode: pattern compiled but did not match.
pub const EXIT_NO_MATCH: i32 = 1;
/// Pattern failed to compile; the matcher was never invoked.
pub const EXIT_BAD_PATTERN: i32 = 2;

pub fn run(mode: Mode) -> i32 {
    match mode {
        Mode::Legacy { pattern } => run_legacy(&pattern),
        Mode::Driver {
            pattern,
            file,
            paths,
            use_o,
            recursive,
            use_color,
        } => run_driver(&pattern, file, paths, use_o, recursive, use_color),
    }
}

fn run_legacy(pattern: &str) -> i32 {
    let mut compiled = match CompiledPattern::compile(pattern) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return EXIT_BAD_PATTERN;
        }
    };

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return EXIT_NO_MATCH;
    }
    let line = line.trim_end_matches(['\n', '\r']);

    if compiled.match_any(line) { EXIT_OK } else { EXIT_NO_MATCH }
}

fn run_driver(
    pattern: &str,
    file: Option<PathBuf>,
    paths: Vec<String>,
    use_o: bool,
    recursive: bool,
    use_color: bool,
) -> i32 {
    let mut compiled = match CompiledPattern::compile(pattern) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return EXIT_BAD_PATTERN;
        }
    };

    let mut all_paths: Vec<String> = file.map(|f| vec![f.to_string_lossy().into_owned()]).unwrap_or_default();
    all_paths.extend(paths);

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if all_paths.is_empty() {
        let stdin = io::stdin();
        let reader = BufReader::new(stdin.lock());
        let _ = run_interactive(&mut compiled, reader, &mut writer, use_o, use_color);
        return EXIT_OK;
    }

    let mut files = Vec::new();
    for p in &all_paths {
        files.extend(collect_files(Path::new(p), recursive));
    }
    let show_filename = recursive || files.len() > 1;

    for path in files {
        match fs::read_to_string(&path) {
            Ok(content) => {
                let name = path.to_string_lossy();
                let filename = show_filename.then_some(name.as_ref());
                let _ = run_file_scan(&mut compiled, &content, filename, &mut writer, use_o, use_color);
            }
            Err(e) => error!("{}: {e}", path.display()),
        }
    }

    EXIT_OK
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn driver_scans_a_real_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a dog").unwrap();
        writeln!(file, "a cat").unwrap();
        writeln!(file, "another cat").unwrap();

        let mut compiled = CompiledPattern::compile("cat").unwrap();
        let files = collect_files(file.path(), false);
        assert_eq!(files.len(), 1);

        let content = fs::read_to_string(&files[0]).unwrap();
        let mut out = Vec::new();
        let matched = run_file_scan(&mut compiled, &content, None, &mut out, false, false).unwrap();

        assert!(matched);
        assert_eq!(String::from_utf8(out).unwrap(), "2: a cat\n3: another cat\n");
    }

    #[test]
    fn driver_recurses_into_a_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("b.txt"), "beta\n").unwrap();

        let files = collect_files(dir.path(), true);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn run_dispatches_legacy_and_driver_modes_by_exit_code() {
        assert_eq!(run(Mode::Legacy { pattern: "(".to_string() }), EXIT_BAD_PATTERN);
        assert_eq!(
            run(Mode::Driver {
                pattern: "(".to_string(),
                file: None,
                paths: Vec::new(),
                use_o: false,
                recursive: false,
                use_color: false,
            }),
            EXIT_BAD_PATTERN
        );
    }
}
