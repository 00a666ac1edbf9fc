//! Usage guide printed by `--show-guide`.

use crate::plugins::BuiltinFormat;

/// Render the guide text
pub fn guide() -> String {
    format!(
        r#"singlefile - flatten a directory tree into single-file snapshots

USAGE
  singlefile [PATHS...] -o <STEM> --formats <LIST> [FILTERS]

OUTPUTS
  One file per format, named <STEM>.<FORMAT>.
  Available formats: {formats}

FILTERS
  --depth N                  descend at most N directory levels (0 = roots only)
  --extensions py,rs         keep only these extensions
  --exclude-extensions log   drop these extensions (checked first)
  --exclude-dirs '^\.git$'   skip directories whose name matches
  --include-dirs '^src$'     descend only into matching directories
  --exclude-files '\.lock$'  drop files whose name matches
  --include-files '^main'    keep only files whose name matches
  Patterns are regular expressions matched against the base name and are
  not anchored automatically.

ERRORS
  --ignore-errors            skip unreadable files and failing formats
  --replace-invalid-chars    substitute invalid characters instead of failing

EXAMPLES
  singlefile . -o out/snapshot --formats default,json
  singlefile src --extensions rs --exclude-dirs '^target$' --depth 3
"#,
        formats = BuiltinFormat::names().join(", ")
    )
}
