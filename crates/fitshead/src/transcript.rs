//! The line-oriented transcript format linking the two stages.
//!
//! Stage one writes one line per card plus boundary markers; stage two
//! recognizes the markers to split the stream back into per-file records.

use std::io::{self, Write};

/// Prefix shared by all boundary-marker lines.
pub const MARKER_PREFIX: &str = "====>";

/// Leading text of a bare primary-header line, the stage-two boundary when
/// headers are piped without per-file markers.
pub const MAGIC_LINE_PREFIX: &str = "SIMPLE  =";

/// Write the boundary marker announcing a named file's main header.
pub fn write_file_marker<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "====> file {} (main) <====", name)
}

/// Write the boundary marker announcing extension `n` (1-based).
pub fn write_xtension_marker<W: Write>(out: &mut W, n: u32) -> io::Result<()> {
    writeln!(out, "====> xtension {}", n)
}

/// Returns `true` if `line` is a boundary-marker line.
pub fn is_marker(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// Returns `true` if `line` opens a header without a preceding marker.
pub fn is_magic_line(line: &str) -> bool {
    line.starts_with(MAGIC_LINE_PREFIX)
}

/// The designated name token of a marker line: its third
/// whitespace-delimited word. Both marker forms place it there
/// (`====> file NAME (main) <====`, `====> xtension N`); empty when the
/// marker carries no such token.
pub fn marker_name(line: &str) -> &str {
    line.split_whitespace().nth(2).unwrap_or("")
}
