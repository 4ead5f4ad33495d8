use std::io::{self, Write};

use crate::database::records::Content;

/// Prints one title per match followed by the `Count:` line.
pub fn write_titles<W: Write>(out: &mut W, matches: &[Content]) -> io::Result<()> {
    for content in matches {
        writeln!(out, "{}", content.title)?;
    }
    write_count(out, matches.len())
}

/// Prints one JSON object per match followed by the `Count:` line.
pub fn write_json<W: Write>(out: &mut W, matches: &[Content]) -> io::Result<()> {
    for content in matches {
        serde_json::to_writer(&mut *out, content)?;
        writeln!(out)?;
    }
    write_count(out, matches.len())
}

fn write_count<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    writeln!(out, "Count: {}", count)
}
