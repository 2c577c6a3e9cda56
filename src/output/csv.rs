// CSV writer: every field quoted, `"` doubled, `\n` line ends

use std::io::{self, Write};

pub fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    let fields: Vec<String> = row
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect();
    writeln!(w, "{}", fields.join(","))
}

pub fn write_rows<W: Write>(mut w: W, rows: &[Vec<String>]) -> io::Result<()> {
    for row in rows {
        write_row(&mut w, row)?;
    }
    w.flush()
}
