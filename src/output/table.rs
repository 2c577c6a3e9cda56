// Console renderers: plain lines and boxed table

use std::io::{self, Write};

/// One line per row, cells separated by a space
pub fn write_plain<W: Write>(mut w: W, cells: &[Vec<String>]) -> io::Result<()> {
    for row in cells {
        writeln!(w, "{}", row.join(" "))?;
    }
    Ok(())
}

fn column_widths(cells: &[Vec<String>]) -> Vec<usize> {
    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn write_rule<W: Write>(w: &mut W, widths: &[usize]) -> io::Result<()> {
    let segments: Vec<String> = widths.iter().map(|n| "-".repeat(n + 2)).collect();
    writeln!(w, "+{}+", segments.join("+"))
}

fn write_cells<W: Write>(w: &mut W, row: &[String], widths: &[usize]) -> io::Result<()> {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width - cell.chars().count();
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect();
    writeln!(w, "|{}|", padded.join("|"))
}

/// Left-aligned boxed table; the first row is the header
pub fn write_pretty<W: Write>(mut w: W, cells: &[Vec<String>]) -> io::Result<()> {
    let Some((header, body)) = cells.split_first() else {
        return Ok(());
    };
    let widths = column_widths(cells);

    write_rule(&mut w, &widths)?;
    write_cells(&mut w, header, &widths)?;
    write_rule(&mut w, &widths)?;
    for row in body {
        write_cells(&mut w, row, &widths)?;
    }
    write_rule(&mut w, &widths)
}
