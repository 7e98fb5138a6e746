//! Event-driven parsing of `word/document.xml` into the table tree.
//!
//! Only top-level `w:tbl` elements are modeled. Paragraph text is the
//! concatenation of all `w:t` content under the paragraph; tabs, breaks and
//! field codes are not rendered.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::{Cell, Paragraph, Row, Table};

/// Parse the document XML into top-level tables.
///
/// Errors are plain messages; the caller attaches the file path.
pub(crate) fn parse_tables(xml: &[u8]) -> Result<Vec<Table>, String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut tables: Vec<Table> = Vec::new();
    let mut table_depth = 0usize;

    // State of the currently open top-level-table-cell paragraph.
    let mut in_para = false;
    let mut nested = 0usize;
    let mut in_text = false;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("invalid XML in word/document.xml: {e}"))?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let name = e.name();
                let name = name.as_ref();
                if in_para {
                    if name == b"w:t" {
                        in_text = true;
                    }
                    nested += 1;
                } else {
                    match name {
                        b"w:tbl" => {
                            table_depth += 1;
                            if table_depth == 1 {
                                tables.push(Table::default());
                            }
                        }
                        b"w:tr" if table_depth == 1 => {
                            last_table(&mut tables)?.rows.push(Row::default());
                        }
                        b"w:tc" if table_depth == 1 => {
                            last_row(&mut tables)?.cells.push(Cell::default());
                        }
                        b"w:p" if table_depth == 1 => {
                            in_para = true;
                            nested = 0;
                            in_text = false;
                            text.clear();
                        }
                        _ => {}
                    }
                }
            }
            Event::Empty(e) => {
                if !in_para && table_depth == 1 && e.name().as_ref() == b"w:p" {
                    last_cell(&mut tables)?
                        .paragraphs
                        .push(Paragraph::new(String::new()));
                }
            }
            Event::End(e) => {
                let name = e.name();
                let name = name.as_ref();
                if in_para {
                    if nested > 0 {
                        if name == b"w:t" {
                            in_text = false;
                        }
                        nested -= 1;
                    } else if name == b"w:p" {
                        in_para = false;
                        last_cell(&mut tables)?
                            .paragraphs
                            .push(Paragraph::new(std::mem::take(&mut text)));
                    }
                } else if name == b"w:tbl" {
                    table_depth = table_depth.saturating_sub(1);
                }
            }
            Event::Text(e) if in_text => {
                let t = e
                    .unescape()
                    .map_err(|e| format!("invalid text content in word/document.xml: {e}"))?;
                text.push_str(&t);
            }
            Event::CData(e) if in_text => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(tables)
}

fn last_table(tables: &mut [Table]) -> Result<&mut Table, String> {
    tables
        .last_mut()
        .ok_or_else(|| "table row outside of a table".to_string())
}

fn last_row(tables: &mut [Table]) -> Result<&mut Row, String> {
    last_table(tables)?
        .rows
        .last_mut()
        .ok_or_else(|| "table cell outside of a row".to_string())
}

fn last_cell(tables: &mut [Table]) -> Result<&mut Cell, String> {
    last_row(tables)?
        .cells
        .last_mut()
        .ok_or_else(|| "paragraph outside of a table cell".to_string())
}
