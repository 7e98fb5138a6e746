//! Splicing rewritten paragraph text back into `word/document.xml`.
//!
//! The original XML is streamed event by event. Paragraphs inside top-level
//! table cells are re-emitted with their `w:pPr` kept verbatim and their runs
//! replaced by a single `xml:space="preserve"` run holding the new text; all
//! other markup passes through unchanged. The traversal mirrors
//! [`crate::reader::parse_tables`] exactly, so the n-th rewritten paragraph
//! receives the n-th text collected at load time.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Rewrite the document XML with `texts` in document order, one per
/// top-level-table-cell paragraph.
pub(crate) fn rewrite_document_xml(xml: &[u8], texts: &[&str]) -> Result<Vec<u8>, String> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    let mut buf = Vec::new();

    let mut table_depth = 0usize;
    let mut cursor = 0usize;

    // State of the paragraph currently being rewritten.
    let mut in_para = false;
    let mut in_ppr = false;
    let mut ppr_depth = 0usize;
    let mut skip_depth = 0usize;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("invalid XML in word/document.xml: {e}"))?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let name = e.name();
                let is_tbl = name.as_ref() == b"w:tbl";
                let is_p = name.as_ref() == b"w:p";
                let is_ppr_tag = name.as_ref() == b"w:pPr";
                if in_para {
                    if in_ppr {
                        ppr_depth += 1;
                        write(&mut writer, Event::Start(e))?;
                    } else if skip_depth > 0 {
                        skip_depth += 1;
                    } else if is_ppr_tag {
                        in_ppr = true;
                        ppr_depth = 0;
                        write(&mut writer, Event::Start(e))?;
                    } else {
                        // Original run content, dropped in favour of the new text.
                        skip_depth += 1;
                    }
                } else {
                    if is_tbl {
                        table_depth += 1;
                    } else if is_p && table_depth == 1 {
                        in_para = true;
                        in_ppr = false;
                        skip_depth = 0;
                    }
                    write(&mut writer, Event::Start(e))?;
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let is_p = name.as_ref() == b"w:p";
                let is_ppr_tag = name.as_ref() == b"w:pPr";
                if in_para {
                    if in_ppr || (skip_depth == 0 && is_ppr_tag) {
                        write(&mut writer, Event::Empty(e))?;
                    }
                } else if is_p && table_depth == 1 {
                    // A self-closing cell paragraph still consumes a slot.
                    let text = next_text(texts, &mut cursor)?;
                    if text.is_empty() {
                        write(&mut writer, Event::Empty(e))?;
                    } else {
                        write(&mut writer, Event::Start(e))?;
                        write_run(&mut writer, text)?;
                        write(&mut writer, Event::End(BytesEnd::new("w:p")))?;
                    }
                } else {
                    write(&mut writer, Event::Empty(e))?;
                }
            }
            Event::End(e) => {
                let name = e.name();
                let is_tbl = name.as_ref() == b"w:tbl";
                let is_p = name.as_ref() == b"w:p";
                let is_ppr_tag = name.as_ref() == b"w:pPr";
                if in_para {
                    if in_ppr {
                        if ppr_depth == 0 && is_ppr_tag {
                            in_ppr = false;
                        } else {
                            ppr_depth = ppr_depth.saturating_sub(1);
                        }
                        write(&mut writer, Event::End(e))?;
                    } else if skip_depth > 0 {
                        skip_depth -= 1;
                    } else if is_p {
                        let text = next_text(texts, &mut cursor)?;
                        write_run(&mut writer, text)?;
                        write(&mut writer, Event::End(e))?;
                        in_para = false;
                    }
                } else {
                    if is_tbl {
                        table_depth = table_depth.saturating_sub(1);
                    }
                    write(&mut writer, Event::End(e))?;
                }
            }
            // Declaration, comments, PIs, and text: dropped only inside the
            // replaced body of a rewritten paragraph.
            ev => {
                if !in_para || in_ppr {
                    write(&mut writer, ev)?;
                }
            }
        }
        buf.clear();
    }

    if cursor != texts.len() {
        return Err(format!(
            "document changed between load and save: {} table paragraphs read, {} written",
            texts.len(),
            cursor
        ));
    }

    Ok(writer.into_inner())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer
        .write_event(event)
        .map_err(|e| format!("failed to rewrite word/document.xml: {e}"))
}

/// Emit `<w:r><w:t xml:space="preserve">text</w:t></w:r>`, or nothing for
/// empty text.
fn write_run(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Ok(());
    }
    write(writer, Event::Start(BytesStart::new("w:r")))?;
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    write(writer, Event::Start(t))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new("w:t")))?;
    write(writer, Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn next_text<'a>(texts: &[&'a str], cursor: &mut usize) -> Result<&'a str, String> {
    let text = texts
        .get(*cursor)
        .copied()
        .ok_or_else(|| "document changed between load and save: paragraph count grew".to_string())?;
    *cursor += 1;
    Ok(text)
}
