/*!
 * XML rendering of the snapshot
 */

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Result, SingleFileError};
use crate::plugins::Plugin;
use crate::types::{CodebaseSnapshot, FileRecord, SkippedEntry};

/// Whether XML 1.0 allows `c` in character data and attribute values
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Pass `value` through, or fail if it holds a character XML cannot carry
fn xml_safe<'a>(value: &'a str, context: &str) -> Result<&'a str> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        None => Ok(value),
        Some(c) => Err(SingleFileError::Generation {
            plugin: "xml".to_string(),
            message: format!(
                "character U+{:04X} in {} cannot be written as XML (use --replace-invalid-chars)",
                c as u32, context
            ),
        }),
    }
}

/// XML document output
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlPlugin;

impl Plugin for XmlPlugin {
    fn name(&self) -> &str {
        "xml"
    }

    fn render(&self, snapshot: &CodebaseSnapshot) -> Result<String> {
        let mut xml_writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        // Write XML declaration
        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut start_tag = BytesStart::new("codebase");
        let file_count = snapshot.files.len().to_string();
        let total_size = snapshot.total_size().to_string();
        start_tag.push_attribute(("files", file_count.as_str()));
        start_tag.push_attribute(("total_size", total_size.as_str()));
        xml_writer.write_event(Event::Start(start_tag))?;

        write_roots(snapshot, &mut xml_writer)?;

        xml_writer.write_event(Event::Start(BytesStart::new("files")))?;
        for record in &snapshot.files {
            write_file(snapshot, record, &mut xml_writer)?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("files")))?;

        if !snapshot.skipped.is_empty() {
            write_skipped(&snapshot.skipped, &mut xml_writer)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("codebase")))?;

        let mut bytes = xml_writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| SingleFileError::Generation {
            plugin: "xml".to_string(),
            message: e.to_string(),
        })
    }
}

/// Write the root paths
fn write_roots<W: Write>(snapshot: &CodebaseSnapshot, writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("roots")))?;
    for root in &snapshot.roots {
        writer.write_event(Event::Start(BytesStart::new("root")))?;
        let root = root.to_string_lossy();
        let root = xml_safe(&root, "a root path")?;
        writer.write_event(Event::Text(BytesText::new(root)))?;
        writer.write_event(Event::End(BytesEnd::new("root")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("roots")))?;
    Ok(())
}

/// Write one file element with its metadata and content
fn write_file<W: Write>(
    snapshot: &CodebaseSnapshot,
    record: &FileRecord,
    writer: &mut Writer<W>,
) -> Result<()> {
    let display_path = snapshot.display_path(record);
    xml_safe(&display_path, "a file path")?;
    xml_safe(&record.extension, &display_path)?;
    let size = record.size.to_string();
    let modified = record.modified.map(|m| m.to_rfc3339()).unwrap_or_default();

    let mut start_tag = BytesStart::new("file");
    start_tag.push_attribute(("path", display_path.as_str()));
    start_tag.push_attribute(("extension", record.extension.as_str()));
    start_tag.push_attribute(("size", size.as_str()));
    start_tag.push_attribute(("binary", if record.is_binary { "true" } else { "false" }));
    start_tag.push_attribute(("modified", modified.as_str()));
    start_tag.push_attribute(("permissions", record.permissions.as_str()));

    match &record.content {
        Some(content) if !record.is_binary => {
            writer.write_event(Event::Start(start_tag))?;
            writer.write_event(Event::Start(BytesStart::new("content")))?;
            let content = xml_safe(content, &display_path)?;
            writer.write_event(Event::Text(BytesText::new(content)))?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;
            writer.write_event(Event::End(BytesEnd::new("file")))?;
        }
        _ => writer.write_event(Event::Empty(start_tag))?,
    }

    Ok(())
}

/// Write entries dropped under continue-on-error
fn write_skipped<W: Write>(skipped: &[SkippedEntry], writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("skipped")))?;
    for entry in skipped {
        let path = entry.path.to_string_lossy();
        xml_safe(&path, "a skipped path")?;
        xml_safe(&entry.reason, &path)?;
        let mut tag = BytesStart::new("entry");
        tag.push_attribute(("path", path.as_ref()));
        tag.push_attribute(("reason", entry.reason.as_str()));
        writer.write_event(Event::Empty(tag))?;
    }
    writer.write_event(Event::End(BytesEnd::new("skipped")))?;
    Ok(())
}
