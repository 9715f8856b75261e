//! XML export
//!
//! Layout:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <ArrayOfBook>
//!   <Book>
//!     <Title>..</Title><Price>..</Price><Rating>..</Rating><Category>..</Category><Url>..</Url>
//!   </Book>
//! </ArrayOfBook>
//! ```

use crate::catalog::ListingRecord;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::path::PathBuf;

/// Writes records as an XML document
#[derive(Debug, Clone)]
pub struct XmlOutput {
    path: PathBuf,
}

impl XmlOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for XmlOutput {
    fn name(&self) -> &str {
        "XML"
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, records: &[ListingRecord]) -> OutputResult<()> {
        let document = render_xml(records)?;
        std::fs::write(&self.path, document)?;
        Ok(())
    }
}

/// Renders the records as an indented XML document
pub fn render_xml(records: &[ListingRecord]) -> OutputResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write_event(&mut writer, Event::Start(BytesStart::new("ArrayOfBook")))?;

    for record in records {
        write_event(&mut writer, Event::Start(BytesStart::new("Book")))?;
        write_field(&mut writer, "Title", &record.title)?;
        write_field(&mut writer, "Price", &record.price.to_string())?;
        write_field(&mut writer, "Rating", &record.rating.to_string())?;
        write_field(&mut writer, "Category", &record.category)?;
        write_field(&mut writer, "Url", &record.url)?;
        write_event(&mut writer, Event::End(BytesEnd::new("Book")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("ArrayOfBook")))?;

    Ok(writer.into_inner())
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> OutputResult<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(value)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> OutputResult<()> {
    writer
        .write_event(event)
        .map_err(|e| OutputError::Format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn record() -> ListingRecord {
        ListingRecord {
            title: "Tom & Jerry <Collected>".to_string(),
            price: Decimal::new(1050, 2),
            rating: 3,
            category: "Humor".to_string(),
            url: "https://books.toscrape.com/catalogue/tom_1/index.html?a=1&b=2".to_string(),
        }
    }

    #[test]
    fn test_render_structure() {
        let xml = String::from_utf8(render_xml(&[record()]).unwrap()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains("<ArrayOfBook>"));
        assert!(xml.contains("<Book>"));
        assert!(xml.contains("<Price>10.50</Price>"));
        assert!(xml.contains("<Rating>3</Rating>"));
        assert!(xml.contains("<Category>Humor</Category>"));
        assert!(xml.trim_end().ends_with("</ArrayOfBook>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let xml = String::from_utf8(render_xml(&[record()]).unwrap()).unwrap();

        assert!(xml.contains("<Title>Tom &amp; Jerry &lt;Collected&gt;</Title>"));
        assert!(xml.contains("index.html?a=1&amp;b=2</Url>"));
    }

    #[test]
    fn test_render_empty() {
        let xml = String::from_utf8(render_xml(&[]).unwrap()).unwrap();
        assert!(xml.contains("<ArrayOfBook>"));
        assert!(!xml.contains("<Book>"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("books.xml");

        XmlOutput::new(&path).write(&[record(), record()]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.matches("<Book>").count(), 2);
    }
}
