//! Well-formed XML elements.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::fmt;
use std::str::FromStr;
use vesta_core::{VestaError, VestaResult};

/// A single well-formed XML element.
///
/// Parsing keeps the element's content as written except for
/// whitespace-only text, which is formatting and is dropped. An XML
/// declaration, comments or processing instructions around the root are
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    xml: String,
}

impl XmlElement {
    /// Parses `input`, which must contain exactly one root element.
    pub fn parse(input: &str) -> VestaResult<Self> {
        let mut reader = Reader::from_str(input);
        let mut writer = Writer::new(Vec::new());

        let mut depth = 0usize;
        let mut name: Option<String> = None;

        loop {
            let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
            match event {
                Event::Eof => break,
                Event::Start(ref start) => {
                    if depth == 0 {
                        Self::begin_root(&mut name, start.name().as_ref())?;
                    }
                    depth += 1;
                    write(&mut writer, event)?;
                }
                Event::Empty(ref empty) => {
                    if depth == 0 {
                        Self::begin_root(&mut name, empty.name().as_ref())?;
                    }
                    write(&mut writer, event)?;
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    write(&mut writer, event)?;
                }
                Event::Text(ref text) if text.iter().all(u8::is_ascii_whitespace) => {}
                Event::Text(_) | Event::CData(_) if depth == 0 => {
                    return Err(VestaError::Xml(
                        "Text is not allowed outside the root element".to_string(),
                    ));
                }
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_)
                    if depth == 0 => {}
                other => write(&mut writer, other)?,
            }
        }

        if depth != 0 {
            return Err(VestaError::Xml("Unexpected end of document".to_string()));
        }
        let name = name.ok_or_else(|| VestaError::Xml("Root element is missing".to_string()))?;
        let xml = String::from_utf8(writer.into_inner()).map_err(|e| VestaError::Xml(e.to_string()))?;

        Ok(Self { name, xml })
    }

    fn begin_root(name: &mut Option<String>, raw: &[u8]) -> VestaResult<()> {
        if name.is_some() {
            return Err(VestaError::Xml(
                "There are multiple root elements".to_string(),
            ));
        }
        *name = Some(String::from_utf8_lossy(raw).into_owned());
        Ok(())
    }

    /// Qualified name of the root element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element serialized without formatting whitespace.
    pub fn as_str(&self) -> &str {
        &self.xml
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> VestaResult<()> {
    writer
        .write_event(event)
        .map_err(|e| VestaError::Xml(e.to_string()))
}

fn xml_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> VestaError {
    VestaError::Xml(format!("{} at position {}", err, reader.buffer_position()))
}

impl FromStr for XmlElement {
    type Err = VestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xml)
    }
}
