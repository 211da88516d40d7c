//! Single-rooted XML tree model.
//!
//! Shared by the XML attribute mutator and the tabular XML reader. The
//! document exclusively owns its node tree; mutation targets nodes found by
//! tag name, so no parent back-references are kept.

pub mod edit;

use indexmap::IndexMap;
use quick_xml::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::XmlParseError;

/// An element node: tag name, ordered attributes, ordered children and
/// optional text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlElement>,
    pub text: Option<String>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn has_element_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse a document from XML text.
    pub fn parse_str(content: &str) -> Result<Self, XmlParseError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    stack.push(element_from_start(&e)?);
                }
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    // quick-xml rejects mismatched tags, so the stack is
                    // non-empty here for well-formed input.
                    let element = stack.pop().ok_or(XmlParseError::NoRoot)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    if let Some(parent) = stack.last_mut() {
                        match &mut parent.text {
                            Some(existing) => existing.push_str(&text),
                            None => parent.text = Some(text),
                        }
                    }
                }
                Event::Eof => break,
                // Declarations, comments and processing instructions carry no
                // tabular or attribute content.
                _ => {}
            }
            buf.clear();
        }

        root.map(|root| Self { root }).ok_or(XmlParseError::NoRoot)
    }

    /// Serialize the tree back to indented XML text, without a declaration.
    /// The attribute mutator persists edited documents this way.
    pub fn to_xml_string(&self) -> Result<String, quick_xml::Error> {
        let mut output = Vec::new();
        let mut writer = Writer::new_with_indent(&mut output, b' ', 2);
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    /// Serialize with an XML declaration, for freshly generated documents.
    pub fn to_xml_string_with_decl(&self) -> Result<String, quick_xml::Error> {
        let mut output = Vec::new();
        let mut writer = Writer::new_with_indent(&mut output, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, XmlParseError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = escape::unescape(&raw)
            .map_err(quick_xml::Error::from)?
            .into_owned();
        element.attributes.insert(name, value);
    }
    Ok(element)
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(XmlParseError::MultipleRoots)
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let has_text = element.text.as_deref().is_some_and(|t| !t.is_empty());
    if !has_text && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}
