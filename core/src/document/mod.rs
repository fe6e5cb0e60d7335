// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! Access to tagged fields of structured documents.
//!
//! Corpus and query collections are XML files where every record is an
//! element (`RECORD`, `QUERY`) with tagged child fields. The stages only need
//! a handful of operations on them, captured by [`DocumentReader`].

use std::path::Path;

use anyhow::{bail, Context};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::Result;

pub trait DocumentReader {
    type Record;

    /// All records with the given tag, in document order.
    fn records(&self, tag: &str) -> Vec<&Self::Record>;

    /// All nested records of `record` with the given tag, in document order.
    fn nested<'a>(&'a self, record: &'a Self::Record, tag: &str) -> Vec<&'a Self::Record>;

    /// Text the record starts with, `None` if it is empty or starts with a
    /// nested field.
    fn value(&self, record: &Self::Record) -> Option<String>;

    /// Value of the last field with the given tag.
    fn field_value(&self, record: &Self::Record, tag: &str) -> Option<String> {
        self.nested(record, tag)
            .last()
            .and_then(|field| self.value(field))
    }

    fn field_attribute(&self, record: &Self::Record, attr: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            attributes.push((key, value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
            attributes,
            children: Vec::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => self.children.push(Node::Text(text.to_string())),
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Descendants with the given tag in document order, excluding `self`.
    pub fn descendants<'a>(&'a self, tag: &str, res: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if element.name == tag {
                    res.push(element);
                }
                element.descendants(tag, res);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(crate::Error::from)? {
                Event::Start(ref e) => stack.push(Element::from_start(e)?),
                Event::Empty(ref e) => {
                    let element = Element::from_start(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape().map_err(crate::Error::from)?;
                        parent.push_text(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::End(_) => {
                    let Some(element) = stack.pop() else {
                        bail!("unexpected closing tag");
                    };

                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            bail!("element <{}> is never closed", open.name);
        }

        match root {
            Some(root) => Ok(Self { root }),
            None => bail!("document has no root element"),
        }
    }
}

impl DocumentReader for XmlDocument {
    type Record = Element;

    fn records(&self, tag: &str) -> Vec<&Element> {
        let mut res = Vec::new();

        if self.root.name == tag {
            res.push(&self.root);
        }

        self.root.descendants(tag, &mut res);
        res
    }

    fn nested<'a>(&'a self, record: &'a Element, tag: &str) -> Vec<&'a Element> {
        let mut res = Vec::new();
        record.descendants(tag, &mut res);
        res
    }

    fn value(&self, record: &Element) -> Option<String> {
        record.first_text().map(str::to_string)
    }

    fn field_attribute(&self, record: &Element, attr: &str) -> Option<String> {
        record.attribute(attr).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<root>
  <RECORD>
    <RECORDNUM>00001 </RECORDNUM>
    <TITLE>First</TITLE>
    <ABSTRACT>Cystic fibrosis &amp; lungs</ABSTRACT>
  </RECORD>
  <RECORD>
    <RECORDNUM>00002</RECORDNUM>
    <RECORDNUM>00003</RECORDNUM>
    <EXTRACT><![CDATA[Only an extract]]></EXTRACT>
    <EMPTY/>
  </RECORD>
</root>"#;

    #[test]
    fn records_in_document_order() {
        let doc = XmlDocument::parse(CORPUS).unwrap();
        let records = doc.records("RECORD");
        assert_eq!(records.len(), 2);

        assert_eq!(
            doc.field_value(records[0], "RECORDNUM").as_deref(),
            Some("00001 ")
        );
        assert_eq!(
            doc.field_value(records[0], "ABSTRACT").as_deref(),
            Some("Cystic fibrosis & lungs")
        );
        assert_eq!(doc.field_value(records[0], "EXTRACT"), None);
    }

    #[test]
    fn last_field_wins() {
        let doc = XmlDocument::parse(CORPUS).unwrap();
        let records = doc.records("RECORD");
        assert_eq!(
            doc.field_value(records[1], "RECORDNUM").as_deref(),
            Some("00003")
        );
        assert_eq!(
            doc.field_value(records[1], "EXTRACT").as_deref(),
            Some("Only an extract")
        );
        assert_eq!(doc.field_value(records[1], "EMPTY"), None);
    }

    #[test]
    fn attributes() {
        let doc = XmlDocument::parse(
            r#"<QUERY><Records><Item score="0010">12</Item><Item score="2">7</Item></Records></QUERY>"#,
        )
        .unwrap();
        let query = doc.records("QUERY")[0];
        let items = doc.nested(query, "Item");

        assert_eq!(items.len(), 2);
        assert_eq!(doc.field_attribute(items[0], "score").as_deref(), Some("0010"));
        assert_eq!(doc.value(items[1]).as_deref(), Some("7"));
        assert_eq!(doc.field_attribute(items[1], "missing"), None);
    }

    #[test]
    fn malformed() {
        assert!(XmlDocument::parse("<a><b></a>").is_err());
        assert!(XmlDocument::parse("<a>").is_err());
        assert!(XmlDocument::parse("").is_err());
    }
}
