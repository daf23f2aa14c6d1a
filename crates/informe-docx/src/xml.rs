//! Minimal owned XML tree that round-trips untouched nodes byte for byte.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

pub(crate) const W_BODY: &[u8] = b"w:body";
pub(crate) const W_P: &[u8] = b"w:p";
pub(crate) const W_T: &[u8] = b"w:t";
pub(crate) const W_TBL: &[u8] = b"w:tbl";
pub(crate) const W_TR: &[u8] = b"w:tr";
pub(crate) const W_TC: &[u8] = b"w:tc";
pub(crate) const W_FF_DATA: &[u8] = b"w:ffData";
pub(crate) const W_NAME: &[u8] = b"w:name";
pub(crate) const W_CHECK_BOX: &[u8] = b"w:checkBox";
pub(crate) const W_CHECKED: &[u8] = b"w:checked";
pub(crate) const W_VAL: &[u8] = b"w:val";
pub(crate) const W_BR: &[u8] = b"w:br";
pub(crate) const W_TAB: &[u8] = b"w:tab";
pub(crate) const W_P_PR: &[u8] = b"w:pPr";
pub(crate) const W_R_PR: &[u8] = b"w:rPr";
const XML_SPACE: &[u8] = b"xml:space";
const BREAK_CHARS: [char; 3] = ['\n', '\r', '\t'];

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(Element),
    Text(TextNode),
    /// Declarations, comments, CDATA and processing instructions.
    Other(Event<'static>),
}

/// Character data kept in its escaped source form.
#[derive(Debug, Clone, Default)]
pub(crate) struct TextNode {
    raw: String,
}

impl TextNode {
    fn from_value(value: &str) -> Self {
        Self {
            raw: partial_escape(value).into_owned(),
        }
    }

    pub(crate) fn value(&self) -> Cow<'_, str> {
        unescape(&self.raw).unwrap_or(Cow::Borrowed(self.raw.as_str()))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    start: BytesStart<'static>,
    pub(crate) children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    fn new(start: BytesStart<'static>, self_closing: bool) -> Self {
        Self {
            start,
            children: Vec::new(),
            self_closing,
        }
    }

    pub(crate) fn is(&self, name: &[u8]) -> bool {
        self.start.name().as_ref() == name
    }

    pub(crate) fn attribute(&self, key: &[u8]) -> Option<String> {
        self.start
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == key)
            .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
    }

    pub(crate) fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn first_child(&self, name: &[u8]) -> Option<&Element> {
        self.child_elements().find(|child| child.is(name))
    }

    pub(crate) fn first_child_mut(&mut self, name: &[u8]) -> Option<&mut Element> {
        self.child_elements_mut().find(|child| child.is(name))
    }

    /// Concatenated character data of the direct text children.
    pub(crate) fn own_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.value()),
                _ => None,
            })
            .collect()
    }

    /// Replaces all children with a single text node.
    ///
    /// Adds `xml:space="preserve"` when the value has leading or trailing
    /// whitespace that would otherwise be dropped by word processors.
    pub(crate) fn set_own_text(&mut self, value: &str) {
        self.children.clear();
        if !value.is_empty() {
            self.children.push(Node::Text(TextNode::from_value(value)));
            self.self_closing = false;
        }
        let needs_preserve = value.starts_with(char::is_whitespace)
            || value.ends_with(char::is_whitespace);
        if needs_preserve && self.attribute(XML_SPACE).is_none() {
            self.start.push_attribute(("xml:space", "preserve"));
        }
    }

    fn empty(name: &'static str) -> Self {
        Self::new(BytesStart::new(name), true)
    }

    /// Splits every `w:t` below this element whose text holds `\n`, `\r` or
    /// `\t` into text segments separated by `<w:br/>` and `<w:tab/>`, in place.
    /// Nested paragraphs are left alone. `\r\n` is one break.
    pub(crate) fn expand_breaks(&mut self) {
        for node in std::mem::take(&mut self.children) {
            match node {
                Node::Element(element) if element.is(W_T) => {
                    let text = element.own_text();
                    if text.contains(BREAK_CHARS) {
                        split_text_element(&element, &text, &mut self.children);
                    } else {
                        self.children.push(Node::Element(element));
                    }
                }
                Node::Element(mut element) => {
                    if !element.is(W_P) {
                        element.expand_breaks();
                    }
                    self.children.push(Node::Element(element));
                }
                other => self.children.push(other),
            }
        }
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> std::io::Result<()> {
        if self.self_closing && self.children.is_empty() {
            return writer.write_event(Event::Empty(self.start.borrow()));
        }
        writer.write_event(Event::Start(self.start.borrow()))?;
        write_nodes(&self.children, writer)?;
        let name = self.start.name();
        writer.write_event(Event::End(BytesEnd::new(String::from_utf8_lossy(
            name.as_ref(),
        ))))
    }
}

fn split_text_element(template: &Element, text: &str, out: &mut Vec<Node>) {
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let separator = match ch {
            '\t' => "w:tab",
            '\n' => "w:br",
            '\r' => {
                chars.next_if_eq(&'\n');
                "w:br"
            }
            _ => {
                segment.push(ch);
                continue;
            }
        };
        push_segment(template, &mut segment, out);
        out.push(Node::Element(Element::empty(separator)));
    }
    push_segment(template, &mut segment, out);
}

fn push_segment(template: &Element, segment: &mut String, out: &mut Vec<Node>) {
    if segment.is_empty() {
        return;
    }
    let mut element = template.clone();
    element.set_own_text(segment);
    out.push(Node::Element(element));
    segment.clear();
}

/// A parsed XML part: prolog nodes plus the root element.
#[derive(Debug, Clone)]
pub(crate) struct XmlTree {
    nodes: Vec<Node>,
}

impl XmlTree {
    pub(crate) fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut top: Vec<Node> = Vec::new();

        loop {
            let event = reader.read_event()?;
            let siblings = match stack.last_mut() {
                Some(parent) => &mut parent.children,
                None => &mut top,
            };
            match event {
                Event::Start(start) => stack.push(Element::new(start.into_owned(), false)),
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        let siblings = match stack.last_mut() {
                            Some(parent) => &mut parent.children,
                            None => &mut top,
                        };
                        siblings.push(Node::Element(element));
                    }
                }
                Event::Empty(start) => {
                    siblings.push(Node::Element(Element::new(start.into_owned(), true)));
                }
                Event::Text(text) => {
                    let raw = text.decode().map_err(quick_xml::Error::from)?;
                    push_raw_text(siblings, &raw);
                }
                Event::GeneralRef(reference) => {
                    let name = reference.decode().map_err(quick_xml::Error::from)?;
                    push_raw_text(siblings, &format!("&{name};"));
                }
                Event::Eof => break,
                other => siblings.push(Node::Other(other.into_owned())),
            }
        }

        if let Some(open) = stack.pop() {
            let name = String::from_utf8_lossy(open.start.name().as_ref()).into_owned();
            return Err(quick_xml::errors::IllFormedError::MissingEndTag(name).into());
        }
        Ok(Self { nodes: top })
    }

    pub(crate) fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub(crate) fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        write_nodes(&self.nodes, &mut writer)?;
        Ok(writer.into_inner())
    }
}

fn push_raw_text(siblings: &mut Vec<Node>, raw: &str) {
    if let Some(Node::Text(last)) = siblings.last_mut() {
        last.raw.push_str(raw);
    } else {
        siblings.push(Node::Text(TextNode {
            raw: raw.to_string(),
        }));
    }
}

fn write_nodes<W: std::io::Write>(nodes: &[Node], writer: &mut Writer<W>) -> std::io::Result<()> {
    for node in nodes {
        match node {
            Node::Element(element) => element.write(writer)?,
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(text.raw.as_str())))?;
            }
            Node::Other(event) => writer.write_event(event.borrow())?,
        }
    }
    Ok(())
}
