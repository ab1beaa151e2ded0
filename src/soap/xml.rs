use crate::utils::error::{DotFitError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Owned XML element tree.
///
/// Parsed elements carry local names plus the resolved namespace URI; elements
/// built for writing carry the literal (possibly prefixed) tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 只含文字內容的元素，例如 `<City>Atlanta</City>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn first_child(&self) -> Option<&XmlElement> {
        self.children.first()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlElement::text)
    }

    /// `xsi:nil="true"`
    pub fn is_nil(&self) -> bool {
        self.attribute("nil") == Some("true")
    }

    pub fn parse_document(xml: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(xml)?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let mut element = Self::new(tag.name());
        element.namespace = tag.namespace().map(str::to_string);

        for attribute in node.attributes() {
            // xsi:nil 以 local name 保存，其餘屬性名稱不含前綴
            if attribute.namespace().is_some() && attribute.namespace() != Some(XSI_NS) {
                continue;
            }
            element
                .attributes
                .push((attribute.name().to_string(), attribute.value().to_string()));
        }

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                if let Some(fragment) = child.text() {
                    text.push_str(fragment);
                }
            }
        }

        let text = text.trim();
        if !text.is_empty() {
            element.text = Some(text.to_string());
        }

        element
    }

    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> std::io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }

    /// Serializes the element as a standalone UTF-8 document.
    pub fn to_document_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| DotFitError::unexpected(format!("serialized XML is not UTF-8: {}", e)))
    }
}
