//! In-memory element tree
//!
//! Element names are stored without their namespace prefix. Attribute
//! names keep the prefix as written so `xsi:` and `xml:` attributes can be
//! told apart from plain ones.

/// A node below an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An attribute as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// Name without prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Prefix, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn push_attribute(&mut self, name: String, value: String) {
        self.attributes.push(Attribute { name, value });
    }

    pub(crate) fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Local name of the element
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the first attribute whose local name matches
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name() == name)
            .map(|a| a.value.as_str())
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// True if any child is an element
    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenation of the direct text children
    pub fn direct_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Concatenation of every text node below this element, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Every element below this one, pre-order, excluding self
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();
        Descendants { stack }
    }

    /// Descendants with the given local name, in document order
    pub fn descendants_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |e| e.name == name)
    }

    /// First descendant with the given local name
    pub fn first_descendant(&self, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.name == name)
    }
}

/// Pre-order iterator over descendant elements
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let first = self.stack.len();
        self.stack.extend(next.child_elements());
        self.stack[first..].reverse();
        Some(next)
    }
}

/// A parsed document: exactly one root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub(crate) fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Elements with the given local name anywhere in the document,
    /// the root included, in document order
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        std::iter::once(&self.root)
            .filter(move |e| e.name() == name)
            .chain(self.root.descendants_named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, text: &str) -> Element {
        let mut e = Element::new(name);
        e.push_child(Node::Text(text.to_string()));
        e
    }

    fn sample() -> Element {
        // <a><b><c>1</c></b><c>2</c><d/></a>
        let mut b = Element::new("b");
        b.push_child(Node::Element(leaf("c", "1")));
        let mut a = Element::new("a");
        a.push_child(Node::Element(b));
        a.push_child(Node::Element(leaf("c", "2")));
        a.push_child(Node::Element(Element::new("d")));
        a
    }

    #[test]
    fn test_descendants_preorder() {
        let a = sample();
        let names: Vec<&str> = a.descendants().map(|e| e.name()).collect();
        assert_eq!(names, vec!["b", "c", "c", "d"]);
    }

    #[test]
    fn test_descendants_named_document_order() {
        let a = sample();
        let texts: Vec<String> = a.descendants_named("c").map(|e| e.text_content()).collect();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_text_content_concatenates() {
        let a = sample();
        assert_eq!(a.text_content(), "12");
        assert_eq!(a.direct_text(), "");
    }

    #[test]
    fn test_attribute_lookup_by_local_name() {
        let mut e = Element::new("course");
        e.push_attribute("xsi:noNamespaceSchemaLocation".into(), "t.xsd".into());
        e.push_attribute("id".into(), "C1".into());

        assert_eq!(e.attribute("id"), Some("C1"));
        assert_eq!(e.attribute("noNamespaceSchemaLocation"), Some("t.xsd"));
        assert_eq!(e.attributes()[0].prefix(), Some("xsi"));
        assert_eq!(e.attributes()[1].prefix(), None);
        assert_eq!(e.attribute("missing"), None);
    }

    #[test]
    fn test_document_elements_named_includes_root() {
        let doc = Document::new(sample());
        assert_eq!(doc.elements_named("a").count(), 1);
        assert_eq!(doc.elements_named("c").count(), 2);
    }
}
