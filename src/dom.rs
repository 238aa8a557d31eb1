use std::collections::BTreeMap;

/// A node in the document tree: either an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One element of the page: a tag, its attributes, and its children.
///
/// This is just enough of a DOM for the translation pass. Elements opt into
/// translation via an attribute holding a dot-delimited key; everything else
/// the crate does to the tree goes through the small set of queries and
/// mutations below.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the `class` attribute contains `class` as one of its
    /// whitespace-separated tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
    }

    /// Drops one token from the `class` attribute; other tokens stay.
    pub fn remove_class(&mut self, class: &str) {
        if let Some(classes) = self.attrs.get_mut("class") {
            *classes = classes
                .split_whitespace()
                .filter(|token| *token != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    /// Concatenated text of this element and all its descendants, the way
    /// `textContent` reads in a browser.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, into: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(run) => into.push_str(run),
                Node::Element(el) => el.collect_text(into),
            }
        }
    }

    /// Replaces every child with a single text run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Removes and returns the first child element matching `pred`.
    pub fn detach_child(&mut self, pred: impl Fn(&Element) -> bool) -> Option<Element> {
        let index = self.children.iter().position(|child| match child {
            Node::Element(el) => pred(el),
            Node::Text(_) => false,
        })?;
        match self.children.remove(index) {
            Node::Element(el) => Some(el),
            Node::Text(_) => unreachable!("position matched an element"),
        }
    }

    /// Visits this element and every descendant element, in document order.
    pub fn walk(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            if let Node::Element(el) = child {
                el.walk(f);
            }
        }
    }

    /// Mutable variant of [`Element::walk`].
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.walk_mut(f);
            }
        }
    }

    /// Finds the first element (self included) whose `id` attribute is `id`.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_by_id_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_by_id(id) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// The page: a title plus the element tree the translation pass renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            title: String::new(),
            root,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// A small stand-in page used by the demo binary and tests: a nav, a
    /// hero section, a contact button with an icon child, the language
    /// indicator, and an open language dropdown.
    pub fn placeholder_page() -> Self {
        let root = Element::new("body")
            .with_child(
                Element::new("nav")
                    .with_child(Element::new("a").with_attr("data-i18n", "nav.home"))
                    .with_child(Element::new("a").with_attr("data-i18n", "nav.about"))
                    .with_child(
                        Element::new("a")
                            .with_attr("data-i18n", "nav.contact")
                            .with_child(Element::new("span").with_class("icon").with_text("✉"))
                            .with_text("Contact"),
                    ),
            )
            .with_child(
                Element::new("section")
                    .with_child(Element::new("h1").with_attr("data-i18n", "hero.title"))
                    .with_child(Element::new("p").with_attr("data-i18n", "hero.subtitle")),
            )
            .with_child(
                Element::new("div")
                    .with_id("lang-dropdown")
                    .with_class("dropdown open")
                    .with_child(Element::new("button").with_id("current-lang")),
            )
            .with_child(Element::new("footer").with_attr("data-i18n", "footer.copyright"));
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_descendants() {
        let el = Element::new("a")
            .with_child(Element::new("span").with_text("✉"))
            .with_text(" Contact");
        assert_eq!(el.text_content(), "✉ Contact");
    }

    #[test]
    fn set_text_drops_existing_children() {
        let mut el = Element::new("h1")
            .with_child(Element::new("em").with_text("old"))
            .with_text(" text");
        el.set_text("new");
        assert_eq!(el.children, vec![Node::Text("new".to_string())]);
    }

    #[test]
    fn detach_child_removes_the_first_match_only() {
        let mut el = Element::new("a")
            .with_text("before ")
            .with_child(Element::new("span").with_class("icon").with_text("✉"))
            .with_child(Element::new("span").with_class("icon").with_text("☎"));
        let icon = el.detach_child(|child| child.has_class("icon")).unwrap();
        assert_eq!(icon.text_content(), "✉");
        assert_eq!(el.text_content(), "before ☎");
    }

    #[test]
    fn class_tokens_are_matched_whole() {
        let mut el = Element::new("div").with_class("dropdown open");
        assert!(el.has_class("open"));
        assert!(!el.has_class("ope"));
        el.remove_class("open");
        assert!(!el.has_class("open"));
        assert!(el.has_class("dropdown"));
    }

    #[test]
    fn find_by_id_searches_depth_first() {
        let mut doc = Document::placeholder_page();
        assert!(doc.root_mut().find_by_id_mut("current-lang").is_some());
        assert!(doc.root_mut().find_by_id_mut("missing").is_none());
    }
}
