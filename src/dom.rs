//! In-memory page document the controllers write into.
//!
//! Elements are addressed by their `id`. A controller only changes element
//! content, visibility, classes and attributes, the page title and the head
//! meta tags; templates read the result back when the page is served.

use crate::lazy::LazyImages;
use askama_escape::{escape, Html};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    inner_html: String,
    hidden: bool,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    deferred_images: Vec<String>,
}

impl Element {
    pub fn set_text<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.inner_html = escape(text.as_ref(), Html).to_string();
        self.deferred_images.clear();
        self
    }

    pub fn set_html<S: Into<String>>(&mut self, html: S) -> &mut Self {
        self.inner_html = html.into();
        self.deferred_images.clear();
        self
    }

    /// Replaces the content with markup holding the given deferred images.
    pub fn set_html_with_images<S: Into<String>>(
        &mut self,
        html: S,
        images: Vec<String>,
    ) -> &mut Self {
        self.inner_html = html.into();
        self.deferred_images = images;
        self
    }

    pub fn html(&self) -> &str {
        &self.inner_html
    }

    pub fn show(&mut self) -> &mut Self {
        self.hidden = false;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.hidden = true;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Replaces the whole class list.
    pub fn set_class<S: Into<String>>(&mut self, class: S) -> &mut Self {
        self.classes.clear();
        self.classes.insert(class.into());
        self
    }

    pub fn add_class<S: Into<String>>(&mut self, class: S) -> &mut Self {
        self.classes.insert(class.into());
        self
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.classes.remove(class);
        self
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) -> &mut Self {
        if on {
            self.add_class(class)
        } else {
            self.remove_class(class)
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn class_list(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    pub fn set_attr<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn deferred_images(&self) -> &[String] {
        &self.deferred_images
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaKey {
    Name(String),
    Property(String),
}

impl MetaKey {
    pub fn name<S: Into<String>>(s: S) -> Self {
        MetaKey::Name(s.into())
    }

    pub fn property<S: Into<String>>(s: S) -> Self {
        MetaKey::Property(s.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    key: MetaKey,
    content: String,
}

impl MetaTag {
    pub fn key(&self) -> &MetaKey {
        &self.key
    }

    /// Identifying attribute, `name` or `property`.
    pub fn attribute(&self) -> &'static str {
        match self.key {
            MetaKey::Name(_) => "name",
            MetaKey::Property(_) => "property",
        }
    }

    pub fn identifier(&self) -> &str {
        match &self.key {
            MetaKey::Name(n) | MetaKey::Property(n) => n,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    meta: Vec<MetaTag>,
    elements: BTreeMap<String, Element>,
    lazy: LazyImages,
}

impl Document {
    pub fn new<S: Into<String>>(title: S, ids: &[&str]) -> Self {
        Document {
            title: title.into(),
            elements: ids
                .iter()
                .map(|id| (id.to_string(), Element::default()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn el(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    pub fn html(&self, id: &str) -> &str {
        self.element(id).map(Element::html).unwrap_or_default()
    }

    pub fn has_content(&self, id: &str) -> bool {
        !self.html(id).is_empty()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.element(id).map(Element::is_hidden).unwrap_or(false)
    }

    pub fn classes(&self, id: &str) -> String {
        self.element(id).map(Element::class_list).unwrap_or_default()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn attr(&self, id: &str, name: &str) -> &str {
        self.element(id)
            .and_then(|e| e.attr(name))
            .unwrap_or_default()
    }

    pub fn meta_tags(&self) -> &[MetaTag] {
        &self.meta
    }

    pub fn meta(&self, key: &MetaKey) -> Option<&str> {
        self.meta
            .iter()
            .find(|t| &t.key == key)
            .map(MetaTag::content)
    }

    /// Updates the tag identified by `key`, or appends it when absent.
    pub fn upsert_meta<S: Into<String>>(&mut self, key: MetaKey, content: S) {
        let content = content.into();
        match self.meta.iter_mut().find(|t| t.key == key) {
            Some(tag) => tag.content = content,
            None => self.meta.push(MetaTag { key, content }),
        }
    }

    /// Puts every deferred image currently in the document under observation.
    pub fn lazy_load_images(&mut self) {
        let Document { elements, lazy, .. } = self;
        for id in elements.values().flat_map(|e| e.deferred_images.iter()) {
            lazy.observe(id.as_str());
        }
    }

    pub fn lazy(&self) -> &LazyImages {
        &self.lazy
    }
}
