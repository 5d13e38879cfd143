//! Element data: interned tags, attributes, classes and inline styles.

use crate::props::PropertyMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static TAG_CACHE: Lazy<RwLock<HashMap<Box<str>, Arc<str>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

macro_rules! tags {
    ($($name:ident => $tag:literal),* $(,)?) => {
        $(
            #[doc = concat!("The `", $tag, "` tag.")]
            pub fn $name() -> Self {
                Self::new($tag)
            }
        )*
    };
}

/// An interned, lowercased element tag.
///
/// Every occurrence of one tag shares a single allocation through a
/// process-wide cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    /// Intern `name`, lowercasing it first.
    pub fn new(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if let Some(interned) = TAG_CACHE.read().get(lower.as_str()) {
            return Self(interned.clone());
        }

        let fresh: Arc<str> = Arc::from(lower.as_str());
        let interned = TAG_CACHE
            .write()
            .entry(lower.into_boxed_str())
            .or_insert(fresh)
            .clone();
        Self(interned)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    tags! {
        a => "a",
        div => "div",
        input => "input",
        span => "span",
        video => "video",
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

/// The payload of an element node.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Interned tag.
    pub tag: TagName,
    /// Attributes in document order.
    pub attributes: PropertyMap,
    /// Classes, mirrored into the `class` attribute.
    pub classes: SmallVec<[Arc<str>; 4]>,
    /// Inline style properties.
    pub styles: PropertyMap,
}

impl ElementData {
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: PropertyMap::new(),
            classes: SmallVec::new(),
            styles: PropertyMap::new(),
        }
    }

    /// Set an attribute.
    ///
    /// Names are lowercased; setting `class` replaces the class list.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes = value.split_whitespace().map(Arc::from).collect();
        }
        self.attributes.set(&name, value);
    }

    /// Remove an attribute. Removing `class` clears the class list.
    pub fn remove_attribute(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes.clear();
        }
        self.attributes.remove(&name);
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase())
    }

    /// Check if a class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| &**c == class)
    }

    /// Add a class if absent.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(Arc::from(class));
            self.sync_class_attribute();
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        let count = self.classes.len();
        self.classes.retain(|c| &**c != class);
        if self.classes.len() < count {
            self.sync_class_attribute();
        }
    }

    /// Flip a class; returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Get an inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.set(property, value);
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, property: &str) {
        self.styles.remove(property);
    }

    // The class list is authoritative; the attribute mirrors it.
    fn sync_class_attribute(&mut self) {
        let mut joined = String::new();
        for class in &self.classes {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(class);
        }
        self.attributes.set("class", &joined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_interning() {
        let a = TagName::new("DIV");
        let b = TagName::div();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "div");
        assert!(a == "div");
        assert!(a == "DIV");
    }

    #[test]
    fn test_class_list() {
        let mut elem = ElementData::new(TagName::div());
        elem.add_class("paused");
        elem.add_class("visible");
        elem.add_class("paused");

        assert!(elem.has_class("paused"));
        assert_eq!(elem.classes.len(), 2);
        assert_eq!(elem.attribute("class"), Some("paused visible"));

        elem.remove_class("visible");
        assert!(!elem.has_class("visible"));
        assert_eq!(elem.attribute("class"), Some("paused"));

        assert!(elem.toggle_class("muted"));
        assert!(!elem.toggle_class("muted"));
        assert!(!elem.has_class("muted"));
    }

    #[test]
    fn test_class_attribute_sync() {
        let mut elem = ElementData::new(TagName::div());
        elem.set_attribute("class", "fullscreen active");
        assert!(elem.has_class("fullscreen"));
        assert!(elem.has_class("active"));

        elem.remove_attribute("class");
        assert!(!elem.has_class("fullscreen"));
    }

    #[test]
    fn test_styles() {
        let mut elem = ElementData::new(TagName::a());
        elem.set_style("animation", "none");
        assert_eq!(elem.style("animation"), Some("none"));

        elem.remove_style("animation");
        assert_eq!(elem.style("animation"), None);
    }
}
