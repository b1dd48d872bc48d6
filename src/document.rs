// SPDX-License-Identifier: PMPL-1.0-or-later

//! Presentation-tree contract and an in-memory implementation.
//!
//! The controller never owns the page layout. It talks to whatever renders
//! the page through [`Document`], a deliberately small surface: look nodes
//! up by id or class, read and write text, toggle classes, flip display,
//! and swap a region's markup. Every mutating call ignores ids it does not
//! know, so a page missing an optional element never faults an operation.
//!
//! [`MemoryDocument`] is the reference implementation. It backs the CLI and
//! the tests, and can be loaded from a YAML or JSON page manifest.

use crate::i18n::{Locale, LocalizedText};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Operations the controller needs from the rendered page.
///
/// Selection methods return owned ids in document order so callers can
/// mutate while iterating.
pub trait Document {
    /// Id of the document root (the `<body>` equivalent).
    fn root(&self) -> String;
    fn contains(&self, id: &str) -> bool;

    /// Every node carrying `class`.
    fn select_class(&self, class: &str) -> Vec<String>;
    /// Every descendant of any node carrying `ancestor_class`.
    fn select_within(&self, ancestor_class: &str) -> Vec<String>;
    /// Every node carrying both an English and a Spanish variant.
    fn select_localized(&self) -> Vec<String>;
    /// First direct child of `id` carrying `class`.
    fn child_with_class(&self, id: &str, class: &str) -> Option<String>;

    fn localized(&self, id: &str) -> Option<LocalizedText>;

    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&mut self, id: &str, text: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;
    fn toggle_class(&mut self, id: &str, class: &str, on: bool);
    /// Replace the whole class list.
    fn replace_classes(&mut self, id: &str, classes: &[&str]);
    fn classes(&self, id: &str) -> Vec<String>;

    /// `false` once the node has been removed from layout.
    fn is_displayed(&self, id: &str) -> bool;
    fn set_displayed(&mut self, id: &str, displayed: bool);

    /// Current contents of an input field.
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&mut self, id: &str, value: &str);

    /// Replacement markup of a region, if it has been swapped out.
    fn markup(&self, id: &str) -> Option<String>;
    fn replace_markup(&mut self, id: &str, markup: &str);
}

// ─── In-memory tree ─────────────────────────────────────────────────

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "displayed_by_default")]
    pub displayed: bool,
    #[serde(default)]
    pub localized: Option<LocalizedText>,
    #[serde(default)]
    pub markup: Option<String>,
}

fn displayed_by_default() -> bool {
    true
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            localized: None,
            markup: None,
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach both variants and show the English one, as served HTML does.
    pub fn bilingual(mut self, en: impl Into<String>, es: impl Into<String>) -> Self {
        let localized = LocalizedText::pair(en, es);
        if let Some(primary) = localized.resolve(Locale::En) {
            self.text = primary.to_string();
        }
        self.localized = Some(localized);
        self
    }

    pub fn localized(mut self, localized: LocalizedText) -> Self {
        self.localized = Some(localized);
        self
    }

    /// Carries both variant keys; empty values still count.
    fn is_dual_language(&self) -> bool {
        self.localized
            .as_ref()
            .map(|l| l.has_variant(Locale::En) && l.has_variant(Locale::Es))
            .unwrap_or(false)
    }
}

/// Flat, document-ordered element list with parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    root: String,
    nodes: Vec<Node>,
}

impl MemoryDocument {
    /// A document holding only its root node.
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            nodes: vec![Node::new(root.clone())],
            root,
        }
    }

    /// Append a node. Nodes without a parent are attached to the root.
    pub fn with(mut self, node: Node) -> Self {
        self.push(node);
        self
    }

    pub fn push(&mut self, mut node: Node) {
        if node.parent.is_none() && node.id != self.root {
            node.parent = Some(self.root.clone());
        }
        match self.position(&node.id) {
            Some(index) => self.nodes[index] = node,
            None => self.nodes.push(node),
        }
    }

    /// Load a page manifest; `.yaml`/`.yml` as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading page manifest {}", path.display()))?;
        let mut document: MemoryDocument = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml page manifest {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing json page manifest {}", path.display()))?
        };
        if document.position(&document.root.clone()).is_none() {
            document.nodes.insert(0, Node::new(document.root.clone()));
        }
        Ok(document)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn remove(&mut self, id: &str) {
        self.nodes.retain(|node| node.id != id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    fn is_descendant_of(&self, node: &Node, ancestor: &str) -> bool {
        let mut current = node.parent.as_deref();
        // Bounded by node count so a cyclic manifest cannot loop forever.
        for _ in 0..self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.node(id).and_then(|n| n.parent.as_deref()),
                None => return false,
            }
        }
        false
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl Document for MemoryDocument {
    fn root(&self) -> String {
        self.root.clone()
    }

    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn select_class(&self, class: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| node.classes.iter().any(|c| c == class))
            .map(|node| node.id.clone())
            .collect()
    }

    fn select_within(&self, ancestor_class: &str) -> Vec<String> {
        let ancestors = self.select_class(ancestor_class);
        self.nodes
            .iter()
            .filter(|node| ancestors.iter().any(|a| self.is_descendant_of(node, a)))
            .map(|node| node.id.clone())
            .collect()
    }

    fn select_localized(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| node.is_dual_language())
            .map(|node| node.id.clone())
            .collect()
    }

    fn child_with_class(&self, id: &str, class: &str) -> Option<String> {
        self.nodes
            .iter()
            .find(|node| {
                node.parent.as_deref() == Some(id) && node.classes.iter().any(|c| c == class)
            })
            .map(|node| node.id.clone())
    }

    fn localized(&self, id: &str) -> Option<LocalizedText> {
        self.node(id).and_then(|node| node.localized.clone())
    }

    fn text(&self, id: &str) -> Option<String> {
        self.node(id).map(|node| node.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.to_string();
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.node(id)
            .map(|node| node.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(node) = self.node_mut(id) {
            let present = node.classes.iter().any(|c| c == class);
            if on && !present {
                node.classes.push(class.to_string());
            } else if !on && present {
                node.classes.retain(|c| c != class);
            }
        }
    }

    fn replace_classes(&mut self, id: &str, classes: &[&str]) {
        if let Some(node) = self.node_mut(id) {
            node.classes = classes.iter().map(|c| c.to_string()).collect();
        }
    }

    fn classes(&self, id: &str) -> Vec<String> {
        self.node(id)
            .map(|node| node.classes.clone())
            .unwrap_or_default()
    }

    fn is_displayed(&self, id: &str) -> bool {
        self.node(id).map(|node| node.displayed).unwrap_or(false)
    }

    fn set_displayed(&mut self, id: &str, displayed: bool) {
        if let Some(node) = self.node_mut(id) {
            node.displayed = displayed;
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        self.node(id).map(|node| node.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.value = value.to_string();
        }
    }

    fn markup(&self, id: &str) -> Option<String> {
        self.node(id).and_then(|node| node.markup.clone())
    }

    fn replace_markup(&mut self, id: &str, markup: &str) {
        if let Some(node) = self.node_mut(id) {
            node.markup = Some(markup.to_string());
        }
    }
}

// ─── Built-in page ──────────────────────────────────────────────────

/// Sections of the built-in page, in navigation order.
pub const STANDARD_SECTIONS: &[(&str, &str, &str)] = &[
    ("home", "Home", "Inicio"),
    ("story", "Our Story", "Nuestra Historia"),
    ("schedule", "Schedule", "Horario"),
    ("travel", "Travel", "Viaje"),
    ("gallery", "Gallery", "Galería"),
];

/// The event page as served: gate overlay, navigation, sections, gallery,
/// name triggers and the countdown block, using the default ids and
/// classes of [`crate::config::PageConfig`].
pub fn standard_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new("body");

    doc.push(Node::new("lockScreen").class("jl-lock-screen"));
    doc.push(Node::new("lockTitle").parent("lockScreen").bilingual(
        "Enter the password to continue",
        "Ingresa la contraseña para continuar",
    ));
    doc.push(Node::new("lockBtnEnglish").parent("lockScreen").text("English"));
    doc.push(Node::new("lockBtnSpanish").parent("lockScreen").text("Español"));
    doc.push(Node::new("lockPassword").parent("lockScreen"));
    doc.push(
        Node::new("unlockBtn")
            .parent("lockScreen")
            .bilingual("Enter", "Entrar"),
    );
    doc.push(
        Node::new("lockError")
            .parent("lockScreen")
            .class("jl-lock-error")
            .bilingual("Incorrect password", "Contraseña incorrecta"),
    );

    doc.push(Node::new("btnEnglish").text("English"));
    doc.push(Node::new("btnSpanish").text("Español"));
    doc.push(Node::new("nameLily").text("Lily"));
    doc.push(Node::new("nameJames").text("James"));

    doc.push(Node::new("navLinks").class("jl-nav-links"));
    for (id, en, es) in STANDARD_SECTIONS {
        doc.push(
            Node::new(format!("nav-{id}"))
                .parent("navLinks")
                .bilingual(*en, *es),
        );
    }
    for (id, en, es) in STANDARD_SECTIONS {
        let page = format!("page-{id}");
        doc.push(Node::new(page.clone()).class("jl-page"));
        doc.push(
            Node::new(format!("{page}-title"))
                .parent(page)
                .bilingual(*en, *es),
        );
    }

    doc.push(Node::new("jlCountdown").parent("page-home"));
    for id in ["jlDays", "jlHours", "jlMins", "jlSecs"] {
        doc.push(Node::new(id).parent("jlCountdown"));
    }

    let photos = [
        ("photo-1", "The proposal", "La propuesta"),
        ("photo-2", "Our first trip", "Nuestro primer viaje"),
    ];
    for (id, en, es) in photos {
        doc.push(
            Node::new(id)
                .parent("page-gallery")
                .class("jl-simple-photo")
                .localized(LocalizedText::pair(en, es)),
        );
        doc.push(
            Node::new(format!("{id}-caption"))
                .parent(id)
                .class("jl-simple-caption")
                .text(en),
        );
    }

    doc
}
