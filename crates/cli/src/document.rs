//! Menu definition documents.
//!
//! A document describes a menu tree in YAML or JSON. Items can carry simple
//! host behaviors that need no code:
//!
//! - `toggle: <flag>` renders `"<label>: on|off"` and flips the named flag on
//!   activation.
//! - `message: <text>` logs the text at info level on activation.
//! - `locked: true` refuses to open the item's submenu.
//!
//! Toggle and message items never descend, even when they have children.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tickmenu_menu::{Activation, MenuError, MenuTree, NodeId, NodeSpec, TreeBuilder};
use tracing::info;

/// Menu shipped with the binary, used when no document is given.
pub const DEMO_MENU: &str = include_str!("../menus/demo.yaml");

/// Errors raised while loading or building a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read menu document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML menu document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON menu document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("menu document produced an invalid tree: {0}")]
    Tree(#[from] MenuError),
}

/// Root of a menu document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDocument {
    /// Label of the root level, shown as the first breadcrumb.
    pub title: String,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

/// A single menu item and its submenu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
}

/// Named boolean flags shared between toggle items and the host.
#[derive(Debug, Clone, Default)]
pub struct HostFlags {
    flags: Rc<RefCell<IndexMap<String, bool>>>,
}

impl HostFlags {
    pub fn get(&self, name: &str) -> bool {
        self.flags.borrow().get(name).copied().unwrap_or(false)
    }

    /// Flips a flag and returns its new value.
    pub fn flip(&self, name: &str) -> bool {
        let mut flags = self.flags.borrow_mut();
        let value = flags.entry(name.to_string()).or_insert(false);
        *value = !*value;
        *value
    }

    /// Current flag values in first-use order.
    pub fn snapshot(&self) -> Vec<(String, bool)> {
        self.flags.borrow().iter().map(|(name, value)| (name.clone(), *value)).collect()
    }
}

impl MenuDocument {
    pub fn from_yaml(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a document, choosing JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json { Self::from_json(&text) } else { Self::from_yaml(&text) }
    }

    pub fn demo() -> Result<Self, DocumentError> {
        Self::from_yaml(DEMO_MENU)
    }

    /// Builds a menu tree whose toggle items read and flip `flags`.
    pub fn build(&self, flags: &HostFlags) -> Result<MenuTree, DocumentError> {
        let mut builder = TreeBuilder::new();
        let children: Vec<NodeId> = self.items.iter().map(|item| add_item(&mut builder, item, flags)).collect();
        Ok(builder.finish(self.title.clone(), children)?)
    }
}

fn add_item(builder: &mut TreeBuilder, item: &ItemDocument, flags: &HostFlags) -> NodeId {
    let children: Vec<NodeId> = item.items.iter().map(|child| add_item(builder, child, flags)).collect();
    let mut spec = NodeSpec::new(item.label.clone()).children(children);

    if let Some(flag) = &item.toggle {
        let reader = flags.clone();
        let name = flag.clone();
        spec = spec.label_fn(move |context| {
            let state = if reader.get(&name) { "on" } else { "off" };
            format!("{}: {state}", context.text())
        });
        let writer = flags.clone();
        let name = flag.clone();
        spec = spec.on_action(move |context| {
            let value = writer.flip(&name);
            info!(flag = %name, value, item = context.text(), "Toggled host flag");
        });
    } else if let Some(message) = &item.message {
        let message = message.clone();
        spec = spec.on_action(move |context| info!(item = context.text(), "{message}"));
    } else if item.locked {
        spec = spec.activation(Activation::Stay);
    }

    builder.add(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickmenu_menu::render::{self, DEFAULT_SEPARATOR};
    use tickmenu_menu::{MenuInput, Navigator, RenderOptions, Transition};

    const SAMPLE: &str = r#"
title: Main
items:
  - label: Antenna
    toggle: antenna
  - label: Power
    items:
      - label: Reactor
  - label: Vault
    locked: true
    items:
      - label: Gold
"#;

    #[test]
    fn parses_nested_yaml() {
        let document = MenuDocument::from_yaml(SAMPLE).unwrap();
        assert_eq!(document.title, "Main");
        assert_eq!(document.items.len(), 3);
        assert_eq!(document.items[1].items[0].label, "Reactor");
        assert!(document.items[2].locked);
    }

    #[test]
    fn json_and_yaml_agree() {
        let yaml = MenuDocument::from_yaml(SAMPLE).unwrap();
        let json = MenuDocument::from_json(&serde_json::to_string(&yaml).unwrap()).unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn toggles_flip_flags_and_relabel() {
        let flags = HostFlags::default();
        let tree = MenuDocument::from_yaml(SAMPLE).unwrap().build(&flags).unwrap();
        let mut navigator = Navigator::new(tree);
        let options = RenderOptions::new(30, 7);

        assert!(render::render(&navigator, &options).contains("> Antenna: off <"));
        navigator.apply(MenuInput::Activate);
        assert!(flags.get("antenna"));
        assert!(render::render(&navigator, &options).contains("> Antenna: on <"));
        assert_eq!(flags.snapshot(), vec![("antenna".to_string(), true)]);
    }

    #[test]
    fn plain_items_descend_and_locked_items_stay() {
        let flags = HostFlags::default();
        let mut navigator = Navigator::new(MenuDocument::from_yaml(SAMPLE).unwrap().build(&flags).unwrap());

        navigator.apply(MenuInput::Down);
        assert!(matches!(navigator.apply(MenuInput::Activate), Transition::Descended { .. }));
        assert_eq!(
            render::breadcrumb(&navigator, DEFAULT_SEPARATOR),
            format!("Main{DEFAULT_SEPARATOR}Power")
        );

        navigator.apply(MenuInput::Back);
        navigator.apply(MenuInput::Down);
        navigator.apply(MenuInput::Down);
        assert!(matches!(navigator.apply(MenuInput::Activate), Transition::Stayed { .. }));
        assert_eq!(navigator.depth(), 1);
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("menu.json");
        fs::write(&json_path, r#"{ "title": "Root", "items": [{ "label": "Only" }] }"#).unwrap();
        let document = MenuDocument::load(&json_path).unwrap();
        assert_eq!(document.items[0].label, "Only");

        let missing = MenuDocument::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, DocumentError::Io { .. }));
    }

    #[test]
    fn demo_menu_builds() {
        let flags = HostFlags::default();
        let tree = MenuDocument::demo().unwrap().build(&flags).unwrap();
        assert_eq!(tree.label(tree.root()), "Main");
        assert!(tree.children(tree.root()).len() > 5);
    }
}
