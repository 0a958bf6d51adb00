//! Minimal in-crate host for unit tests.

use std::collections::BTreeMap;

use boxslide_backend::{AttributeStore, Dom, FrameScheduler, NodeTree, StyleInspector, StyleWriter};
use boxslide_core::{BoxModel, BoxProperty, ProgressToken};

#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    pub natural: BoxModel,
    pub parent: Option<usize>,
    pub attrs: BTreeMap<String, String>,
    pub inline: BTreeMap<String, String>,
}

/// Tree mutation the host refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refuse {
    Clone,
    Append,
    Remove,
}

/// Flat element list; index 0 is a parent every panel can hang from.
#[derive(Debug, Default)]
pub(crate) struct MockHost {
    pub nodes: Vec<Node>,
    pub frames: Vec<ProgressToken>,
    pub attached_clones: usize,
    pub refuse: Option<Refuse>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            ..Self::default()
        }
    }

    pub fn panel(&mut self, natural: BoxModel, hidden: bool) -> usize {
        let mut node = Node {
            natural,
            parent: Some(0),
            ..Node::default()
        };
        if hidden {
            node.attrs.insert("hidden".to_owned(), String::new());
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn inline(&self, el: usize, css_name: &str) -> Option<&str> {
        self.nodes[el].inline.get(css_name).map(String::as_str)
    }
}

impl Dom for MockHost {
    type Element = usize;
    type Error = String;

    fn is_element(&self, el: &usize) -> bool {
        *el > 0 && *el < self.nodes.len()
    }
}

impl StyleInspector for MockHost {
    fn computed_style(&self, el: &usize, css_name: &str) -> Option<String> {
        let node = self.nodes.get(*el)?;
        if css_name == "display" {
            return Some(if let Some(mode) = node.inline.get("display") {
                mode.clone()
            } else if node.attrs.contains_key("hidden") {
                "none".to_owned()
            } else {
                "block".to_owned()
            });
        }
        let prop = BoxProperty::ALL.into_iter().find(|p| p.css_name() == css_name)?;
        Some(match node.inline.get(css_name) {
            Some(v) => v.clone(),
            None => format!("{}px", node.natural.get(prop)),
        })
    }
}

impl StyleWriter for MockHost {
    fn set_inline(&mut self, el: &usize, css_name: &str, value: &str) {
        self.nodes[*el]
            .inline
            .insert(css_name.to_owned(), value.to_owned());
    }

    fn clear_inline(&mut self, el: &usize) {
        self.nodes[*el].inline.clear();
    }
}

impl AttributeStore for MockHost {
    fn get_attr(&self, el: &usize, name: &str) -> Option<String> {
        self.nodes.get(*el)?.attrs.get(name).cloned()
    }

    fn set_attr(&mut self, el: &usize, name: &str, value: &str) {
        self.nodes[*el]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attr(&mut self, el: &usize, name: &str) {
        self.nodes[*el].attrs.remove(name);
    }
}

impl NodeTree for MockHost {
    fn clone_deep(&mut self, el: &usize) -> Result<usize, String> {
        if self.refuse == Some(Refuse::Clone) {
            return Err("clone refused".to_owned());
        }
        let mut copy = self.nodes.get(*el).cloned().ok_or("no such node")?;
        copy.parent = None;
        self.nodes.push(copy);
        Ok(self.nodes.len() - 1)
    }

    fn parent(&self, el: &usize) -> Option<usize> {
        self.nodes.get(*el)?.parent
    }

    fn append_child(&mut self, parent: &usize, child: &usize) -> Result<(), String> {
        if self.refuse == Some(Refuse::Append) {
            return Err("append refused".to_owned());
        }
        self.nodes[*child].parent = Some(*parent);
        self.attached_clones += 1;
        Ok(())
    }

    fn remove_child(&mut self, parent: &usize, child: &usize) -> Result<(), String> {
        if self.refuse == Some(Refuse::Remove) {
            return Err("remove refused".to_owned());
        }
        if self.nodes[*child].parent != Some(*parent) {
            return Err("not a child".to_owned());
        }
        self.nodes[*child].parent = None;
        self.attached_clones -= 1;
        Ok(())
    }
}

impl FrameScheduler for MockHost {
    fn request_frame(&mut self, token: ProgressToken) {
        self.frames.push(token);
    }
}
