#![forbid(unsafe_code)]

//! Deterministic, host-driven in-memory DOM.
//!
//! [`HeadlessDom`] implements every `boxslide-backend` capability without a
//! browser: elements live in an arena, computed styles come from a tiny
//! cascade (inline style over `hidden` over a per-element [`Stylesheet`]),
//! and frames only happen when the caller pumps them with an explicit
//! timestamp.
//!
//! # Cascade
//!
//! - `display`: inline `display`, else `none` if `hidden`, else the sheet.
//! - box-model properties: inline value, else the sheet metric in `px`.
//!   Width and height of an element computed as `display: none` read `auto`.
//! - anything else: the inline value, if set.
//!
//! # Frames
//!
//! `request_frame` queues a token. [`HeadlessDom::run_frame`] drains the
//! queue and ticks each token at the current clock; tokens requested during
//! that frame wait for the next one.

use std::collections::BTreeMap;
use std::fmt;

use boxslide_backend::{AttributeStore, Dom, FrameScheduler, NodeTree, StyleInspector, StyleWriter};
use boxslide_core::box_model::parse_px;
use boxslide_core::{BoxModel, BoxProperty, ProgressToken};
use boxslide_runtime::{Slider, TickOutcome};

/// Arena index of a headless element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Author-level styles of one element: what it looks like with no inline
/// overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub display: String,
    pub metrics: BoxModel,
}

impl Stylesheet {
    /// Displayed as a block with the given natural metrics.
    #[must_use]
    pub fn block(metrics: BoxModel) -> Self {
        Self {
            display: "block".to_owned(),
            metrics,
        }
    }

    /// `display: none` in the sheet, with the given natural metrics.
    #[must_use]
    pub fn hidden(metrics: BoxModel) -> Self {
        Self {
            display: "none".to_owned(),
            metrics,
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::block(BoxModel::NOTHING)
    }
}

/// Headless host error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessError {
    /// The id does not name a live node.
    UnknownNode(NodeId),
    /// `child` is not attached under `parent`.
    NotAChild { parent: NodeId, child: NodeId },
}

impl fmt::Display for HeadlessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node {id}"),
            Self::NotAChild { parent, child } => write!(f, "{child} is not a child of {parent}"),
        }
    }
}

impl std::error::Error for HeadlessError {}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    sheet: Stylesheet,
    alive: bool,
}

impl Node {
    fn new(tag: &str, sheet: Stylesheet) -> Self {
        Self {
            tag: tag.to_owned(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            inline: BTreeMap::new(),
            sheet,
            alive: true,
        }
    }

    fn display(&self) -> &str {
        if let Some(mode) = self.inline.get("display") {
            mode
        } else if self.attrs.contains_key(boxslide_backend::HIDDEN_ATTRIBUTE) {
            "none"
        } else {
            &self.sheet.display
        }
    }
}

/// In-memory DOM with a host-driven frame clock.
#[derive(Debug, Clone)]
pub struct HeadlessDom {
    nodes: Vec<Node>,
    pending: Vec<ProgressToken>,
    frames_requested: usize,
    clones_made: usize,
    now_ms: f64,
}

impl HeadlessDom {
    /// A document with a single `body` root and the clock at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body", Stylesheet::default())],
            pending: Vec::new(),
            frames_requested: 0,
            clones_made: 0,
            now_ms: 0.0,
        }
    }

    /// The document root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str, sheet: Stylesheet) -> NodeId {
        self.nodes.push(Node::new(tag, sheet));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and attach it under `parent`.
    pub fn spawn(&mut self, parent: NodeId, tag: &str, sheet: Stylesheet) -> NodeId {
        let id = self.create(tag, sheet);
        if self.attach(parent, id).is_err() {
            tracing::warn!(target: "boxslide.web", %parent, "spawned element left detached");
        }
        id
    }

    /// Destroy `id`: it stops being an element and every capability ignores it.
    pub fn forget(&mut self, id: NodeId) {
        self.detach(id);
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.alive = false;
        }
    }

    /// Author styles of `id`.
    pub fn sheet_mut(&mut self, id: NodeId) -> Option<&mut Stylesheet> {
        self.node_mut(id).map(|n| &mut n.sheet)
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attrs.get(name).map(String::as_str)
    }

    /// Inline style value by CSS name.
    #[must_use]
    pub fn inline_style(&self, id: NodeId, css_name: &str) -> Option<&str> {
        self.node(id)?.inline.get(css_name).map(String::as_str)
    }

    /// Inline pixel value of a box-model property.
    #[must_use]
    pub fn inline_px(&self, id: NodeId, prop: BoxProperty) -> Option<f64> {
        self.inline_style(id, prop.css_name()).map(parse_px)
    }

    /// Number of inline style declarations on `id`.
    #[must_use]
    pub fn inline_len(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |n| n.inline.len())
    }

    /// Tokens waiting for the next frame.
    #[must_use]
    pub fn pending_frames(&self) -> &[ProgressToken] {
        &self.pending
    }

    /// Total `request_frame` calls so far.
    #[must_use]
    pub const fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    /// Total deep clones made so far.
    #[must_use]
    pub const fn clones_made(&self) -> usize {
        self.clones_made
    }

    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Set the frame clock.
    pub fn set_now(&mut self, ms: f64) {
        self.now_ms = ms;
    }

    /// Advance the frame clock by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms;
    }

    /// Run one frame at the current clock: tick every queued token once.
    pub fn run_frame(&mut self, slider: &mut Slider<NodeId>) -> Vec<(ProgressToken, TickOutcome)> {
        let batch = std::mem::take(&mut self.pending);
        let now = self.now_ms;
        let mut outcomes = Vec::with_capacity(batch.len());
        for token in batch {
            outcomes.push((token, slider.tick(self, token, now)));
        }
        outcomes
    }

    /// Set the clock to `at_ms`, then [`run_frame`](Self::run_frame).
    pub fn run_frame_at(
        &mut self,
        slider: &mut Slider<NodeId>,
        at_ms: f64,
    ) -> Vec<(ProgressToken, TickOutcome)> {
        self.set_now(at_ms);
        self.run_frame(slider)
    }

    /// Pump frames `step_ms` apart until no frame is pending or `max_frames`
    /// have run. The first frame runs at the current clock. Returns the
    /// number of frames run.
    pub fn run_until_idle(
        &mut self,
        slider: &mut Slider<NodeId>,
        step_ms: f64,
        max_frames: usize,
    ) -> usize {
        let mut frames = 0;
        while !self.pending.is_empty() && frames < max_frames {
            if frames > 0 {
                self.advance(step_ms);
            }
            self.run_frame(slider);
            frames += 1;
        }
        frames
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| n.alive)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|n| n.alive)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.nodes.get_mut(id.0) {
            n.parent = None;
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), HeadlessError> {
        if self.node(parent).is_none() {
            return Err(HeadlessError::UnknownNode(parent));
        }
        if self.node(child).is_none() {
            return Err(HeadlessError::UnknownNode(child));
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let mut copy = self.nodes[id.0].clone();
        copy.parent = None;
        let children = std::mem::take(&mut copy.children);
        self.nodes.push(copy);
        let new_id = NodeId(self.nodes.len() - 1);
        for child in children {
            let child_copy = self.copy_subtree(child);
            self.nodes[child_copy.0].parent = Some(new_id);
            self.nodes[new_id.0].children.push(child_copy);
        }
        new_id
    }
}

impl Default for HeadlessDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for HeadlessDom {
    type Element = NodeId;
    type Error = HeadlessError;

    fn is_element(&self, el: &NodeId) -> bool {
        self.node(*el).is_some()
    }
}

impl StyleInspector for HeadlessDom {
    fn computed_style(&self, el: &NodeId, css_name: &str) -> Option<String> {
        let node = self.node(*el)?;
        let display = node.display();
        if css_name == "display" {
            return Some(display.to_owned());
        }
        let Some(prop) = BoxProperty::ALL.into_iter().find(|p| p.css_name() == css_name) else {
            return node.inline.get(css_name).cloned();
        };
        if display == "none" && matches!(prop, BoxProperty::Width | BoxProperty::Height) {
            return Some("auto".to_owned());
        }
        Some(match node.inline.get(css_name) {
            Some(value) => value.clone(),
            None => format!("{}px", node.sheet.metrics.get(prop)),
        })
    }
}

impl StyleWriter for HeadlessDom {
    fn set_inline(&mut self, el: &NodeId, css_name: &str, value: &str) {
        if let Some(node) = self.node_mut(*el) {
            node.inline.insert(css_name.to_owned(), value.to_owned());
        }
    }

    fn clear_inline(&mut self, el: &NodeId) {
        if let Some(node) = self.node_mut(*el) {
            node.inline.clear();
        }
    }
}

impl AttributeStore for HeadlessDom {
    fn get_attr(&self, el: &NodeId, name: &str) -> Option<String> {
        self.attr(*el, name).map(str::to_owned)
    }

    fn set_attr(&mut self, el: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(*el) {
            node.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attr(&mut self, el: &NodeId, name: &str) {
        if let Some(node) = self.node_mut(*el) {
            node.attrs.remove(name);
        }
    }
}

impl NodeTree for HeadlessDom {
    fn clone_deep(&mut self, el: &NodeId) -> Result<NodeId, HeadlessError> {
        if self.node(*el).is_none() {
            return Err(HeadlessError::UnknownNode(*el));
        }
        self.clones_made += 1;
        Ok(self.copy_subtree(*el))
    }

    fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.node(*el)?.parent.filter(|p| self.node(*p).is_some())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HeadlessError> {
        self.attach(*parent, *child)
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HeadlessError> {
        if !self.children(*parent).contains(child) {
            return Err(HeadlessError::NotAChild {
                parent: *parent,
                child: *child,
            });
        }
        self.detach(*child);
        Ok(())
    }
}

impl FrameScheduler for HeadlessDom {
    fn request_frame(&mut self, token: ProgressToken) {
        self.frames_requested += 1;
        self.pending.push(token);
    }
}
