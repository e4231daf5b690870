//! In-memory document used by the thumbnail loader tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::entities::{ImageId, ListenerId, NodeId, ScrollParent, ThumbImage, Viewport};
use crate::domain::ports::{SIZES_ATTRIBUTE, SRCSET_ATTRIBUTE, THUMB_CLASS, ThumbDocument};

#[derive(Debug, Clone)]
struct FakeNode {
    top: f64,
    parent: Option<NodeId>,
    class: Option<String>,
    scroll_parent: Option<ScrollParent>,
    attributes: HashMap<String, String>,
    has_image: bool,
}

#[derive(Debug, Default)]
pub struct FakeDocument {
    nodes: BTreeMap<NodeId, FakeNode>,
    viewports: HashMap<ScrollParent, Viewport>,
    listeners: BTreeMap<u64, ScrollParent>,
    next_listener: u64,
    next_image: u64,
    pub inserted: Vec<(NodeId, ImageId, ThumbImage)>,
    pub resolved: Vec<ImageId>,
}

impl FakeDocument {
    pub fn new() -> Self {
        let mut doc = Self::default();
        doc.viewports
            .insert(ScrollParent::Document, Viewport::new(0.0, 800.0));
        doc
    }

    /// Adds a thumbnail container scrolled by the document.
    pub fn add_thumb(&mut self, id: u64, top: f64) -> NodeId {
        self.add_thumb_in(id, top, ScrollParent::Document)
    }

    pub fn add_thumb_in(&mut self, id: u64, top: f64, scroll_parent: ScrollParent) -> NodeId {
        let node = NodeId(id);
        let attributes = HashMap::from([
            (SIZES_ATTRIBUTE.to_string(), "34px".to_string()),
            (
                SRCSET_ATTRIBUTE.to_string(),
                format!("/thumbs/{id}-34.png 34w, /thumbs/{id}-68.png 68w"),
            ),
        ]);
        self.nodes.insert(
            node,
            FakeNode {
                top,
                parent: None,
                class: Some(THUMB_CLASS.to_string()),
                scroll_parent: Some(scroll_parent),
                attributes,
                has_image: false,
            },
        );
        node
    }

    /// Adds a plain element with the given children.
    pub fn add_element(&mut self, id: u64, children: &[NodeId]) -> NodeId {
        let node = NodeId(id);
        self.nodes.insert(
            node,
            FakeNode {
                top: 0.0,
                parent: None,
                class: None,
                scroll_parent: Some(ScrollParent::Document),
                attributes: HashMap::new(),
                has_image: false,
            },
        );
        for child in children {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parent = Some(node);
            }
        }
        node
    }

    pub fn set_viewport(&mut self, parent: ScrollParent, viewport: Viewport) {
        self.viewports.insert(parent, viewport);
    }

    pub fn set_has_image(&mut self, node: NodeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.has_image = true;
        }
    }

    pub fn remove_node(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    /// Moves the scroll window of `parent` and returns its listeners.
    pub fn scroll_to(&mut self, parent: ScrollParent, offset: f64) -> Vec<ListenerId> {
        if let Some(viewport) = self.viewports.get_mut(&parent) {
            viewport.offset = offset;
        }
        self.listeners
            .iter()
            .filter(|(_, p)| **p == parent)
            .map(|(id, _)| ListenerId(*id))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn inserted_containers(&self) -> Vec<NodeId> {
        self.inserted.iter().map(|(node, _, _)| *node).collect()
    }

    pub fn image_for(&self, container: NodeId) -> Option<ImageId> {
        self.inserted
            .iter()
            .find(|(node, _, _)| *node == container)
            .map(|(_, image, _)| *image)
    }

    fn is_descendant(&self, node: NodeId, root: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }
}

impl ThumbDocument for FakeDocument {
    fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.class.as_deref() == Some(class))
            .filter(|(id, _)| self.is_descendant(**id, root))
            .map(|(id, _)| *id)
            .collect()
    }

    fn offset_top(&self, node: NodeId) -> Option<f64> {
        self.nodes.get(&node).map(|n| n.top)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn has_image(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.has_image)
    }

    fn scroll_parent(&self, node: NodeId) -> Option<ScrollParent> {
        self.nodes.get(&node).and_then(|n| n.scroll_parent)
    }

    fn viewport(&self, parent: ScrollParent) -> Option<Viewport> {
        self.viewports.get(&parent).copied()
    }

    fn subscribe_scroll(&mut self, parent: ScrollParent) -> ListenerId {
        self.next_listener += 1;
        self.listeners.insert(self.next_listener, parent);
        ListenerId(self.next_listener)
    }

    fn unsubscribe_scroll(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener.0);
    }

    fn insert_image(&mut self, container: NodeId, image: ThumbImage) -> ImageId {
        self.next_image += 1;
        let id = ImageId(self.next_image);
        if let Some(node) = self.nodes.get_mut(&container) {
            node.has_image = true;
        }
        self.inserted.push((container, id, image));
        id
    }

    fn resolve_responsive(&mut self, image: ImageId) {
        self.resolved.push(image);
    }
}

/// Thread-safe handle so async tests can inspect the document.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(pub Arc<Mutex<FakeDocument>>);

impl SharedDocument {
    pub fn new(doc: FakeDocument) -> Self {
        Self(Arc::new(Mutex::new(doc)))
    }
}

impl ThumbDocument for SharedDocument {
    fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.0.lock().find_by_class(root, class)
    }

    fn offset_top(&self, node: NodeId) -> Option<f64> {
        self.0.lock().offset_top(node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.0.lock().attribute(node, name)
    }

    fn has_image(&self, node: NodeId) -> bool {
        self.0.lock().has_image(node)
    }

    fn scroll_parent(&self, node: NodeId) -> Option<ScrollParent> {
        self.0.lock().scroll_parent(node)
    }

    fn viewport(&self, parent: ScrollParent) -> Option<Viewport> {
        self.0.lock().viewport(parent)
    }

    fn subscribe_scroll(&mut self, parent: ScrollParent) -> ListenerId {
        self.0.lock().subscribe_scroll(parent)
    }

    fn unsubscribe_scroll(&mut self, listener: ListenerId) {
        self.0.lock().unsubscribe_scroll(listener);
    }

    fn insert_image(&mut self, container: NodeId, image: ThumbImage) -> ImageId {
        self.0.lock().insert_image(container, image)
    }

    fn resolve_responsive(&mut self, image: ImageId) {
        self.0.lock().resolve_responsive(image);
    }
}
