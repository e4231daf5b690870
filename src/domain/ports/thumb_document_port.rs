//! Port definition for the document hosting thumbnail containers.

use crate::domain::entities::{ImageId, ListenerId, NodeId, ScrollParent, ThumbImage, Viewport};

/// CSS class marking thumbnail placeholders.
pub const THUMB_CLASS: &str = "elementthumb";

/// Attribute holding the `sizes` value for a container's image.
pub const SIZES_ATTRIBUTE: &str = "data-sizes";

/// Attribute holding the `srcset` value for a container's image.
pub const SRCSET_ATTRIBUTE: &str = "data-srcset";

/// Host document seen by the thumbnail loader.
///
/// Calls happen from a single logical thread. Scroll and image events flow
/// back through [`crate::infrastructure::thumbs::LoaderState`]:
/// `handle_scroll` for every listener handed out by
/// [`subscribe_scroll`](Self::subscribe_scroll) and `image_settled` for every
/// image returned by [`insert_image`](Self::insert_image), on load and on
/// error alike.
pub trait ThumbDocument {
    /// Returns every descendant of `root` (inclusive) carrying `class`.
    fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// Returns the top offset of a node, or `None` once it left the document.
    fn offset_top(&self, node: NodeId) -> Option<f64>;

    /// Returns an attribute value.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Returns whether the container already holds an image element.
    fn has_image(&self, node: NodeId) -> bool;

    /// Returns the nearest scrolling ancestor of a node.
    fn scroll_parent(&self, node: NodeId) -> Option<ScrollParent>;

    /// Returns the current scroll window of an ancestor.
    fn viewport(&self, parent: ScrollParent) -> Option<Viewport>;

    /// Attaches a scroll listener to `parent`.
    fn subscribe_scroll(&mut self, parent: ScrollParent) -> ListenerId;

    /// Detaches a listener. Unknown handles are ignored.
    fn unsubscribe_scroll(&mut self, listener: ListenerId);

    /// Appends an image element to a container and starts loading it.
    fn insert_image(&mut self, container: NodeId, image: ThumbImage) -> ImageId;

    /// Runs responsive-image source selection for a freshly inserted image.
    fn resolve_responsive(&mut self, image: ImageId);
}
