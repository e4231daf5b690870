//! Thumbnail loading entities.

use std::fmt;

/// Handle to a node of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle to an image element inserted by a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

/// Handle to a scroll listener attached by the visibility queue.
///
/// Handed out by the host at subscription time and revoked with
/// [`crate::domain::ports::ThumbDocument::unsubscribe_scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Nearest scrolling ancestor of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollParent {
    /// The top-level document viewport.
    Document,
    /// A scrollable element.
    Element(NodeId),
}

/// Scroll window of a [`ScrollParent`].
///
/// For the document, `offset` is the document scroll position and `height`
/// the window height. For an element, `offset` is the element's own top
/// offset and `height` its height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top edge of the window.
    pub offset: f64,
    /// Visible height of the window.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(offset: f64, height: f64) -> Self {
        Self { offset, height }
    }

    /// Returns whether `top` lies inside `(offset, offset + height + margin)`.
    ///
    /// Both bounds are exclusive: a container sitting exactly on the scroll
    /// offset is not considered visible.
    #[must_use]
    pub fn contains(&self, top: f64, margin: f64) -> bool {
        top > self.offset && top < self.offset + self.height + margin
    }
}

/// Image element built by a worker for a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbImage {
    /// `sizes` attribute, copied from the container's `data-sizes`.
    pub sizes: Option<String>,
    /// `srcset` attribute, copied from the container's `data-srcset`.
    pub srcset: Option<String>,
    /// Alternative text. Always empty for thumbnails.
    pub alt: String,
}

/// Load slot status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkerStatus {
    /// Waiting for the next push.
    #[default]
    Idle,
    /// Waiting for an image to load or fail.
    Active,
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_lower_bound_is_exclusive() {
        let viewport = Viewport::new(200.0, 600.0);
        assert!(!viewport.contains(200.0, 0.0));
        assert!(viewport.contains(200.5, 0.0));
    }

    #[test]
    fn test_viewport_margin_extends_upper_bound() {
        let viewport = Viewport::new(0.0, 600.0);
        assert!(!viewport.contains(900.0, 0.0));
        assert!(viewport.contains(900.0, 1000.0));
    }
}
