// core/transform.rs
//
// Transform graph — world rectangles plus parent-child attachments,
// tracked by ObjectId and decoupled from object storage.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register(child, IVec2::ZERO, IVec2::new(20, 20));
//   graph.attach(parent, child, IVec2::ZERO, Anchor::Center, Anchor::Center);
//   graph.end_frame();  // promotes this frame's dirty flags for next-frame readers

use std::collections::HashMap;

use glam::IVec2;

use crate::core::object::ObjectId;
use crate::core::rect::Rect;

/// Attachment point on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Offset of this anchor from the rect's top-left corner.
    pub fn offset_in(self, size: IVec2) -> IVec2 {
        let (w, h) = (size.x, size.y);
        match self {
            Anchor::TopLeft => IVec2::new(0, 0),
            Anchor::TopCenter => IVec2::new(w / 2, 0),
            Anchor::TopRight => IVec2::new(w, 0),
            Anchor::LeftCenter => IVec2::new(0, h / 2),
            Anchor::Center => IVec2::new(w / 2, h / 2),
            Anchor::RightCenter => IVec2::new(w, h / 2),
            Anchor::BottomLeft => IVec2::new(0, h),
            Anchor::BottomCenter => IVec2::new(w / 2, h),
            Anchor::BottomRight => IVec2::new(w, h),
        }
    }
}

/// Per-frame change flags, readable the frame after the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyFlag {
    Position,
    Size,
    BoundingBox,
}

impl DirtyFlag {
    fn bit(self) -> u8 {
        match self {
            DirtyFlag::Position => 1,
            DirtyFlag::Size => 2,
            DirtyFlag::BoundingBox => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Attachment {
    offset: IVec2,
    parent_anchor: Anchor,
    child_anchor: Anchor,
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    position: IVec2,
    size: IVec2,
    /// Hover-testing box relative to `position`; `None` means the full size.
    bounding_box: Option<Rect>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    attachment: Option<Attachment>,
    dirty_now: u8,
    dirty_next: u8,
}

/// Transform graph — manages world rectangles and attachments.
///
/// Moving or resizing a node immediately repositions attached children.
/// Change flags accumulate during the frame and become visible through
/// [`TransformGraph::is_dirty`] after [`TransformGraph::end_frame`].
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<ObjectId, TransformNode>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with a world position and size.
    pub fn register(&mut self, id: ObjectId, position: IVec2, size: IVec2) {
        let node = self.nodes.entry(id).or_default();
        node.position = position;
        node.size = size;
        node.dirty_next |= DirtyFlag::Position.bit() | DirtyFlag::Size.bit();
    }

    pub fn position(&self, id: ObjectId) -> IVec2 {
        self.nodes.get(&id).map(|n| n.position).unwrap_or_default()
    }

    pub fn size(&self, id: ObjectId) -> IVec2 {
        self.nodes.get(&id).map(|n| n.size).unwrap_or_default()
    }

    pub fn center_position(&self, id: ObjectId) -> IVec2 {
        self.nodes
            .get(&id)
            .map(|n| n.position + n.size / 2)
            .unwrap_or_default()
    }

    /// World rect of the object.
    pub fn rect(&self, id: ObjectId) -> Rect {
        self.nodes
            .get(&id)
            .map(|n| Rect::from_pos_size(n.position, n.size))
            .unwrap_or_default()
    }

    /// World-space hover-testing box: the explicit bounding box shifted to
    /// the object's position, or the full object rect when none is set.
    pub fn testing_box(&self, id: ObjectId) -> Rect {
        match self.nodes.get(&id) {
            Some(n) => match n.bounding_box {
                Some(bb) => bb.offset(n.position),
                None => Rect::from_pos_size(n.position, n.size),
            },
            None => Rect::default(),
        }
    }

    pub fn set_position(&mut self, id: ObjectId, position: IVec2) {
        let delta = match self.nodes.get(&id) {
            Some(n) => position - n.position,
            None => return,
        };
        if delta == IVec2::ZERO {
            return;
        }
        self.shift(id, delta);
    }

    pub fn set_center_position(&mut self, id: ObjectId, center: IVec2) {
        let size = self.size(id);
        self.set_position(id, center - size / 2);
    }

    /// Resize an object. Attached children are re-anchored immediately.
    pub fn set_size(&mut self, id: ObjectId, size: IVec2) {
        let children = match self.nodes.get_mut(&id) {
            Some(n) => {
                if n.size == size {
                    return;
                }
                n.size = size;
                n.dirty_next |= DirtyFlag::Size.bit();
                n.children.clone()
            }
            None => return,
        };
        for child in children {
            self.reanchor(child);
        }
    }

    pub fn set_width(&mut self, id: ObjectId, width: i32) {
        let size = self.size(id);
        self.set_size(id, IVec2::new(width, size.y));
    }

    pub fn set_height(&mut self, id: ObjectId, height: i32) {
        let size = self.size(id);
        self.set_size(id, IVec2::new(size.x, height));
    }

    /// Override the hover-testing box (relative to the object position).
    pub fn set_bounding_box(&mut self, id: ObjectId, bounding_box: Option<Rect>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounding_box = bounding_box;
            node.dirty_next |= DirtyFlag::BoundingBox.bit();
        }
    }

    /// Attach `child` to `parent`: the child's anchor point is pinned to the
    /// parent's anchor point plus `offset`, now and on every parent move or
    /// resize. Re-attaching replaces any previous attachment.
    pub fn attach(
        &mut self,
        parent: ObjectId,
        child: ObjectId,
        offset: IVec2,
        parent_anchor: Anchor,
        child_anchor: Anchor,
    ) {
        if parent == child || !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child)
        {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
            node.attachment = Some(Attachment {
                offset,
                parent_anchor,
                child_anchor,
            });
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(child);
        }
        self.reanchor(child);
    }

    /// Change an attached child's offset from its parent anchor.
    pub fn set_local_offset(&mut self, child: ObjectId, offset: IVec2) {
        match self.nodes.get_mut(&child).and_then(|n| n.attachment.as_mut()) {
            Some(attachment) => attachment.offset = offset,
            None => return,
        }
        self.reanchor(child);
    }

    /// Detach `child` from its parent, keeping its world position.
    pub fn detach(&mut self, child: ObjectId) {
        let Some(parent) = self.nodes.get(&child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
            node.attachment = None;
        }
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Remove an object from the graph. Children are orphaned in place.
    pub fn remove(&mut self, id: ObjectId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
                child_node.attachment = None;
            }
        }
    }

    /// Whether the given change happened last frame.
    pub fn is_dirty(&self, id: ObjectId, flag: DirtyFlag) -> bool {
        self.nodes
            .get(&id)
            .map(|n| n.dirty_now & flag.bit() != 0)
            .unwrap_or(false)
    }

    /// Whether anything about the object changed last frame.
    pub fn was_changed(&self, id: ObjectId) -> bool {
        self.nodes
            .get(&id)
            .map(|n| n.dirty_now != 0)
            .unwrap_or(false)
    }

    /// Promote this frame's change flags so next frame's readers see them.
    pub fn end_frame(&mut self) {
        for node in self.nodes.values_mut() {
            node.dirty_now = node.dirty_next;
            node.dirty_next = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Move a subtree rigidly by `delta`.
    fn shift(&mut self, id: ObjectId, delta: IVec2) {
        let children = match self.nodes.get_mut(&id) {
            Some(n) => {
                n.position += delta;
                n.dirty_next |= DirtyFlag::Position.bit();
                n.children.clone()
            }
            None => return,
        };
        for child in children {
            self.shift(child, delta);
        }
    }

    // Recompute an attached child's position from its anchors.
    fn reanchor(&mut self, child: ObjectId) {
        let Some((parent, attachment, child_size)) = self
            .nodes
            .get(&child)
            .and_then(|n| Some((n.parent?, n.attachment?, n.size)))
        else {
            return;
        };
        let Some(parent_node) = self.nodes.get(&parent) else {
            return;
        };
        let anchor_point = parent_node.position
            + attachment.parent_anchor.offset_in(parent_node.size)
            + attachment.offset;
        let new_position = anchor_point - attachment.child_anchor.offset_in(child_size);
        self.set_position(child, new_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(nodes: &[(u32, (i32, i32), (i32, i32))]) -> TransformGraph {
        let mut graph = TransformGraph::new();
        for &(id, (x, y), (w, h)) in nodes {
            graph.register(ObjectId(id), IVec2::new(x, y), IVec2::new(w, h));
        }
        graph
    }

    #[test]
    fn attach_centers_child_on_parent() {
        let mut graph = graph_with(&[(1, (100, 100), (200, 100)), (2, (0, 0), (20, 10))]);
        graph.attach(
            ObjectId(1),
            ObjectId(2),
            IVec2::ZERO,
            Anchor::Center,
            Anchor::Center,
        );
        assert_eq!(graph.position(ObjectId(2)), IVec2::new(190, 145));
        assert_eq!(graph.center_position(ObjectId(2)), IVec2::new(200, 150));
    }

    #[test]
    fn moving_parent_carries_children() {
        let mut graph = graph_with(&[(1, (0, 0), (100, 100)), (2, (0, 0), (10, 10))]);
        graph.attach(
            ObjectId(1),
            ObjectId(2),
            IVec2::new(5, 5),
            Anchor::TopLeft,
            Anchor::TopLeft,
        );
        graph.set_position(ObjectId(1), IVec2::new(40, 60));
        assert_eq!(graph.position(ObjectId(2)), IVec2::new(45, 65));
    }

    #[test]
    fn resizing_parent_reanchors_children() {
        let mut graph = graph_with(&[(1, (0, 0), (100, 100)), (2, (0, 0), (10, 10))]);
        graph.attach(
            ObjectId(1),
            ObjectId(2),
            IVec2::ZERO,
            Anchor::RightCenter,
            Anchor::RightCenter,
        );
        assert_eq!(graph.position(ObjectId(2)), IVec2::new(90, 45));
        graph.set_size(ObjectId(1), IVec2::new(200, 100));
        assert_eq!(graph.position(ObjectId(2)), IVec2::new(190, 45));
    }

    #[test]
    fn dirty_flags_visible_next_frame() {
        let mut graph = graph_with(&[(1, (0, 0), (10, 10))]);
        graph.end_frame();
        graph.end_frame();
        assert!(!graph.was_changed(ObjectId(1)));

        graph.set_position(ObjectId(1), IVec2::new(5, 5));
        assert!(!graph.is_dirty(ObjectId(1), DirtyFlag::Position));
        graph.end_frame();
        assert!(graph.is_dirty(ObjectId(1), DirtyFlag::Position));
        assert!(!graph.is_dirty(ObjectId(1), DirtyFlag::Size));
        graph.end_frame();
        assert!(!graph.is_dirty(ObjectId(1), DirtyFlag::Position));
    }

    #[test]
    fn testing_box_defaults_to_size() {
        let mut graph = graph_with(&[(1, (10, 20), (30, 40))]);
        assert_eq!(graph.testing_box(ObjectId(1)), Rect::new(10, 20, 30, 40));
        graph.set_bounding_box(ObjectId(1), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(graph.testing_box(ObjectId(1)), Rect::new(15, 25, 10, 10));
    }

    #[test]
    fn remove_orphans_children_in_place() {
        let mut graph = graph_with(&[(1, (0, 0), (100, 100)), (2, (0, 0), (10, 10))]);
        graph.attach(
            ObjectId(1),
            ObjectId(2),
            IVec2::ZERO,
            Anchor::Center,
            Anchor::Center,
        );
        let before = graph.position(ObjectId(2));
        graph.remove(ObjectId(1));
        assert_eq!(graph.parent(ObjectId(2)), None);
        assert_eq!(graph.position(ObjectId(2)), before);
    }
}
