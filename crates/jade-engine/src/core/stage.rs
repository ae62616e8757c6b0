use crate::core::object::{GameObject, ObjectId};

/// Flat object storage for one scene, kept sorted by z for drawing.
/// Designed for UI-scale object counts (hundreds, not millions).
pub struct Stage {
    objects: Vec<GameObject>,
    /// While batching, spawns skip the per-insert z-sort.
    batching: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(256),
            batching: false,
        }
    }

    /// Add an object. Keeps z order unless a batch is open.
    pub fn spawn(&mut self, object: GameObject) {
        self.objects.push(object);
        if !self.batching {
            self.sort_by_z();
        }
    }

    /// Remove an object by id. Returns the removed object if found.
    pub fn despawn(&mut self, id: ObjectId) -> Option<GameObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        // Plain remove, not swap_remove: the vec stays z-sorted.
        Some(self.objects.remove(idx))
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Iterate in ascending z order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.iter_mut()
    }

    /// Open a batch: spawns stop re-sorting until [`Stage::end_batch`].
    pub fn start_batch(&mut self) {
        self.batching = true;
    }

    /// Close a batch and restore z order with a single sort.
    pub fn end_batch(&mut self) {
        self.batching = false;
        self.sort_by_z();
    }

    /// Stable sort by z so same-z objects keep creation order.
    pub fn sort_by_z(&mut self) {
        self.objects.sort_by_key(|o| o.z);
    }

    /// Collect and remove every object flagged for destruction.
    pub fn reap(&mut self) -> Vec<ObjectId> {
        let doomed: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|o| o.destruction_wanted)
            .map(|o| o.id)
            .collect();
        self.objects.retain(|o| !o.destruction_wanted);
        doomed
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
