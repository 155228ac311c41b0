//! Handle issuer for renderables
//!
//! The batcher never holds references into the scene; it keys everything by
//! [`ObjectId`]. `RenderableStore` is the scene-side owner that issues those
//! handles.

use slotmap::{new_key_type, SlotMap};

use crate::scene::renderable_object::RenderableObject;

new_key_type! {
    /// Stable handle to a renderable owned by the scene
    pub struct ObjectId;
}

/// Owner of renderable objects, keyed by generational handles
#[derive(Debug, Default)]
pub struct RenderableStore {
    objects: SlotMap<ObjectId, RenderableObject>,
}

impl RenderableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its handle
    pub fn insert(&mut self, object: impl Into<RenderableObject>) -> ObjectId {
        self.objects.insert(object.into())
    }

    /// Remove an object. Its handle is never reissued.
    pub fn remove(&mut self, id: ObjectId) -> Option<RenderableObject> {
        self.objects.remove(id)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&RenderableObject> {
        self.objects.get(id)
    }

    /// Look up an object for editing
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut RenderableObject> {
        self.objects.get_mut(id)
    }

    /// All objects with their handles, in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &RenderableObject)> {
        self.objects.iter()
    }

    /// The given objects with their handles; unknown handles are skipped
    pub fn select<'a>(
        &'a self,
        ids: &'a [ObjectId],
    ) -> impl Iterator<Item = (ObjectId, &'a RenderableObject)> + 'a {
        ids.iter()
            .filter_map(move |&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
