use foundation::handles::HandleAllocator;

use crate::components::{ComponentBounds, Light, Solid};
use crate::entity::EntityId;
use crate::resources::{
    BufferHandle, BufferKind, MATERIAL_UNIFORM_BYTES, ResourcePool, geometry_bytes,
};

#[derive(Debug)]
struct SolidEntry {
    solid: Solid,
    geometry: BufferHandle,
    material: BufferHandle,
}

/// Scene store for extruded solids and the lighting rig.
///
/// Solids own GPU buffers acquired from the world's [`ResourcePool`]; those
/// are released on [`World::despawn`], [`World::clear_solids`] and
/// [`World::replace_solids`]. Lights are not solids and survive clears.
#[derive(Debug, Default)]
pub struct World {
    entities: HandleAllocator,
    solids: Vec<Option<SolidEntry>>,
    // Spawn order, for deterministic iteration after slot reuse.
    order: Vec<EntityId>,
    resources: ResourcePool,
    lights: Vec<Light>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_solid(&mut self, solid: Solid) -> EntityId {
        let id = EntityId(self.entities.allocate());
        let geometry = self
            .resources
            .acquire(BufferKind::Geometry, geometry_bytes(&solid.mesh));
        let material = self
            .resources
            .acquire(BufferKind::Material, MATERIAL_UNIFORM_BYTES);

        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        self.solids[idx] = Some(SolidEntry {
            solid,
            geometry,
            material,
        });
        self.order.push(id);
        id
    }

    /// Removes a solid and releases its buffers. Stale ids return `false`.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.entities.is_live(entity.0) {
            return false;
        }
        let Some(entry) = self.solids[entity.index() as usize].take() else {
            return false;
        };
        self.resources.release(entry.geometry);
        self.resources.release(entry.material);
        self.entities.release(entity.0);
        self.order.retain(|e| *e != entity);
        true
    }

    /// Disposes every solid. Returns how many were removed.
    pub fn clear_solids(&mut self) -> usize {
        let ids = std::mem::take(&mut self.order);
        let mut removed = 0;
        for id in ids {
            let Some(entry) = self.solids[id.index() as usize].take() else {
                continue;
            };
            self.resources.release(entry.geometry);
            self.resources.release(entry.material);
            self.entities.release(id.0);
            removed += 1;
        }
        removed
    }

    /// Disposes all current solids, then spawns `solids` in order.
    pub fn replace_solids(&mut self, solids: impl IntoIterator<Item = Solid>) -> Vec<EntityId> {
        self.clear_solids();
        solids.into_iter().map(|s| self.spawn_solid(s)).collect()
    }

    pub fn solid(&self, entity: EntityId) -> Option<&Solid> {
        if !self.entities.is_live(entity.0) {
            return None;
        }
        self.solids
            .get(entity.index() as usize)
            .and_then(|e| e.as_ref())
            .map(|e| &e.solid)
    }

    /// Live solids in spawn order.
    pub fn solids(&self) -> Vec<(EntityId, &Solid)> {
        self.order
            .iter()
            .filter_map(|id| self.solid(*id).map(|s| (*id, s)))
            .collect()
    }

    pub fn solid_count(&self) -> usize {
        self.order.len()
    }

    /// Union of all solid mesh bounds.
    pub fn scene_bounds(&self) -> Option<ComponentBounds> {
        self.solids()
            .into_iter()
            .filter_map(|(_, s)| s.mesh.bounds())
            .reduce(ComponentBounds::union)
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn set_lights(&mut self, lights: Vec<Light>) {
        self.lights = lights;
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.solids.len() <= idx {
            self.solids.resize_with(idx + 1, || None);
        }
    }
}
