//! Bookkeeping for GPU-resident buffers backing scene solids.
//!
//! Every buffer acquired here must be released explicitly; dropping the
//! handle does not free anything. [`crate::World`] pairs each solid with its
//! buffers and releases them on despawn.

use foundation::handles::{Handle, HandleAllocator};

use crate::components::SolidMesh;

/// Uniform block size for one material: rgba color plus roughness/metalness, padded.
pub const MATERIAL_UNIFORM_BYTES: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Geometry,
    Material,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct BufferInfo {
    kind: BufferKind,
    bytes: usize,
}

#[derive(Debug, Default)]
pub struct ResourcePool {
    handles: HandleAllocator,
    buffers: Vec<Option<BufferInfo>>,
    live_bytes: usize,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, kind: BufferKind, bytes: usize) -> BufferHandle {
        let handle = self.handles.allocate();
        let slot = handle.index() as usize;
        if self.buffers.len() <= slot {
            self.buffers.resize(slot + 1, None);
        }
        self.buffers[slot] = Some(BufferInfo { kind, bytes });
        self.live_bytes += bytes;
        BufferHandle(handle)
    }

    /// Returns `false` if the handle was already released.
    pub fn release(&mut self, buffer: BufferHandle) -> bool {
        if !self.handles.release(buffer.0) {
            return false;
        }
        if let Some(info) = self.buffers[buffer.0.index() as usize].take() {
            self.live_bytes -= info.bytes;
        }
        true
    }

    pub fn is_live(&self, buffer: BufferHandle) -> bool {
        self.handles.is_live(buffer.0)
    }

    pub fn live_buffers(&self) -> usize {
        self.handles.live_count()
    }

    pub fn live_buffers_of(&self, kind: BufferKind) -> usize {
        self.buffers
            .iter()
            .flatten()
            .filter(|info| info.kind == kind)
            .count()
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }
}

/// Upload size of a mesh as `f32` positions and normals plus `u32` indices.
pub fn geometry_bytes(mesh: &SolidMesh) -> usize {
    (mesh.positions.len() + mesh.normals.len()) * 3 * std::mem::size_of::<f32>()
        + mesh.indices.len() * std::mem::size_of::<u32>()
}
