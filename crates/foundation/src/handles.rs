/// Generational handle: a slot index plus the generation the slot had when
/// the handle was issued. A handle goes stale once its slot is freed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32); // (index, generation)

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}

/// Free-list allocator for generational handles.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Handle {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Handle::new(index, self.generations[slot]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        Handle::new(index, 0)
    }

    /// Frees the slot and bumps its generation. Returns `false` for stale handles.
    pub fn release(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        let slot = handle.index() as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(handle.index());
        true
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        let slot = handle.index() as usize;
        self.alive.get(slot).copied().unwrap_or(false)
            && self.generations[slot] == handle.generation()
    }

    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// Number of slots ever created (live or free).
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}
