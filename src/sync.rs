//! CPU/GPU synchronization state of a single resource.

/// Whether the GPU copy of a resource matches the CPU state.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing has been uploaded yet.
    #[default]
    Unallocated,
    /// Uploaded once, but the CPU state changed since.
    Dirty,
    /// The GPU copy is current.
    Clean,
}

impl SyncState {
    /// Whether the next draw has to upload.
    pub fn needs_upload(self) -> bool {
        self != SyncState::Clean
    }

    /// Record a CPU-side change. A resource that was never uploaded stays
    /// `Unallocated`.
    pub fn invalidate(&mut self) {
        if *self == SyncState::Clean {
            *self = SyncState::Dirty;
        }
    }

    /// Record a successful upload.
    pub fn mark_synced(&mut self) {
        *self = SyncState::Clean;
    }
}

/// GPU work the next draw of a primitive will perform, besides the
/// unconditional attribute setup and draw call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PendingWork {
    /// The vertex buffer object does not exist yet.
    pub generate_buffer: bool,
    /// The vertex array object does not exist yet.
    pub generate_array: bool,
    /// Vertex data will be (re)uploaded.
    pub upload_vertices: bool,
    /// The bound texture will be (re)uploaded.
    pub upload_texture: bool,
}

impl PendingWork {
    /// Whether the draw will only issue the draw call.
    pub fn is_idle(&self) -> bool {
        *self == PendingWork::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_unallocated_clean_dirty_clean() {
        let mut state = SyncState::default();
        assert!(state.needs_upload());

        state.invalidate();
        assert_eq!(state, SyncState::Unallocated);

        state.mark_synced();
        assert!(!state.needs_upload());

        state.invalidate();
        assert_eq!(state, SyncState::Dirty);
        assert!(state.needs_upload());

        state.mark_synced();
        assert_eq!(state, SyncState::Clean);
    }
}
