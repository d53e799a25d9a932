// Work that has to wait until the entry table has drawn its rows.

use crate::navigator::Navigator;
use std::collections::VecDeque;

pub type PostRender = Box<dyn FnOnce(&mut Navigator)>;

/// Callbacks queued during one frame become ready once the table has
/// rendered after them, and run at the end of that frame, before the next
/// input is handled.
#[derive(Default)]
pub struct PostRenderQueue {
    pending: VecDeque<PostRender>,
    ready: VecDeque<PostRender>,
}

impl PostRenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, callback: PostRender) {
        self.pending.push_back(callback);
    }

    /// Called by the table right after it has drawn the current rows.
    pub fn mark_rendered(&mut self) {
        self.ready.append(&mut self.pending);
    }

    /// Runs every ready callback in queue order. Callbacks queued while
    /// running wait for the next render pass.
    pub fn run(&mut self, navigator: &mut Navigator) {
        while let Some(callback) = self.ready.pop_front() {
            callback(navigator);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty()
    }
}
