//! The transform stack.
//!
//! Draw calls are issued in whatever coordinate frame is current. Pushing a
//! transform nests a new frame inside the current one; popping returns to
//! the parent. The current transform is applied to vertices as they are
//! emitted, so geometry already in the batch is never touched by a later
//! push or pop.
//!
//! ```text
//! push(A)        current = A          stack = [I]
//! push(B)        current = A·B        stack = [I, A]
//! pop() -> A·B   current = A          stack = [I]
//! pop() -> A     current = I          stack = []
//! pop()          Err(TransformStackUnderflow)
//! ```

use crate::error::{BatchError, Result};
use crate::math::Transform2d;

/// A push/pop stack of affine transforms.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Transform2d,
    saved: Vec<Transform2d>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest `transform` inside the current frame.
    ///
    /// The new current transform applies `transform` first, then everything
    /// pushed before it.
    pub fn push(&mut self, transform: Transform2d) {
        self.saved.push(self.current);
        self.current = self.current.compose(transform);
    }

    /// Return to the parent frame.
    ///
    /// Returns the transform that was current before the pop. Popping an
    /// empty stack is an error and leaves the current transform untouched.
    pub fn pop(&mut self) -> Result<Transform2d> {
        let parent = self.saved.pop().ok_or(BatchError::TransformStackUnderflow)?;
        Ok(std::mem::replace(&mut self.current, parent))
    }

    /// The composition of everything pushed, or identity when empty.
    pub fn current(&self) -> Transform2d {
        self.current
    }

    /// Number of pushes not yet popped.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}
