//! LIFO navigation stack with enter/exit hooks.

/// Enter/exit hooks called by [`ScreenStack`].
pub trait Lifecycle {
    /// Called when the screen becomes the top of the stack.
    fn on_enter(&mut self) {}
    /// Called when the screen stops being the top of the stack.
    fn on_exit(&mut self) {}
}

/// Stack of screens; only the top one is current.
pub struct ScreenStack<S: ?Sized> {
    frames: Vec<Box<S>>,
}

impl<S: ?Sized> Default for ScreenStack<S> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<S: ?Sized + Lifecycle> ScreenStack<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit the current screen, then enter `screen` on top.
    pub fn push(&mut self, screen: Box<S>) {
        if let Some(top) = self.frames.last_mut() {
            top.on_exit();
        }
        self.frames.push(screen);
        if let Some(top) = self.frames.last_mut() {
            top.on_enter();
        }
    }

    /// Exit and remove the current screen, re-enter the one below it.
    ///
    /// Returns the new current screen.
    pub fn pop(&mut self) -> Option<&mut S> {
        if let Some(mut top) = self.frames.pop() {
            top.on_exit();
        }
        let next = self.frames.last_mut()?;
        next.on_enter();
        Some(&mut **next)
    }

    /// Pop every screen, calling `on_exit` for each.
    pub fn clear(&mut self) {
        while let Some(mut top) = self.frames.pop() {
            top.on_exit();
        }
    }

    pub fn current(&self) -> Option<&S> {
        self.frames.last().map(|b| &**b)
    }

    pub fn current_mut(&mut self) -> Option<&mut S> {
        self.frames.last_mut().map(|b| &mut **b)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
