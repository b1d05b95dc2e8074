/// A screen that can be layered on top of a modal's root content.
///
/// Implemented by per-flow enums, one variant per screen kind, so the owner
/// renders screens with an exhaustive `match`.
pub trait LayeredScreen: Clone + Send + Sync + 'static {
    fn title(&self) -> String;
}

/// Result of removing the top screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome<S> {
    /// The stack was already empty; nothing changed.
    AlreadyEmpty,
    /// The screen was removed and another layered screen is visible now.
    Revealed(S),
    /// The last screen was removed; root content is visible again.
    Emptied(S),
}

impl<S> PopOutcome<S> {
    pub fn popped(self) -> Option<S> {
        match self {
            PopOutcome::AlreadyEmpty => None,
            PopOutcome::Revealed(screen) | PopOutcome::Emptied(screen) => Some(screen),
        }
    }
}

/// Push-down stack of layered screens; the last element is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredStack<S> {
    screens: Vec<S>,
}

impl<S> Default for LayeredStack<S> {
    fn default() -> Self {
        Self {
            screens: Vec::new(),
        }
    }
}

impl<S> LayeredStack<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, screen: S) {
        self.screens.push(screen);
    }

    pub fn pop(&mut self) -> PopOutcome<S> {
        match self.screens.pop() {
            None => PopOutcome::AlreadyEmpty,
            Some(screen) if self.screens.is_empty() => PopOutcome::Emptied(screen),
            Some(screen) => PopOutcome::Revealed(screen),
        }
    }

    /// Explicit back navigation from the visible screen. Returns that screen
    /// so the owner can run its back handler.
    pub fn back(&mut self) -> Option<S> {
        self.pop().popped()
    }

    /// Drops every screen, returning how many were removed.
    pub fn reset(&mut self) -> usize {
        let removed = self.screens.len();
        self.screens.clear();
        removed
    }

    pub fn top(&self) -> Option<&S> {
        self.screens.last()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
