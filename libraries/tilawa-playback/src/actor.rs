//! Child machine lifetime tracking
//!
//! Parents own their children through [`Spawned`], a tagged
//! alive/stopped wrapper. Stopping is unconditional and immediate:
//! once stopped, a handle never delivers another message, so a
//! superseded child cannot keep emitting into a parent that no longer
//! expects it.

/// A spawned child machine with an explicit alive/stopped tag
#[derive(Debug, Clone)]
pub struct Spawned<T> {
    inner: T,
    alive: bool,
}

impl<T> Spawned<T> {
    /// Wrap a freshly constructed child
    pub fn spawn(inner: T) -> Self {
        Self { inner, alive: true }
    }

    /// Mark the child stopped
    ///
    /// Any message sent afterwards is discarded.
    pub fn stop(&mut self) {
        self.alive = false;
    }

    /// Whether the child is still alive
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Deliver a message to the child, if it is still alive
    ///
    /// Returns `None` when the child has been stopped.
    pub fn with<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        if self.alive {
            Some(f(&mut self.inner))
        } else {
            None
        }
    }

    /// Read-only access, if the child is still alive
    pub fn get(&self) -> Option<&T> {
        if self.alive {
            Some(&self.inner)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alive_handle_delivers_messages() {
        let mut child = Spawned::spawn(0u32);
        assert!(child.is_alive());
        assert_eq!(child.with(|n| *n + 1), Some(1));
    }

    #[test]
    fn stopped_handle_discards_messages() {
        let mut child = Spawned::spawn(0u32);
        child.stop();

        assert!(!child.is_alive());
        assert_eq!(child.with(|n| *n + 1), None);
        assert!(child.get().is_none());
    }
}
