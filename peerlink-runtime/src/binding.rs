use crate::handle::ThreadHandle;

/// An execution thread the holder either owns or merely references
///
/// Owned threads were created by the holder and are stopped and joined when
/// the binding drops. Borrowed threads outlive the binding's control and are
/// never stopped through it. Downstream code projects the handle uniformly
/// and never branches on the case.
pub enum ThreadBinding {
    Owned(ThreadHandle),
    Borrowed(ThreadHandle),
}

impl ThreadBinding {
    /// The underlying handle, regardless of ownership
    pub fn handle(&self) -> &ThreadHandle {
        match self {
            ThreadBinding::Owned(handle) | ThreadBinding::Borrowed(handle) => handle,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, ThreadBinding::Owned(_))
    }
}

impl Drop for ThreadBinding {
    fn drop(&mut self) {
        if let ThreadBinding::Owned(handle) = self {
            handle.stop();
        }
    }
}

impl std::fmt::Debug for ThreadBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadBinding")
            .field("name", &self.handle().name())
            .field("owned", &self.is_owned())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_binding_stops_thread_on_drop() {
        let handle = ThreadHandle::spawn("owned_worker").unwrap();
        let probe = handle.clone();

        let binding = ThreadBinding::Owned(handle);
        assert!(binding.is_owned());
        drop(binding);

        assert!(!probe.is_running());
    }

    #[test]
    fn test_borrowed_binding_leaves_thread_running() {
        let handle = ThreadHandle::spawn("borrowed_worker").unwrap();
        let probe = handle.clone();

        let binding = ThreadBinding::Borrowed(handle);
        assert!(!binding.is_owned());
        drop(binding);

        assert!(probe.is_running());
        assert_eq!(probe.invoke(|| 1 + 1), 2);
        probe.stop();
    }

    #[test]
    fn test_handle_projection_is_uniform() {
        let owned = ThreadBinding::Owned(ThreadHandle::spawn("projected").unwrap());
        let borrowed = ThreadBinding::Borrowed(ThreadHandle::wrap_current("projected_ref"));

        assert_eq!(owned.handle().name(), "projected");
        assert_eq!(borrowed.handle().name(), "projected_ref");
    }
}
