//! Slot for a renderer specific realization of a path
use std::{any::Any, fmt};

/// Backend specific compiled path object.
///
/// Renderers implement this trait for their handles. `release` is called
/// exactly once, when the handle is replaced, invalidated by a path mutation,
/// or when the owning path is disposed or dropped.
pub trait NativePath: Any {
    fn release(&mut self);
}

/// Object safe wrapper used to recover concrete handle type
trait NativeHandle {
    fn release(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: NativePath> NativeHandle for T {
    fn release(&mut self) {
        NativePath::release(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Holds at most one native handle and releases it deterministically
#[derive(Default)]
pub struct NativeSlot {
    handle: Option<Box<dyn NativeHandle>>,
}

impl fmt::Debug for NativeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handle.is_some() {
            write!(f, "NativeSlot(Some)")
        } else {
            write!(f, "NativeSlot(None)")
        }
    }
}

impl NativeSlot {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_set(&self) -> bool {
        self.handle.is_some()
    }

    /// Store new handle, releasing the previous one first
    pub fn replace<T: NativePath>(&mut self, handle: T) {
        self.release();
        self.handle = Some(Box::new(handle));
    }

    /// Release currently held handle if any
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            tracing::trace!("[native:release]");
            handle.release();
        }
    }

    /// Take the handle out of the slot without releasing it
    pub fn take<T: NativePath>(&mut self) -> Option<Box<T>> {
        self.get::<T>()?;
        self.handle.take()?.into_any().downcast::<T>().ok()
    }

    /// Borrow the handle if it has type `T`
    pub fn get<T: NativePath>(&self) -> Option<&T> {
        self.handle.as_ref()?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the handle if it has type `T`
    pub fn get_mut<T: NativePath>(&mut self) -> Option<&mut T> {
        self.handle.as_mut()?.as_any_mut().downcast_mut::<T>()
    }
}

impl Drop for NativeSlot {
    fn drop(&mut self) {
        self.release()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    /// Handle that counts how many times it was released
    #[derive(Debug)]
    pub(crate) struct CountingHandle {
        pub(crate) id: usize,
        pub(crate) released: Rc<Cell<usize>>,
    }

    impl CountingHandle {
        pub(crate) fn new(id: usize, released: &Rc<Cell<usize>>) -> Self {
            Self {
                id,
                released: released.clone(),
            }
        }
    }

    impl NativePath for CountingHandle {
        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[derive(Debug)]
    struct OtherHandle;

    impl NativePath for OtherHandle {
        fn release(&mut self) {}
    }

    #[test]
    fn test_replace_releases_previous() {
        let released = Rc::new(Cell::new(0));
        let mut slot = NativeSlot::new();
        slot.replace(CountingHandle::new(0, &released));
        assert_eq!(released.get(), 0);
        slot.replace(CountingHandle::new(1, &released));
        assert_eq!(released.get(), 1);
        assert_eq!(slot.get::<CountingHandle>().map(|h| h.id), Some(1));
        drop(slot);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let released = Rc::new(Cell::new(0));
        let mut slot = NativeSlot::default();
        slot.replace(CountingHandle::new(0, &released));
        slot.release();
        slot.release();
        assert!(!slot.is_set());
        drop(slot);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_downcast() {
        let released = Rc::new(Cell::new(0));
        let mut slot = NativeSlot::new();
        slot.replace(CountingHandle::new(7, &released));
        assert!(slot.get::<OtherHandle>().is_none());
        assert!(slot.take::<OtherHandle>().is_none());
        assert!(slot.is_set());

        if let Some(handle) = slot.get_mut::<CountingHandle>() {
            handle.id = 8;
        }
        let handle = slot.take::<CountingHandle>().expect("handle type mismatch");
        assert_eq!(handle.id, 8);
        assert!(!slot.is_set());
        drop(slot);
        // taken handle is owned by the caller now
        assert_eq!(released.get(), 0);
    }
}
