//! State shared between event handlers and ordinary code
//!
//! Wraps a value in a `critical-section` mutex so every access runs with
//! preemption disabled. A read-modify-write of the strip masks done inside
//! [`Shared::lock`] can never be interleaved with an event handler.

use core::cell::RefCell;

use critical_section::Mutex;

/// Value guarded by a critical section
pub struct Shared<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Create a new guarded value
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value
    ///
    /// `f` runs inside a critical section and must not call `lock` on the
    /// same value again.
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow(cs).borrow_mut();
            f(&mut value)
        })
    }

    /// Swap in a new value, returning the old one
    pub fn replace(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).replace(value))
    }
}

impl<T> Shared<Option<T>> {
    /// Run `f` if the value has been installed
    ///
    /// Returns `None` while the value is still empty.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.lock(|slot| slot.as_mut().map(f))
    }
}
