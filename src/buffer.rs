use alloc::{boxed::Box, collections::TryReserveError, vec::Vec};
use ::core::mem::MaybeUninit;

/// Heap slots for the fixed-capacity containers. Which slots hold a value is
/// tracked by the owner.
pub(crate) type Slots<T> = Box<[MaybeUninit<T>]>;

#[inline]
pub(crate) fn uninit_slots<T>(capacity: usize) -> Slots<T> {
    Box::new_uninit_slice(capacity)
}

/// Like [`uninit_slots`], but reports a capacity that cannot be allocated
/// instead of panicking or aborting.
pub(crate) fn try_uninit_slots<T>(capacity: usize) -> Result<Slots<T>, TryReserveError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    // uninitialized `MaybeUninit` slots are valid values
    unsafe { slots.set_len(capacity) };
    Ok(slots.into_boxed_slice())
}

/// # Safety
///
/// Every slot in `slots` must be initialized.
#[inline]
pub(crate) unsafe fn assume_init_slice<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    unsafe { &*(slots as *const [MaybeUninit<T>] as *const [T]) }
}

/// # Safety
///
/// Every slot in `slots` must be initialized.
#[inline]
pub(crate) unsafe fn assume_init_slice_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    unsafe { &mut *(slots as *mut [MaybeUninit<T>] as *mut [T]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_uninit_slots() {
        assert_eq!(try_uninit_slots::<u64>(4).unwrap().len(), 4);
        assert!(try_uninit_slots::<u64>(usize::MAX).is_err());
        assert!(try_uninit_slots::<u64>(usize::MAX / 4).is_err());
        assert_eq!(try_uninit_slots::<()>(usize::MAX).unwrap().len(), usize::MAX);
    }
}
