// SPDX-License-Identifier: MIT
use crate::exception;
use crate::sync::interface::Mutex;

//--------------------------------------------------------------------------------------------------
// Public definitions
//--------------------------------------------------------------------------------------------------
/// A spin lock that masks local interrupts while held.
///
/// Masking keeps an interrupt handler on the same core from spinning on a lock its own core
/// already holds; the spin part serialises the other cores.
pub struct IRQSafeSpinLock<T>
where
    T: ?Sized,
{
    inner: spin::Mutex<T>,
}

//--------------------------------------------------------------------------------------------------
// Public code
//--------------------------------------------------------------------------------------------------
impl<T> IRQSafeSpinLock<T> {
    pub const fn new(data: T) -> Self {
        Self {
            inner: spin::Mutex::new(data),
        }
    }
}

impl<T> Mutex for IRQSafeSpinLock<T> {
    type Data = T;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Data) -> R) -> R {
        exception::asynchronous::exec_with_masked_irqs(|| {
            let mut data = self.inner.lock();

            f(&mut data)
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_grants_mutable_access() {
        let lock = IRQSafeSpinLock::new(0u32);

        lock.lock(|value| *value += 5);
        let seen = lock.lock(|value| *value);

        assert_eq!(seen, 5);
    }

    #[test]
    fn lock_serialises_threads() {
        let lock = IRQSafeSpinLock::new(0u64);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        lock.lock(|value| {
                            let read = *value;
                            *value = read + 1;
                        });
                    }
                });
            }
        });

        assert_eq!(lock.lock(|value| *value), 4000);
    }
}
