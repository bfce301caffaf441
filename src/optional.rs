//! `OptionSlot` — option semantics over a manual slot.
//!
//! A presence flag paired with one [`Slot`], maintaining the invariant
//! that the flag is set exactly when the slot is occupied. Unlike the raw
//! slot, this wrapper is safe: it is the scoped-acquisition layer of the
//! manual-lifetime protocol, releasing its occupant on every exit path by
//! running [`OptionSlot::clear`] on drop.

use core::fmt;

use crate::shape::Erase;
use crate::slot::Slot;

/// A presence flag plus one manual slot.
///
/// # Examples
///
/// ```rust
/// use shroud::OptionSlot;
///
/// let mut opt = OptionSlot::absent();
/// assert!(!opt.is_present());
///
/// opt.assign(String::from("first"));
/// opt.assign(String::from("second")); // replaces in place
/// assert_eq!(opt.get(), "second");
///
/// opt.clear();
/// assert_eq!(opt.get_or(String::from("fallback")), "fallback");
/// ```
pub struct OptionSlot<T: Erase> {
    present: bool,
    slot: Slot<T>,
}

impl<T: Erase> OptionSlot<T> {
    /// Creates an absent value.
    #[inline]
    pub const fn absent() -> Self {
        Self {
            present: false,
            slot: Slot::empty(),
        }
    }

    /// Creates a present value holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            present: true,
            slot: Slot::new(value),
        }
    }

    /// Returns `true` if a value is present.
    #[inline(always)]
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns a copy of the stored value.
    ///
    /// # Panics
    ///
    /// Panics if no value is present; use [`OptionSlot::get_or`] for a
    /// total alternative.
    #[inline]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        assert!(self.present, "OptionSlot::get called on an absent value");
        // SAFETY: `present` implies the slot is occupied.
        unsafe { self.slot.peek() }.clone()
    }

    /// Returns a copy of the stored value, or `default` when absent.
    #[inline]
    pub fn get_or(&self, default: T) -> T
    where
        T: Clone,
    {
        if self.present {
            // SAFETY: `present` implies the slot is occupied.
            unsafe { self.slot.peek() }.clone()
        } else {
            default
        }
    }

    /// Stores `value`, destroying any previous occupant first.
    #[inline]
    pub fn assign(&mut self, value: T) {
        if self.present {
            // SAFETY: `present` implies the slot is occupied.
            unsafe { self.slot.replace(value) };
        } else {
            self.slot.set(value);
            self.present = true;
        }
    }

    /// Copies the state of `other` into `self`: clears when `other` is
    /// absent, assigns a copy of its value otherwise.
    #[inline]
    pub fn assign_from(&mut self, other: &OptionSlot<T>)
    where
        T: Clone,
    {
        if other.present {
            // SAFETY: `present` implies the slot is occupied.
            self.assign(unsafe { other.slot.peek() }.clone());
        } else {
            self.clear();
        }
    }

    /// Destroys the stored value, if any. Idempotent.
    #[inline]
    pub fn clear(&mut self) {
        if self.present {
            // SAFETY: `present` implies the slot is occupied.
            unsafe { self.slot.destroy() };
            self.present = false;
        }
    }

    /// Applies `f` to a copy of the stored value; absent stays absent.
    #[inline]
    pub fn map<U, F>(&self, f: F) -> OptionSlot<U>
    where
        T: Clone,
        U: Erase,
        F: FnOnce(T) -> U,
    {
        if self.present {
            OptionSlot::new(f(self.get()))
        } else {
            OptionSlot::absent()
        }
    }

    /// Applies `f` to a copy of the stored value and returns its result
    /// directly, without double-wrapping; absent stays absent.
    #[inline]
    pub fn flat_map<U, F>(&self, f: F) -> OptionSlot<U>
    where
        T: Clone,
        U: Erase,
        F: FnOnce(T) -> OptionSlot<U>,
    {
        if self.present {
            f(self.get())
        } else {
            OptionSlot::absent()
        }
    }
}

impl<T: Erase> Drop for OptionSlot<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Erase> Default for OptionSlot<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T: Erase + PartialEq> PartialEq for OptionSlot<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.present, other.present) {
            (false, false) => true,
            // SAFETY: both present flags imply occupied slots.
            (true, true) => unsafe { self.slot.peek() == other.slot.peek() },
            _ => false,
        }
    }
}

impl<T: Erase + fmt::Debug> fmt::Debug for OptionSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.present {
            // SAFETY: `present` implies the slot is occupied.
            f.debug_tuple("OptionSlot").field(unsafe { self.slot.peek() }).finish()
        } else {
            f.write_str("OptionSlot(absent)")
        }
    }
}

#[cfg(feature = "serde")]
impl<T: Erase + serde::Serialize> serde::Serialize for OptionSlot<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.present {
            // SAFETY: `present` implies the slot is occupied.
            serializer.serialize_some(unsafe { self.slot.peek() })
        } else {
            serializer.serialize_none()
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for OptionSlot<T>
where
    T: Erase + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::new(value),
            None => Self::absent(),
        })
    }
}

#[cfg(feature = "proptest")]
impl<T> proptest::arbitrary::Arbitrary for OptionSlot<T>
where
    T: Erase + proptest::arbitrary::Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        use proptest::strategy::Strategy;
        proptest::option::of(proptest::arbitrary::any_with::<T>(args))
            .prop_map(|opt| match opt {
                Some(value) => Self::new(value),
                None => Self::absent(),
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_then_assign_then_clear() {
        let mut opt: OptionSlot<String> = OptionSlot::absent();
        assert!(!opt.is_present());

        opt.assign(String::from("a"));
        assert!(opt.is_present());
        assert_eq!(opt.get(), "a");

        opt.clear();
        assert!(!opt.is_present());
        opt.clear(); // idempotent
    }

    #[test]
    fn map_preserves_absence() {
        let absent: OptionSlot<u32> = OptionSlot::absent();
        let mapped = absent.map(|v| v.to_string());
        assert!(!mapped.is_present());

        let present = OptionSlot::new(5u32);
        assert_eq!(present.map(|v| v * 2).get(), 10);
    }

    #[test]
    fn flat_map_does_not_double_wrap() {
        let present = OptionSlot::new(4u32);
        let flattened = present.flat_map(|v| {
            if v % 2 == 0 {
                OptionSlot::new(v / 2)
            } else {
                OptionSlot::absent()
            }
        });
        assert_eq!(flattened.get(), 2);

        let odd = OptionSlot::new(3u32);
        assert!(!odd.flat_map(|_| OptionSlot::<u32>::absent()).is_present());
    }

    #[test]
    #[should_panic(expected = "absent value")]
    fn get_on_absent_panics() {
        let opt: OptionSlot<u32> = OptionSlot::absent();
        let _ = opt.get();
    }
}
