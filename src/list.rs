//! Variable-length lists of records.
//!
//! A [`CountedList`] owns its elements and knows the width of the count that precedes
//! (or, for detached counts, announces) it on the wire. There is no stored count: the
//! value written at encode time is always `len()`, so a list can never be sent with a
//! count that disagrees with its contents. Growth past what the count width can express
//! is rejected at mutation time with [`CodecError::CountOverflow`].

use crate::error::CodecError;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// On-wire width of a list count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountWidth {
    U8,
    U16,
    U32,
}

impl CountWidth {
    pub const fn bytes(self) -> usize {
        match self {
            CountWidth::U8 => 1,
            CountWidth::U16 => 2,
            CountWidth::U32 => 4,
        }
    }

    pub const fn max_count(self) -> usize {
        match self {
            CountWidth::U8 => u8::MAX as usize,
            CountWidth::U16 => u16::MAX as usize,
            CountWidth::U32 => u32::MAX as usize,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CountWidth::U8 => "u8",
            CountWidth::U16 => "u16",
            CountWidth::U32 => "u32",
        }
    }
}

/// Marker trait tying a count width to a Rust integer type.
pub trait CountPrefix: Send + Sync + 'static {
    const WIDTH: CountWidth;
}

impl CountPrefix for u8 {
    const WIDTH: CountWidth = CountWidth::U8;
}

impl CountPrefix for u16 {
    const WIDTH: CountWidth = CountWidth::U16;
}

impl CountPrefix for u32 {
    const WIDTH: CountWidth = CountWidth::U32;
}

/// List with a 1-byte count.
pub type List8<T> = CountedList<T, u8>;
/// List with a 2-byte count.
pub type List16<T> = CountedList<T, u16>;
/// List with a 4-byte count.
pub type List32<T> = CountedList<T, u32>;

pub struct CountedList<T, W: CountPrefix> {
    items: Vec<T>,
    _width: PhantomData<W>,
}

impl<T, W: CountPrefix> CountedList<T, W> {
    pub const WIDTH: CountWidth = W::WIDTH;

    pub fn new() -> Self {
        CountedList {
            items: Vec::new(),
            _width: PhantomData,
        }
    }

    /// Element count as it will appear on the wire.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, item: T) -> Result<(), CodecError> {
        if self.items.len() >= W::WIDTH.max_count() {
            return Err(CodecError::CountOverflow {
                width: W::WIDTH,
                len: self.items.len() + 1,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, f: F) {
        self.items.retain(f);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Build from already-decoded elements; `items.len()` came from a count of width `W`.
    pub(crate) fn from_decoded(items: Vec<T>) -> Self {
        CountedList {
            items,
            _width: PhantomData,
        }
    }
}

impl<T, W: CountPrefix> TryFrom<Vec<T>> for CountedList<T, W> {
    type Error = CodecError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.len() > W::WIDTH.max_count() {
            return Err(CodecError::CountOverflow {
                width: W::WIDTH,
                len: items.len(),
            });
        }
        Ok(CountedList::from_decoded(items))
    }
}

// Slices cannot change length, so handing out `&mut [T]` keeps the count bound intact.
impl<T, W: CountPrefix> Deref for CountedList<T, W> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T, W: CountPrefix> DerefMut for CountedList<T, W> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T, W: CountPrefix> Default for CountedList<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, W: CountPrefix> Clone for CountedList<T, W> {
    fn clone(&self) -> Self {
        CountedList::from_decoded(self.items.clone())
    }
}

impl<T: PartialEq, W: CountPrefix> PartialEq for CountedList<T, W> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Debug, W: CountPrefix> fmt::Debug for CountedList<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T, W: CountPrefix> IntoIterator for &'a CountedList<T, W> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, W: CountPrefix> IntoIterator for CountedList<T, W> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_follows_mutations() {
        let mut list: List16<u32> = CountedList::new();
        list.push(1).unwrap();
        list.push(2).unwrap();
        list.push(3).unwrap();
        assert_eq!(list.count(), 3);
        list.clear();
        assert_eq!(list.count(), 0);
        list.push(9).unwrap();
        assert_eq!(list.count(), 1);
        list[0] = 10;
        assert_eq!(list[0], 10);
    }

    #[test]
    fn u8_count_rejects_256th_element() {
        let mut list: List8<u8> = CountedList::try_from(vec![0u8; 255]).unwrap();
        let err = list.push(1).unwrap_err();
        assert_eq!(
            err,
            CodecError::CountOverflow {
                width: CountWidth::U8,
                len: 256
            }
        );
        assert_eq!(list.count(), 255);
        assert!(List8::<u8>::try_from(vec![0u8; 256]).is_err());
    }

    #[test]
    fn widths() {
        assert_eq!(List8::<u8>::WIDTH.bytes(), 1);
        assert_eq!(List16::<u8>::WIDTH.bytes(), 2);
        assert_eq!(List32::<u8>::WIDTH.bytes(), 4);
        assert_eq!(CountWidth::U16.max_count(), 65535);
    }
}
