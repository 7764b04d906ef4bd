//! Record model: how a record exposes its fields to the engine.
//!
//! A record type implements two traits:
//!
//! - [`Fields`] walks the record's fields in wire order by calling a [`FieldVisitor`].
//!   Encode, size, hashing, describe and cross-type equality are all visitors, so one
//!   field list drives every one of them and they cannot disagree about layout.
//! - [`Record`] adds the type name and the decoder, which builds the record field by
//!   field from a [`Reader`].
//!
//! ## Extends
//!
//! A record that extends another embeds the base record as a field and reports it through
//! [`FieldVisitor::visit_base`] before any of its own fields. Decoding mirrors that with
//! [`Reader::base`]. The [`Extends`] trait gives typed access to the embedded base.
//!
//! ## Lists
//!
//! A list is either count-prefixed ([`list`](FieldVisitor::list)) or split into a count
//! field announced earlier in the record ([`count_of`](FieldVisitor::count_of)) and the
//! elements later ([`elements`](FieldVisitor::elements)). Either way the count visited is
//! the live list length.
//!
//! ## Example
//!
//! ```
//! use dispdu::{CodecError, FieldVisitor, Fields, Reader, Record};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Pair {
//!     a: u16,
//!     b: f32,
//! }
//!
//! impl Fields for Pair {
//!     fn record_name(&self) -> &'static str {
//!         Self::NAME
//!     }
//!
//!     fn visit_fields(&self, v: &mut dyn FieldVisitor) {
//!         v.scalar("a", self.a);
//!         v.scalar("b", self.b);
//!     }
//! }
//!
//! impl Record for Pair {
//!     const NAME: &'static str = "Pair";
//!
//!     fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError> {
//!         Ok(Pair {
//!             a: r.scalar("a")?,
//!             b: r.scalar("b")?,
//!         })
//!     }
//! }
//!
//! let p = Pair { a: 7, b: 0.5 };
//! assert_eq!(p.encoded_size(), 6);
//! assert_eq!(Pair::from_bytes(&p.to_bytes()).unwrap(), p);
//! ```

use crate::codec::{Endianness, Reader, Writer};
use crate::describe::{self, FieldEntry};
use crate::error::CodecError;
use crate::hash;
use crate::list::{CountPrefix, CountWidth, CountedList};
use crate::size;
use crate::value::Scalar;
use std::fmt;

/// Receives a record's fields in wire order.
pub trait FieldVisitor {
    /// The embedded base record of an extending record. Always visited first.
    fn visit_base(&mut self, base: &dyn Fields);
    fn visit_scalar(&mut self, name: &'static str, value: Scalar);
    /// Fixed-size byte array.
    fn visit_bytes(&mut self, name: &'static str, value: &[u8]);
    /// Nested record.
    fn visit_record(&mut self, name: &'static str, value: &dyn Fields);
    /// On-wire element count of a list.
    fn visit_count(&mut self, name: &'static str, width: CountWidth, count: usize);
    /// List elements, in order.
    fn visit_elements(&mut self, name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>);
}

impl dyn FieldVisitor + '_ {
    pub fn base<T: Fields>(&mut self, base: &T) {
        self.visit_base(base);
    }

    pub fn scalar<T: Into<Scalar>>(&mut self, name: &'static str, value: T) {
        self.visit_scalar(name, value.into());
    }

    pub fn bytes(&mut self, name: &'static str, value: &[u8]) {
        self.visit_bytes(name, value);
    }

    pub fn record<T: Fields>(&mut self, name: &'static str, value: &T) {
        self.visit_record(name, value);
    }

    /// Count-prefixed list: the count, then the elements.
    pub fn list<T: Fields, W: CountPrefix>(&mut self, name: &'static str, list: &CountedList<T, W>) {
        self.visit_count(name, W::WIDTH, list.count());
        self.elements(name, list);
    }

    /// Count field of a list whose elements appear later in the record.
    pub fn count_of<T, W: CountPrefix>(&mut self, name: &'static str, list: &CountedList<T, W>) {
        self.visit_count(name, W::WIDTH, list.count());
    }

    /// Elements of a list whose count was visited earlier with [`count_of`](Self::count_of).
    pub fn elements<T: Fields>(&mut self, name: &'static str, items: &[T]) {
        self.visit_elements(name, &mut items.iter().map(|item| item as &dyn Fields));
    }
}

/// Object-safe field access shared by every record type.
pub trait Fields {
    /// Concrete record type name.
    fn record_name(&self) -> &'static str;

    fn visit_fields(&self, v: &mut dyn FieldVisitor);
}

/// A record type with a fixed wire layout.
pub trait Record: Fields + Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;

    /// Build the record from its fields in wire order. Use [`Record::decode`] to call it.
    fn decode_fields(r: &mut Reader<'_>) -> Result<Self, CodecError>;

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        r.in_record(Self::NAME, Self::decode_fields)
    }

    fn encode(&self, w: &mut Writer) {
        w.write_record(self);
    }

    /// Exact number of bytes [`Record::encode`] produces for the current field values.
    fn encoded_size(&self) -> usize {
        size::size_of(self)
    }

    /// Encode in network byte order.
    fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with(Endianness::default())
    }

    fn to_bytes_with(&self, endianness: Endianness) -> Vec<u8> {
        let mut w = Writer::with_capacity(endianness, self.encoded_size());
        self.encode(&mut w);
        w.into_bytes()
    }

    /// Decode one record from the start of `bytes` in network byte order. Trailing bytes
    /// are left unread.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Self::from_bytes_with(bytes, Endianness::default())
    }

    fn from_bytes_with(bytes: &[u8], endianness: Endianness) -> Result<Self, CodecError> {
        Self::decode(&mut Reader::new(bytes, endianness))
    }

    fn structural_hash(&self) -> u64 {
        hash::structural_hash(self)
    }

    fn describe(&self) -> Vec<FieldEntry> {
        describe::describe(self)
    }
}

/// A record whose wire layout is `Base`'s layout followed by its own fields.
pub trait Extends: Record {
    type Base: Record;

    fn base(&self) -> &Self::Base;

    fn base_mut(&mut self) -> &mut Self::Base;

    /// Encoding of the fields declared by this record alone.
    fn own_fields_to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        let mut w = Writer::new(endianness);
        w.write_own_fields(self);
        w.into_bytes()
    }
}

/// Structural equality across record types: false when the concrete types differ,
/// otherwise every field (base fields included) must compare equal.
///
/// `a` is flattened into its leaf values once; `b` is then walked against them and the
/// walk stops comparing at the first difference.
pub fn equals(a: &dyn Fields, b: &dyn Fields) -> bool {
    if a.record_name() != b.record_name() {
        return false;
    }
    let mut flat = Flatten::default();
    a.visit_fields(&mut flat);
    let mut cmp = CompareLeaves {
        leaves: &flat.leaves,
        bytes: &flat.bytes,
        pos: 0,
        equal: true,
    };
    b.visit_fields(&mut cmp);
    cmp.equal && cmp.pos == flat.leaves.len()
}

#[derive(Debug, PartialEq)]
enum Leaf {
    Scalar(Scalar),
    /// Range into the flattened byte arrays.
    Bytes(std::ops::Range<usize>),
    Count(CountWidth, usize),
}

#[derive(Default)]
struct Flatten {
    leaves: Vec<Leaf>,
    bytes: Vec<u8>,
}

impl FieldVisitor for Flatten {
    fn visit_base(&mut self, base: &dyn Fields) {
        base.visit_fields(self);
    }

    fn visit_scalar(&mut self, _name: &'static str, value: Scalar) {
        self.leaves.push(Leaf::Scalar(value));
    }

    fn visit_bytes(&mut self, _name: &'static str, value: &[u8]) {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(value);
        self.leaves.push(Leaf::Bytes(start..self.bytes.len()));
    }

    fn visit_record(&mut self, _name: &'static str, value: &dyn Fields) {
        value.visit_fields(self);
    }

    fn visit_count(&mut self, _name: &'static str, width: CountWidth, count: usize) {
        self.leaves.push(Leaf::Count(width, count));
    }

    fn visit_elements(&mut self, _name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        for element in elements {
            element.visit_fields(self);
        }
    }
}

struct CompareLeaves<'a> {
    leaves: &'a [Leaf],
    bytes: &'a [u8],
    pos: usize,
    equal: bool,
}

impl<'a> CompareLeaves<'a> {
    fn next(&mut self) -> Option<&'a Leaf> {
        let leaves = self.leaves;
        let leaf = leaves.get(self.pos);
        self.pos += 1;
        leaf
    }

    fn check(&mut self, same: impl FnOnce(&'a Leaf, &'a [u8]) -> bool) {
        if !self.equal {
            return;
        }
        let bytes = self.bytes;
        self.equal = match self.next() {
            Some(leaf) => same(leaf, bytes),
            None => false,
        };
    }
}

impl FieldVisitor for CompareLeaves<'_> {
    fn visit_base(&mut self, base: &dyn Fields) {
        if self.equal {
            base.visit_fields(self);
        }
    }

    fn visit_scalar(&mut self, _name: &'static str, value: Scalar) {
        self.check(|leaf, _| *leaf == Leaf::Scalar(value));
    }

    fn visit_bytes(&mut self, _name: &'static str, value: &[u8]) {
        self.check(|leaf, bytes| matches!(leaf, Leaf::Bytes(range) if &bytes[range.clone()] == value));
    }

    fn visit_record(&mut self, _name: &'static str, value: &dyn Fields) {
        if self.equal {
            value.visit_fields(self);
        }
    }

    fn visit_count(&mut self, _name: &'static str, width: CountWidth, count: usize) {
        self.check(|leaf, _| *leaf == Leaf::Count(width, count));
    }

    fn visit_elements(&mut self, _name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        for element in elements {
            if !self.equal {
                return;
            }
            element.visit_fields(self);
        }
    }
}
