//! Order-sensitive structural hash over records.
//!
//! Every field, in wire order with base-record fields first, is folded into the running
//! state with `h = (rotl(h, 5) + h) ^ field`. Nested records and list elements are hashed
//! recursively from a fresh seed and folded in as one value each, so both field order and
//! nesting shape affect the result. This is for bucketing and test oracles, not integrity.

use crate::list::CountWidth;
use crate::record::{FieldVisitor, Fields};
use crate::value::Scalar;

const SEED: u64 = 0;

/// One combining step.
#[inline]
pub fn combine(h: u64, field: u64) -> u64 {
    h.rotate_left(5).wrapping_add(h) ^ field
}

/// Structural hash of a record.
pub fn structural_hash(record: &dyn Fields) -> u64 {
    let mut v = HashVisitor { h: SEED };
    record.visit_fields(&mut v);
    v.h
}

struct HashVisitor {
    h: u64,
}

impl HashVisitor {
    fn fold(&mut self, field: u64) {
        self.h = combine(self.h, field);
    }
}

impl FieldVisitor for HashVisitor {
    // Base fields are part of the same field sequence, not a nested value.
    fn visit_base(&mut self, base: &dyn Fields) {
        base.visit_fields(self);
    }

    fn visit_scalar(&mut self, _name: &'static str, value: Scalar) {
        self.fold(value.hash_bits());
    }

    fn visit_bytes(&mut self, _name: &'static str, value: &[u8]) {
        for &b in value {
            self.fold(b as u64);
        }
    }

    fn visit_record(&mut self, _name: &'static str, value: &dyn Fields) {
        self.fold(structural_hash(value));
    }

    fn visit_count(&mut self, _name: &'static str, _width: CountWidth, count: usize) {
        self.fold(count as u64);
    }

    fn visit_elements(&mut self, _name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        for element in elements {
            self.fold(structural_hash(element));
        }
    }
}
