//! Encoded size of a record, computed from its fields without encoding it.

use crate::list::CountWidth;
use crate::record::{FieldVisitor, Fields};
use crate::value::Scalar;

/// Exact number of bytes `record` encodes to.
///
/// Scalars contribute their declared width whatever their value, so a self-referential
/// length field always counts as its width. A list contributes its count width plus the
/// size of every element.
pub fn size_of(record: &dyn Fields) -> usize {
    let mut v = SizeVisitor { total: 0 };
    record.visit_fields(&mut v);
    v.total
}

struct SizeVisitor {
    total: usize,
}

impl FieldVisitor for SizeVisitor {
    fn visit_base(&mut self, base: &dyn Fields) {
        self.total += size_of(base);
    }

    fn visit_scalar(&mut self, _name: &'static str, value: Scalar) {
        self.total += value.kind().width();
    }

    fn visit_bytes(&mut self, _name: &'static str, value: &[u8]) {
        self.total += value.len();
    }

    fn visit_record(&mut self, _name: &'static str, value: &dyn Fields) {
        self.total += size_of(value);
    }

    fn visit_count(&mut self, _name: &'static str, width: CountWidth, _count: usize) {
        self.total += width.bytes();
    }

    fn visit_elements(&mut self, _name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        self.total += elements.map(|e| size_of(e)).sum::<usize>();
    }
}
