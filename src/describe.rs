//! Flatten a record into `(path, declared type, value)` leaf entries.
//!
//! This is the raw material for a pretty-printer; no formatting happens here. Entries come
//! out in wire order. List counts appear as their own entry (at the count's field name),
//! followed by the elements' leaves under `name[i]`.

use crate::list::CountWidth;
use crate::record::{FieldVisitor, Fields};
use crate::value::{FieldValue, Scalar, ScalarKind};

/// Declared wire type of a leaf entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Scalar(ScalarKind),
    /// Fixed-size byte array of the given length.
    Bytes(usize),
    /// List count of the given width.
    Count(CountWidth),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub path: String,
    pub declared: DeclaredType,
    pub value: FieldValue,
}

pub fn describe(record: &dyn Fields) -> Vec<FieldEntry> {
    let mut v = DescribeVisitor {
        prefix: String::new(),
        out: Vec::new(),
    };
    record.visit_fields(&mut v);
    v.out
}

struct DescribeVisitor {
    prefix: String,
    out: Vec<FieldEntry>,
}

impl DescribeVisitor {
    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    fn nested(&mut self, prefix: String, record: &dyn Fields) {
        let saved = std::mem::replace(&mut self.prefix, prefix);
        record.visit_fields(self);
        self.prefix = saved;
    }
}

impl FieldVisitor for DescribeVisitor {
    fn visit_base(&mut self, base: &dyn Fields) {
        base.visit_fields(self);
    }

    fn visit_scalar(&mut self, name: &'static str, value: Scalar) {
        self.out.push(FieldEntry {
            path: self.path(name),
            declared: DeclaredType::Scalar(value.kind()),
            value: FieldValue::Scalar(value),
        });
    }

    fn visit_bytes(&mut self, name: &'static str, value: &[u8]) {
        self.out.push(FieldEntry {
            path: self.path(name),
            declared: DeclaredType::Bytes(value.len()),
            value: FieldValue::Bytes(value.to_vec()),
        });
    }

    fn visit_record(&mut self, name: &'static str, value: &dyn Fields) {
        let prefix = self.path(name);
        self.nested(prefix, value);
    }

    fn visit_count(&mut self, name: &'static str, width: CountWidth, count: usize) {
        self.out.push(FieldEntry {
            path: self.path(name),
            declared: DeclaredType::Count(width),
            value: FieldValue::Count(count),
        });
    }

    fn visit_elements(&mut self, name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        let base = self.path(name);
        for (i, element) in elements.enumerate() {
            self.nested(format!("{}[{}]", base, i), element);
        }
    }
}
