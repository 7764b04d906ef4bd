//! Primitive codec and the record encode/decode cursors.
//!
//! [`Writer`] appends fixed-width scalars to a growable buffer and never fails.
//! [`Reader`] walks a borrowed slice; every read checks the remaining length first, so a
//! failed read leaves the cursor where it was. The reader also tracks the record and field
//! path being decoded, which is what [`CodecError::TruncatedInput`] and
//! [`CodecError::InvalidLength`] report.

use crate::error::CodecError;
use crate::list::{CountPrefix, CountWidth, CountedList};
use crate::record::{FieldVisitor, Fields, Record};
use crate::value::{Scalar, ScalarKind};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order for multi-byte fields. DIS uses network (big-endian) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

/// Fixed-width scalar that can be put on the wire.
pub trait Primitive: Copy + Into<Scalar> {
    const KIND: ScalarKind;
    const WIDTH: usize = Self::KIND.width();

    /// Read from exactly `WIDTH` bytes.
    fn read_from(buf: &[u8], endianness: Endianness) -> Self;

    /// Write into exactly `WIDTH` bytes.
    fn write_to(self, buf: &mut [u8], endianness: Endianness);
}

impl Primitive for u8 {
    const KIND: ScalarKind = ScalarKind::U8;

    fn read_from(buf: &[u8], _: Endianness) -> Self {
        buf[0]
    }

    fn write_to(self, buf: &mut [u8], _: Endianness) {
        buf[0] = self;
    }
}

impl Primitive for i8 {
    const KIND: ScalarKind = ScalarKind::I8;

    fn read_from(buf: &[u8], _: Endianness) -> Self {
        buf[0] as i8
    }

    fn write_to(self, buf: &mut [u8], _: Endianness) {
        buf[0] = self as u8;
    }
}

macro_rules! multi_byte_primitive {
    ($($t:ty => $kind:ident, $read:ident, $write:ident;)*) => {
        $(
            impl Primitive for $t {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn read_from(buf: &[u8], endianness: Endianness) -> Self {
                    match endianness {
                        Endianness::Big => BigEndian::$read(buf),
                        Endianness::Little => LittleEndian::$read(buf),
                    }
                }

                fn write_to(self, buf: &mut [u8], endianness: Endianness) {
                    match endianness {
                        Endianness::Big => BigEndian::$write(buf, self),
                        Endianness::Little => LittleEndian::$write(buf, self),
                    }
                }
            }
        )*
    };
}

multi_byte_primitive! {
    u16 => U16, read_u16, write_u16;
    u32 => U32, read_u32, write_u32;
    i16 => I16, read_i16, write_i16;
    i32 => I32, read_i32, write_i32;
    f32 => F32, read_f32, write_f32;
    f64 => F64, read_f64, write_f64;
}

/// Encode cursor over a growable buffer.
#[derive(Debug, Clone)]
pub struct Writer {
    buf: Vec<u8>,
    endianness: Endianness,
}

impl Writer {
    pub fn new(endianness: Endianness) -> Self {
        Writer {
            buf: Vec::new(),
            endianness,
        }
    }

    pub fn with_capacity(endianness: Endianness, capacity: usize) -> Self {
        Writer {
            buf: Vec::with_capacity(capacity),
            endianness,
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put<T: Primitive>(&mut self, value: T) {
        let start = self.buf.len();
        self.buf.resize(start + T::WIDTH, 0);
        value.write_to(&mut self.buf[start..], self.endianness);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.put(v);
    }
    pub fn write_u16(&mut self, v: u16) {
        self.put(v);
    }
    pub fn write_u32(&mut self, v: u32) {
        self.put(v);
    }
    pub fn write_i8(&mut self, v: i8) {
        self.put(v);
    }
    pub fn write_i16(&mut self, v: i16) {
        self.put(v);
    }
    pub fn write_i32(&mut self, v: i32) {
        self.put(v);
    }
    pub fn write_f32(&mut self, v: f32) {
        self.put(v);
    }
    pub fn write_f64(&mut self, v: f64) {
        self.put(v);
    }

    pub fn put_scalar(&mut self, value: Scalar) {
        match value {
            Scalar::U8(x) => self.put(x),
            Scalar::U16(x) => self.put(x),
            Scalar::U32(x) => self.put(x),
            Scalar::I8(x) => self.put(x),
            Scalar::I16(x) => self.put(x),
            Scalar::I32(x) => self.put(x),
            Scalar::F32(x) => self.put(x),
            Scalar::F64(x) => self.put(x),
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a list count. `count` is a live list length, which `CountedList` keeps within
    /// the width.
    pub(crate) fn put_count(&mut self, width: CountWidth, count: usize) {
        debug_assert!(count <= width.max_count());
        match width {
            CountWidth::U8 => self.put(count as u8),
            CountWidth::U16 => self.put(count as u16),
            CountWidth::U32 => self.put(count as u32),
        }
    }

    /// Encode a record: base fields first, then its own fields in declaration order.
    pub fn write_record(&mut self, record: &dyn Fields) {
        record.visit_fields(&mut EncodeVisitor {
            w: self,
            skip_base: false,
        });
    }

    /// Encode only the fields a record declares itself, leaving out its base record.
    pub fn write_own_fields(&mut self, record: &dyn Fields) {
        record.visit_fields(&mut EncodeVisitor {
            w: self,
            skip_base: true,
        });
    }
}

struct EncodeVisitor<'w> {
    w: &'w mut Writer,
    skip_base: bool,
}

impl FieldVisitor for EncodeVisitor<'_> {
    fn visit_base(&mut self, base: &dyn Fields) {
        if !self.skip_base {
            self.w.write_record(base);
        }
    }

    fn visit_scalar(&mut self, _name: &'static str, value: Scalar) {
        self.w.put_scalar(value);
    }

    fn visit_bytes(&mut self, _name: &'static str, value: &[u8]) {
        self.w.put_bytes(value);
    }

    fn visit_record(&mut self, _name: &'static str, value: &dyn Fields) {
        self.w.write_record(value);
    }

    fn visit_count(&mut self, _name: &'static str, width: CountWidth, count: usize) {
        self.w.put_count(width, count);
    }

    fn visit_elements(&mut self, _name: &'static str, elements: &mut dyn Iterator<Item = &dyn Fields>) {
        for element in elements {
            self.w.write_record(element);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// Decode cursor over a borrowed buffer.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    endianness: Endianness,
    records: Vec<&'static str>,
    path: Vec<PathSegment>,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        Reader {
            data,
            pos: 0,
            endianness,
            records: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current field path, e.g. `articulation_parameters[1].parameter_value`.
    pub fn path(&self) -> String {
        let mut out = String::new();
        for seg in &self.path {
            match seg {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Outermost record being decoded.
    fn root_record(&self) -> &'static str {
        self.records.first().copied().unwrap_or("<none>")
    }

    fn truncated(&self, needed: usize) -> CodecError {
        CodecError::TruncatedInput {
            record: self.root_record(),
            path: self.path(),
            needed,
            remaining: self.remaining(),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        let data = self.data;
        let out = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn with_segment<R>(
        &mut self,
        seg: PathSegment,
        f: impl FnOnce(&mut Self) -> Result<R, CodecError>,
    ) -> Result<R, CodecError> {
        self.path.push(seg);
        let out = f(self);
        self.path.pop();
        out
    }

    pub(crate) fn in_record<R>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<R, CodecError>,
    ) -> Result<R, CodecError> {
        self.records.push(name);
        let out = f(self);
        self.records.pop();
        out
    }

    /// Read one primitive at the current path.
    pub fn read<T: Primitive>(&mut self) -> Result<T, CodecError> {
        let endianness = self.endianness;
        let buf = self.take(T::WIDTH)?;
        Ok(T::read_from(buf, endianness))
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.read()
    }
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.read()
    }
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read()
    }
    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        self.read()
    }
    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        self.read()
    }
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.read()
    }
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        self.read()
    }
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.read()
    }

    /// Read a named scalar field.
    pub fn scalar<T: Primitive>(&mut self, name: &'static str) -> Result<T, CodecError> {
        self.with_segment(PathSegment::Field(name), |r| r.read())
    }

    /// Read a named fixed-size byte array.
    pub fn bytes<const N: usize>(&mut self, name: &'static str) -> Result<[u8; N], CodecError> {
        self.with_segment(PathSegment::Field(name), |r| {
            let mut out = [0u8; N];
            out.copy_from_slice(r.take(N)?);
            Ok(out)
        })
    }

    /// Decode a nested record field.
    pub fn record<T: Record>(&mut self, name: &'static str) -> Result<T, CodecError> {
        self.with_segment(PathSegment::Field(name), T::decode)
    }

    /// Decode the base record of an extending record. Base fields sit at the same path
    /// level as the derived record's own fields.
    pub fn base<T: Record>(&mut self) -> Result<T, CodecError> {
        T::decode(self)
    }

    /// Read a list count of width `W`.
    pub fn count<W: CountPrefix>(&mut self, name: &'static str) -> Result<usize, CodecError> {
        self.with_segment(PathSegment::Field(name), |r| {
            Ok(match W::WIDTH {
                CountWidth::U8 => r.read::<u8>()? as usize,
                CountWidth::U16 => r.read::<u16>()? as usize,
                CountWidth::U32 => r.read::<u32>()? as usize,
            })
        })
    }

    /// Decode exactly `count` elements. Fails with [`CodecError::InvalidLength`] before
    /// reading anything when even minimum-size elements cannot fit in what remains.
    pub fn elements<T: Record, W: CountPrefix>(
        &mut self,
        name: &'static str,
        count: usize,
    ) -> Result<CountedList<T, W>, CodecError> {
        self.with_segment(PathSegment::Field(name), |r| {
            let min = T::default().encoded_size();
            let needed = count.saturating_mul(min);
            if needed > r.remaining() {
                return Err(CodecError::InvalidLength {
                    record: r.root_record(),
                    path: r.path(),
                    count,
                    needed,
                    remaining: r.remaining(),
                });
            }
            let mut items = Vec::with_capacity(count);
            for i in 0..count {
                items.push(r.with_segment(PathSegment::Index(i), T::decode)?);
            }
            Ok(CountedList::from_decoded(items))
        })
    }

    /// Decode a count-prefixed list.
    pub fn list<T: Record, W: CountPrefix>(
        &mut self,
        name: &'static str,
    ) -> Result<CountedList<T, W>, CodecError> {
        let count = self.count::<W>(name)?;
        self.elements(name, count)
    }
}
