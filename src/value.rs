//! Runtime view of field values (used by describe, equality and hashing).

/// Declared type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F32,
    F64,
}

impl ScalarKind {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 => 4,
            ScalarKind::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }
}

/// A single scalar field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    U8(u8),
    U16(u16),
    U32(u32),
    I8(i8),
    I16(i16),
    I32(i32),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::U8(x) => Some(*x as u64),
            Scalar::U16(x) => Some(*x as u64),
            Scalar::U32(x) => Some(*x as u64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::I8(x) => Some(*x as i64),
            Scalar::I16(x) => Some(*x as i64),
            Scalar::I32(x) => Some(*x as i64),
            Scalar::U8(x) => Some(*x as i64),
            Scalar::U16(x) => Some(*x as i64),
            Scalar::U32(x) => Some(*x as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::F32(x) => Some(*x as f64),
            Scalar::F64(x) => Some(*x),
            _ => None,
        }
    }

    /// Bits fed to the structural hash. Integers are sign-extended; floats use their
    /// IEEE-754 pattern with `-0.0` folded onto `+0.0` so that equal values hash equal.
    pub fn hash_bits(&self) -> u64 {
        match self {
            Scalar::U8(x) => *x as u64,
            Scalar::U16(x) => *x as u64,
            Scalar::U32(x) => *x as u64,
            Scalar::I8(x) => *x as i64 as u64,
            Scalar::I16(x) => *x as i64 as u64,
            Scalar::I32(x) => *x as i64 as u64,
            Scalar::F32(x) => {
                if *x == 0.0 {
                    0
                } else {
                    x.to_bits() as u64
                }
            }
            Scalar::F64(x) => {
                if *x == 0.0 {
                    0
                } else {
                    x.to_bits()
                }
            }
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::$variant(v)
                }
            }
        )*
    };
}

scalar_from! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}

/// Value of one leaf entry produced by [`describe`](crate::describe::describe).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Scalar),
    Bytes(Vec<u8>),
    /// On-wire element count of a list, derived from the list length.
    Count(usize),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            FieldValue::Count(n) => Some(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_hashes_like_zero() {
        assert_eq!(Scalar::F32(-0.0).hash_bits(), Scalar::F32(0.0).hash_bits());
        assert_eq!(Scalar::F64(-0.0).hash_bits(), Scalar::F64(0.0).hash_bits());
        assert_ne!(Scalar::F32(1.0).hash_bits(), Scalar::F32(-1.0).hash_bits());
    }

    #[test]
    fn signed_values_sign_extend() {
        assert_eq!(Scalar::I16(-1).hash_bits(), u64::MAX);
        assert_eq!(Scalar::I16(-1).as_i64(), Some(-1));
        assert_eq!(Scalar::U16(300).as_u64(), Some(300));
        assert_eq!(Scalar::F32(1.5).as_u64(), None);
    }

    #[test]
    fn widths_match_kinds() {
        assert_eq!(Scalar::from(7u16).kind().width(), 2);
        assert_eq!(Scalar::from(1.0f64).kind().width(), 8);
        assert_eq!(ScalarKind::I8.name(), "i8");
    }
}
