//! Runtime view of record field values.
//!
//! [`FieldValue`] is what the classifier and the projectors see of a field:
//! a borrowed, kind-tagged snapshot produced by [`AsFieldValue`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use crate::Record;

/// Kind of a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// Floating point numbers.
    Float,
    /// `char`
    Char,
    /// Strings.
    String,
    /// Ordered collections (`Vec`, slices, arrays).
    Sequence,
    /// Key/value collections.
    Map,
    /// Structs implementing [`Record`].
    Struct,
    /// Values whose shape is only known at runtime (`serde_json::Value`).
    Dynamic,
    /// Optional values.
    Optional,
}

impl Kind {
    /// Returns `true` for kinds rendered as a single textual value.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::Char | Self::String
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Struct => "struct",
            Self::Dynamic => "dynamic",
            Self::Optional => "optional",
        };
        f.write_str(name)
    }
}

/// Borrowed view of a single field value.
#[derive(Clone)]
pub enum FieldValue<'a> {
    /// Boolean value.
    Bool(bool),
    /// Signed integer, widened to `i64`.
    Int(i64),
    /// Unsigned integer, widened to `u64`.
    Uint(u64),
    /// Floating point number, widened to `f64`.
    Float(f64),
    /// Single character.
    Char(char),
    /// Text.
    Str(Cow<'a, str>),
    /// Collection elements in order.
    Seq(Vec<FieldValue<'a>>),
    /// Key/value collection; only its size matters to binding.
    Map {
        /// Number of entries.
        len: usize,
    },
    /// Nested record.
    Record(&'a dyn Record),
    /// Runtime-typed JSON value.
    Dynamic(&'a serde_json::Value),
    /// Optional value, `None` when absent.
    Optional(Option<Box<FieldValue<'a>>>),
}

impl<'a> FieldValue<'a> {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::Char(_) => Kind::Char,
            Self::Str(_) => Kind::String,
            Self::Seq(_) => Kind::Sequence,
            Self::Map { .. } => Kind::Map,
            Self::Record(_) => Kind::Struct,
            Self::Dynamic(_) => Kind::Dynamic,
            Self::Optional(_) => Kind::Optional,
        }
    }

    /// Removes one level of optionality.
    ///
    /// Returns `None` for an absent optional, the inner value for a present
    /// one and the value itself otherwise.
    #[must_use]
    pub fn deref_optional(self) -> Option<Self> {
        match self {
            Self::Optional(inner) => inner.map(|value| *value),
            other => Some(other),
        }
    }

    /// Returns `true` if this is the zero value of its kind.
    ///
    /// Records and dynamic values are never considered empty.
    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Float(x) => *x == 0.0,
            Self::Char(c) => *c == '\0',
            Self::Str(s) => s.is_empty(),
            Self::Seq(items) => items.is_empty(),
            Self::Map { len } => *len == 0,
            Self::Optional(inner) => inner.is_none(),
            Self::Record(_) | Self::Dynamic(_) => false,
        }
    }

    /// Returns the nested record, if this value is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Self::Record(record) => Some(*record),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map { len } => f.debug_struct("Map").field("len", len).finish(),
            Self::Record(record) => f
                .debug_tuple("Record")
                .field(&record.fields().len())
                .finish(),
            Self::Dynamic(value) => f.debug_tuple("Dynamic").field(value).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
        }
    }
}

/// Textual form used for path segments and query values.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map { len } => write!(f, "map[{len}]"),
            Self::Record(_) => f.write_str("{...}"),
            Self::Dynamic(value) => write!(f, "{value}"),
            Self::Optional(Some(inner)) => write!(f, "{inner}"),
            Self::Optional(None) => Ok(()),
        }
    }
}

/// Conversion of a Rust value into a [`FieldValue`].
///
/// `#[derive(Bind)]` requires every field tagged for the path or the query
/// (and every `#[bind(flatten)]` field) to implement this trait.
pub trait AsFieldValue {
    /// Borrow this value as a [`FieldValue`].
    fn as_field_value(&self) -> FieldValue<'_>;
}

macro_rules! impl_as_field_value {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(<$target>::from(*self))
                }
            }
        )+
    };
}

impl_as_field_value!(Int as i64: i8, i16, i32, i64);
impl_as_field_value!(Uint as u64: u8, u16, u32, u64);
impl_as_field_value!(Float as f64: f32, f64);

impl AsFieldValue for isize {
    fn as_field_value(&self) -> FieldValue<'_> {
        // isize is at most 64 bits wide on every supported target
        FieldValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl AsFieldValue for usize {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Uint(u64::try_from(*self).unwrap_or(u64::MAX))
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for char {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Char(*self)
    }
}

impl AsFieldValue for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self))
    }
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_str()))
    }
}

impl AsFieldValue for Cow<'_, str> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl AsFieldValue for serde_json::Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Dynamic(self)
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Optional(self.as_ref().map(|value| Box::new(value.as_field_value())))
    }
}

impl<T: AsFieldValue> AsFieldValue for [T] {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.iter().map(AsFieldValue::as_field_value).collect())
    }
}

impl<T: AsFieldValue, const N: usize> AsFieldValue for [T; N] {
    fn as_field_value(&self) -> FieldValue<'_> {
        self.as_slice().as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for Vec<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        self.as_slice().as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for VecDeque<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Seq(self.iter().map(AsFieldValue::as_field_value).collect())
    }
}

impl<K, V, S> AsFieldValue for HashMap<K, V, S> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map { len: self.len() }
    }
}

impl<K, V> AsFieldValue for BTreeMap<K, V> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map { len: self.len() }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn scalar_kinds() {
        check!(7_u8.as_field_value().kind() == Kind::Uint);
        check!((-7_i32).as_field_value().kind() == Kind::Int);
        check!(1.5_f32.as_field_value().kind() == Kind::Float);
        check!(true.as_field_value().kind() == Kind::Bool);
        check!('x'.as_field_value().kind() == Kind::Char);
        check!("foo".as_field_value().kind() == Kind::String);
        check!(String::from("foo").as_field_value().kind() == Kind::String);
    }

    #[test]
    fn collection_kinds() {
        check!(vec![1, 2].as_field_value().kind() == Kind::Sequence);
        check!([1, 2, 3].as_field_value().kind() == Kind::Sequence);
        check!(VecDeque::from([1]).as_field_value().kind() == Kind::Sequence);

        let map = HashMap::from([(1, "a"), (2, "b")]);
        let_assert!(FieldValue::Map { len } = map.as_field_value());
        check!(len == 2);

        let json = serde_json::json!({"a": 1});
        check!(json.as_field_value().kind() == Kind::Dynamic);
    }

    #[test]
    fn optional_deref_is_one_level() {
        let absent: Option<u32> = None;
        check!(absent.as_field_value().deref_optional().is_none());

        let present = Some(3_u32);
        let_assert!(Some(FieldValue::Uint(3)) = present.as_field_value().deref_optional());

        let nested = Some(Some(3_u32));
        let_assert!(Some(inner) = nested.as_field_value().deref_optional());
        check!(inner.kind() == Kind::Optional);
    }

    #[test]
    fn box_and_reference_are_transparent() {
        let boxed = Box::new(42_i64);
        let_assert!(FieldValue::Int(42) = boxed.as_field_value());

        let value = 42_i64;
        let reference = &value;
        let_assert!(FieldValue::Int(42) = reference.as_field_value());
    }

    #[test]
    fn empty_values() {
        check!(String::new().as_field_value().is_empty_value());
        check!(0_i32.as_field_value().is_empty_value());
        check!(0_u64.as_field_value().is_empty_value());
        check!(0.0_f64.as_field_value().is_empty_value());
        check!(false.as_field_value().is_empty_value());
        check!(Vec::<u8>::new().as_field_value().is_empty_value());
        check!(None::<u8>.as_field_value().is_empty_value());
        check!(BTreeMap::<u8, u8>::new().as_field_value().is_empty_value());

        check!(!"a".as_field_value().is_empty_value());
        check!(!(-1_i8).as_field_value().is_empty_value());
        check!(!true.as_field_value().is_empty_value());
        check!(!vec![0].as_field_value().is_empty_value());
    }

    #[test]
    fn textual_form() {
        check!(42_u16.as_field_value().to_string() == "42");
        check!((-3_i64).as_field_value().to_string() == "-3");
        check!(1.5_f64.as_field_value().to_string() == "1.5");
        check!(1.0_f64.as_field_value().to_string() == "1");
        check!(false.as_field_value().to_string() == "false");
        check!("a b".as_field_value().to_string() == "a b");
        check!(Some("x").as_field_value().to_string() == "x");
        check!(vec![1, 2].as_field_value().to_string() == "[1 2]");
    }
}
