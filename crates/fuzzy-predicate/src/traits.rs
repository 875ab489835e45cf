//! The [`Haystack`] trait and its implementations for common types.
//!
//! Anything the matcher searches implements [`Haystack`] by describing
//! itself as a [`Candidate`]. `serde_json::Value` is the natural
//! heterogeneous haystack; strings, numbers, options, sequences and
//! string-keyed maps work out of the box.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::{Candidate, Key, Number};

/// A value that can be searched by a fuzzy predicate.
///
/// # Manual Implementation
///
/// Records expose their searchable fields as a composite, so key
/// restrictions apply to them like to any map:
///
/// ```
/// use fuzzy_predicate::{fuzzy, Arg, Candidate, Haystack, Key};
///
/// struct Contact {
///     id: String,
///     name: String,
/// }
///
/// impl Haystack for Contact {
///     fn candidate(&self) -> Candidate<'_> {
///         Candidate::composite([
///             (Key::Name("id"), &self.id as &dyn Haystack),
///             (Key::Name("name"), &self.name as &dyn Haystack),
///         ])
///     }
/// }
///
/// let contact = Contact { id: "abc123".into(), name: "Foo Bar".into() };
/// assert!(fuzzy("foo", "name", None).unwrap().matches(&contact));
/// assert!(!fuzzy("foo", "id", None).unwrap().matches(&contact));
/// ```
pub trait Haystack {
    /// Returns the runtime view of this value.
    fn candidate(&self) -> Candidate<'_>;
}

impl Haystack for serde_json::Value {
    fn candidate(&self) -> Candidate<'_> {
        match self {
            serde_json::Value::Number(n) => Candidate::Number(n.into()),
            serde_json::Value::String(s) => Candidate::Text(s),
            serde_json::Value::Array(items) => Candidate::indexed(items),
            serde_json::Value::Object(map) => map.candidate(),
            serde_json::Value::Null | serde_json::Value::Bool(_) => Candidate::Unsupported,
        }
    }
}

impl Haystack for serde_json::Map<String, serde_json::Value> {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::composite(
            self.iter()
                .map(|(k, v)| (Key::Name(k.as_str()), v as &dyn Haystack)),
        )
    }
}

impl Haystack for str {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Text(self)
    }
}

impl Haystack for String {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Text(self)
    }
}

macro_rules! numeric_haystack {
    ($($t:ty),*) => {
        $(
            impl Haystack for $t {
                fn candidate(&self) -> Candidate<'_> {
                    Candidate::Number(Number::from(*self))
                }
            }
        )*
    };
}

numeric_haystack!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Haystack for Number {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Number(*self)
    }
}

impl Haystack for bool {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Unsupported
    }
}

impl Haystack for () {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::Unsupported
    }
}

impl<T: Haystack> Haystack for Option<T> {
    fn candidate(&self) -> Candidate<'_> {
        match self {
            Some(value) => value.candidate(),
            None => Candidate::Unsupported,
        }
    }
}

impl<T: Haystack + ?Sized> Haystack for &T {
    fn candidate(&self) -> Candidate<'_> {
        (**self).candidate()
    }
}

impl<T: Haystack + ?Sized> Haystack for Box<T> {
    fn candidate(&self) -> Candidate<'_> {
        (**self).candidate()
    }
}

impl<T: Haystack + ?Sized> Haystack for Rc<T> {
    fn candidate(&self) -> Candidate<'_> {
        (**self).candidate()
    }
}

impl<T: Haystack + ?Sized> Haystack for Arc<T> {
    fn candidate(&self) -> Candidate<'_> {
        (**self).candidate()
    }
}

impl<T: Haystack> Haystack for [T] {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::indexed(self)
    }
}

impl<T: Haystack, const N: usize> Haystack for [T; N] {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::indexed(self)
    }
}

impl<T: Haystack> Haystack for Vec<T> {
    fn candidate(&self) -> Candidate<'_> {
        Candidate::indexed(self)
    }
}

impl<K, V, S> Haystack for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Haystack,
    S: BuildHasher,
{
    fn candidate(&self) -> Candidate<'_> {
        Candidate::composite(
            self.iter()
                .map(|(k, v)| (Key::Name(k.as_ref()), v as &dyn Haystack)),
        )
    }
}

impl<K, V> Haystack for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Haystack,
{
    fn candidate(&self) -> Candidate<'_> {
        Candidate::composite(
            self.iter()
                .map(|(k, v)| (Key::Name(k.as_ref()), v as &dyn Haystack)),
        )
    }
}
