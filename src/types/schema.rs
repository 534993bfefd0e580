use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::CompileError;

/// The declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A signed integer, read as `i64`.
    Int,
    /// A floating-point number, read as `f64`.
    Float,
    /// A boolean.
    Bool,
    /// A UTF-8 string.
    String,
    /// A nested record. Traversable by a field path, never compared directly.
    Record,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Record => "record",
        })
    }
}

/// A type whose fields can be addressed by rule conditions.
///
/// # Example
///
/// ```
/// use sifter::{Record, Schema};
///
/// struct Bio {
///     age: i32,
/// }
///
/// struct Customer {
///     name: String,
///     bio: Bio,
/// }
///
/// impl Record for Bio {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::builder().int("Age", |b| i64::from(b.age)).build()
///     }
/// }
///
/// impl Record for Customer {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::builder()
///             .string("Name", |c| c.name.as_str())
///             .nested("Bio", |c| &c.bio)
///             .build()
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    fn schema() -> Schema<Self>;
}

pub(crate) type Getter<T, V> = Arc<dyn Fn(&T) -> Option<V> + Send + Sync>;
pub(crate) type StrGetter<T> = Arc<dyn for<'a> Fn(&'a T) -> Option<&'a str> + Send + Sync>;

fn str_getter<T, F>(f: F) -> StrGetter<T>
where
    F: for<'a> Fn(&'a T) -> Option<&'a str> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A typed read of one scalar field, possibly through several nested records.
/// `None` means the value (or a record on the way to it) is absent.
pub(crate) enum Accessor<T> {
    Int(Getter<T, i64>),
    Float(Getter<T, f64>),
    Bool(Getter<T, bool>),
    Str(StrGetter<T>),
}

impl<T: 'static> Accessor<T> {
    pub(crate) fn field_type(&self) -> FieldType {
        match self {
            Accessor::Int(_) => FieldType::Int,
            Accessor::Float(_) => FieldType::Float,
            Accessor::Bool(_) => FieldType::Bool,
            Accessor::Str(_) => FieldType::String,
        }
    }

    /// Prefix this accessor with a step from an outer record `P` into `T`.
    pub(crate) fn through<P, F>(self, outer: F) -> Accessor<P>
    where
        P: 'static,
        F: for<'a> Fn(&'a P) -> Option<&'a T> + Send + Sync + 'static,
    {
        match self {
            Accessor::Int(inner) => {
                Accessor::Int(Arc::new(move |p: &P| outer(p).and_then(|t| inner(t))))
            }
            Accessor::Float(inner) => {
                Accessor::Float(Arc::new(move |p: &P| outer(p).and_then(|t| inner(t))))
            }
            Accessor::Bool(inner) => {
                Accessor::Bool(Arc::new(move |p: &P| outer(p).and_then(|t| inner(t))))
            }
            Accessor::Str(inner) => {
                Accessor::Str(str_getter(move |p: &P| outer(p).and_then(|t| inner(t))))
            }
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Int(g) => Accessor::Int(Arc::clone(g)),
            Accessor::Float(g) => Accessor::Float(Arc::clone(g)),
            Accessor::Bool(g) => Accessor::Bool(Arc::clone(g)),
            Accessor::Str(g) => Accessor::Str(Arc::clone(g)),
        }
    }
}

/// Result of resolving a field path: either a readable scalar or a record
/// that the path stopped on.
pub(crate) enum Resolved<T> {
    Scalar(Accessor<T>),
    Record,
}

impl<T: 'static> Resolved<T> {
    fn through<P, F>(self, outer: F) -> Resolved<P>
    where
        P: 'static,
        F: for<'a> Fn(&'a P) -> Option<&'a T> + Send + Sync + 'static,
    {
        match self {
            Resolved::Scalar(accessor) => Resolved::Scalar(accessor.through(outer)),
            Resolved::Record => Resolved::Record,
        }
    }
}

/// Resolves the remaining segments of a path inside a nested record.
/// Arguments are the remaining segments and the full path (for errors).
pub(crate) type NestedResolver<T> =
    Arc<dyn Fn(&[&str], &str) -> Result<Resolved<T>, CompileError> + Send + Sync>;

pub(crate) enum FieldKind<T> {
    Scalar(Accessor<T>),
    Record(NestedResolver<T>),
}

impl<T> Clone for FieldKind<T> {
    fn clone(&self) -> Self {
        match self {
            FieldKind::Scalar(a) => FieldKind::Scalar(a.clone()),
            FieldKind::Record(r) => FieldKind::Record(Arc::clone(r)),
        }
    }
}

struct FieldDef<T> {
    name: String,
    kind: FieldKind<T>,
}

impl<T> Clone for FieldDef<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// Describes the named fields of a record type `T`.
///
/// Built with [`Schema::builder()`], usually as `Schema::<Self>::builder()`
/// inside [`Record::schema()`].
/// Field lookup is by exact, case-sensitive name.
pub struct Schema<T> {
    fields: Vec<FieldDef<T>>,
    index: HashMap<String, usize>,
}

impl<T: 'static> Schema<T> {
    /// Start an empty schema for `T`.
    ///
    /// Name the record type on the call (`Schema::<Self>::builder()`): the
    /// getter closures passed to the builder are typed from it.
    #[must_use]
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Schema {
                fields: Vec::new(),
                index: HashMap::new(),
            },
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The declared type of a direct field, or `None` if there is no such field.
    #[must_use]
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.lookup(name).map(|kind| match kind {
            FieldKind::Scalar(accessor) => accessor.field_type(),
            FieldKind::Record(_) => FieldType::Record,
        })
    }

    /// The number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&FieldKind<T>> {
        self.index.get(name).map(|&idx| &self.fields[idx].kind)
    }

    fn declare(&mut self, name: &str, kind: FieldKind<T>) {
        if let Some(&idx) = self.index.get(name) {
            self.fields[idx].kind = kind;
            return;
        }
        self.index.insert(name.to_owned(), self.fields.len());
        self.fields.push(FieldDef {
            name: name.to_owned(),
            kind,
        });
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("record", &std::any::type_name::<T>())
            .field(
                "fields",
                &self.fields.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for a [`Schema`]. Declaring the same name twice replaces the
/// earlier declaration.
#[must_use]
pub struct SchemaBuilder<T> {
    schema: Schema<T>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub fn int(mut self, name: &str, get: fn(&T) -> i64) -> Self {
        let accessor = Accessor::Int(Arc::new(move |t: &T| Some(get(t))));
        self.schema.declare(name, FieldKind::Scalar(accessor));
        self
    }

    pub fn optional_int(mut self, name: &str, get: fn(&T) -> Option<i64>) -> Self {
        self.schema
            .declare(name, FieldKind::Scalar(Accessor::Int(Arc::new(get))));
        self
    }

    pub fn float(mut self, name: &str, get: fn(&T) -> f64) -> Self {
        let accessor = Accessor::Float(Arc::new(move |t: &T| Some(get(t))));
        self.schema.declare(name, FieldKind::Scalar(accessor));
        self
    }

    pub fn optional_float(mut self, name: &str, get: fn(&T) -> Option<f64>) -> Self {
        self.schema
            .declare(name, FieldKind::Scalar(Accessor::Float(Arc::new(get))));
        self
    }

    pub fn bool(mut self, name: &str, get: fn(&T) -> bool) -> Self {
        let accessor = Accessor::Bool(Arc::new(move |t: &T| Some(get(t))));
        self.schema.declare(name, FieldKind::Scalar(accessor));
        self
    }

    pub fn optional_bool(mut self, name: &str, get: fn(&T) -> Option<bool>) -> Self {
        self.schema
            .declare(name, FieldKind::Scalar(Accessor::Bool(Arc::new(get))));
        self
    }

    pub fn string(mut self, name: &str, get: fn(&T) -> &str) -> Self {
        let accessor = Accessor::Str(str_getter(move |t: &T| Some(get(t))));
        self.schema.declare(name, FieldKind::Scalar(accessor));
        self
    }

    pub fn optional_string(mut self, name: &str, get: fn(&T) -> Option<&str>) -> Self {
        self.schema
            .declare(name, FieldKind::Scalar(Accessor::Str(str_getter(get))));
        self
    }

    /// Declare a nested record that is always present.
    pub fn nested<U: Record>(mut self, name: &str, get: fn(&T) -> &U) -> Self {
        let resolver: NestedResolver<T> = Arc::new(move |rest: &[&str], path: &str| {
            let inner = crate::resolve::resolve_segments(&U::schema(), rest, path)?;
            Ok(inner.through(move |t: &T| Some(get(t))))
        });
        self.schema.declare(name, FieldKind::Record(resolver));
        self
    }

    /// Declare a nested record that may be absent. Conditions reading through
    /// an absent record evaluate to `false`.
    pub fn optional_nested<U: Record>(mut self, name: &str, get: fn(&T) -> Option<&U>) -> Self {
        let resolver: NestedResolver<T> = Arc::new(move |rest: &[&str], path: &str| {
            let inner = crate::resolve::resolve_segments(&U::schema(), rest, path)?;
            Ok(inner.through(get))
        });
        self.schema.declare(name, FieldKind::Record(resolver));
        self
    }

    #[must_use]
    pub fn build(self) -> Schema<T> {
        self.schema
    }
}
