use crate::CompileError;
use crate::types::{FieldKind, Resolved, Schema};

/// Resolve a dot-separated field path against `schema`.
pub(crate) fn resolve<T: 'static>(
    schema: &Schema<T>,
    path: &str,
) -> Result<Resolved<T>, CompileError> {
    let segments: Vec<&str> = path.split('.').collect();
    resolve_segments(schema, &segments, path)
}

/// Resolve `segments` (a suffix of `path`) against `schema`. Nested records
/// recurse through their own schema.
pub(crate) fn resolve_segments<T: 'static>(
    schema: &Schema<T>,
    segments: &[&str],
    path: &str,
) -> Result<Resolved<T>, CompileError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(not_found("", path));
    };

    match (schema.lookup(first), rest) {
        (None, _) => Err(not_found(first, path)),
        (Some(FieldKind::Scalar(accessor)), []) => Ok(Resolved::Scalar(accessor.clone())),
        // A scalar cannot be traversed further; report the segment after it.
        (Some(FieldKind::Scalar(_)), [next, ..]) => Err(not_found(next, path)),
        (Some(FieldKind::Record(_)), []) => Ok(Resolved::Record),
        (Some(FieldKind::Record(nested)), rest) => nested(rest, path),
    }
}

fn not_found(segment: &str, path: &str) -> CompileError {
    CompileError::FieldNotFound {
        segment: segment.to_owned(),
        path: path.to_owned(),
    }
}
