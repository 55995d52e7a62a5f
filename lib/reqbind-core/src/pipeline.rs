//! Binding pipeline.

use crate::{
    AsFieldValue, Destination, Request, Result, admit_path, admit_query, classify, project_body,
    project_path, project_query,
};

/// Bind a record into a request: path, then query, then body.
///
/// The first failing step aborts the pipeline. Steps that already succeeded
/// stay applied, so the request should be discarded on error.
///
/// # Errors
///
/// - classification errors if `record` is absent or not a struct
/// - admission errors for path or query fields of unsupported kinds
/// - [`crate::Error::BodySerialization`] if the body cannot be serialized
pub fn bind<T>(record: &T, request: &mut Request) -> Result<()>
where
    T: AsFieldValue + serde::Serialize + ?Sized,
{
    let params = classify(record.as_field_value(), Destination::Path, admit_path)?;
    let path = project_path(request.path(), &params);
    request.set_path(path);

    let pairs = classify(record.as_field_value(), Destination::Query, admit_query)?;
    let query = project_query(request.query(), &pairs);
    request.set_query(query);

    if let Some(body) = project_body(record)? {
        request.apply_body(body);
    }

    Ok(())
}
