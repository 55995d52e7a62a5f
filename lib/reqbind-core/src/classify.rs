//! Field classification.
//!
//! Walks a record's descriptor tree and collects, for one destination, the
//! values of every admitted field keyed by their destination key.

use std::collections::BTreeMap;

use crate::{Destination, Error, FieldDescriptor, FieldValue, Record, Result, Tag};

/// Field values keyed by destination key.
pub type Bindings<'a> = BTreeMap<&'static str, FieldValue<'a>>;

/// Admission rule of a destination.
///
/// Returns `Ok(true)` to bind the field, `Ok(false)` to drop it silently and
/// an error to abort the whole classification.
pub type Admit = fn(&FieldValue<'_>, &Tag<'_>) -> Result<bool>;

/// Classify the fields of `data` for a destination.
///
/// `data` must be a record, possibly behind one level of optionality.
/// Embedded records are walked recursively and merged into the result; when
/// two fields share a destination key, the one discovered last wins.
///
/// # Errors
///
/// - [`Error::NilRecord`] if `data` is an absent optional
/// - [`Error::NotAggregate`] if `data` is not a record
/// - [`Error::EmbeddedNotAggregate`] if an embedded field is not a record
/// - any error returned by `admit`
pub fn classify<'a>(
    data: FieldValue<'a>,
    destination: Destination,
    admit: Admit,
) -> Result<Bindings<'a>> {
    let value = data.deref_optional().ok_or(Error::NilRecord)?;
    let Some(record) = value.as_record() else {
        return Err(Error::NotAggregate { kind: value.kind() });
    };

    let mut bindings = Bindings::new();
    walk(record, destination, admit, &mut bindings)?;
    Ok(bindings)
}

fn walk<'a>(
    record: &'a dyn Record,
    destination: Destination,
    admit: Admit,
    bindings: &mut Bindings<'a>,
) -> Result<()> {
    for (field, value) in record.fields().iter().zip(record.field_values()) {
        let Some(value) = value.deref_optional() else {
            continue;
        };

        match field {
            FieldDescriptor::Embedded { name } => {
                let Some(inner) = value.as_record() else {
                    return Err(Error::EmbeddedNotAggregate {
                        field: *name,
                        kind: value.kind(),
                    });
                };
                walk(inner, destination, admit, bindings)?;
            }
            FieldDescriptor::Named { .. } => {
                let Some(tag) = field.tag(destination).and_then(Tag::parse) else {
                    continue;
                };
                if admit(&value, &tag)? {
                    bindings.insert(tag.key(), value);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::AsFieldValue;

    /// Hand-written record over borrowed values.
    struct Fixture<'f> {
        fields: &'static [FieldDescriptor],
        values: &'f [&'f dyn AsFieldValue],
    }

    impl Record for Fixture<'_> {
        fn fields(&self) -> &'static [FieldDescriptor] {
            self.fields
        }

        fn field_values(&self) -> Vec<FieldValue<'_>> {
            self.values.iter().map(|v| v.as_field_value()).collect()
        }
    }

    impl AsFieldValue for Fixture<'_> {
        fn as_field_value(&self) -> FieldValue<'_> {
            FieldValue::Record(self)
        }
    }

    fn leak(fields: &[FieldDescriptor]) -> &'static [FieldDescriptor] {
        Box::leak(fields.to_vec().into_boxed_slice())
    }

    fn admit_all(_: &FieldValue<'_>, _: &Tag<'_>) -> Result<bool> {
        Ok(true)
    }

    fn keys(bindings: &Bindings<'_>) -> Vec<&'static str> {
        bindings.keys().copied().collect()
    }

    #[test]
    fn classify_tagged_fields() {
        let record = Fixture {
            fields: leak(&[
                FieldDescriptor::named("a", Some("param_a"), None),
                FieldDescriptor::named("b", None, Some("query_b")),
                FieldDescriptor::named("c", Some("param_c"), Some("query_c")),
            ]),
            values: &[&"foo", &1_u8, &true],
        };

        let bindings = classify(record.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        check!(keys(&bindings) == ["param_a", "param_c"]);

        let bindings = classify(record.as_field_value(), Destination::Query, admit_all)
            .expect("classify");
        check!(keys(&bindings) == ["query_b", "query_c"]);
    }

    #[test]
    fn skip_untagged_and_skip_marker() {
        let record = Fixture {
            fields: leak(&[
                FieldDescriptor::named("a", None, None),
                FieldDescriptor::named("b", Some("-"), None),
                FieldDescriptor::named("c", Some(""), None),
                FieldDescriptor::named("d", Some(",omitempty"), None),
            ]),
            values: &[&1_i32, &2_i32, &3_i32, &4_i32],
        };

        let bindings = classify(record.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        check!(bindings.is_empty());
    }

    #[test]
    fn skip_absent_optional_fields() {
        let absent: Option<String> = None;
        let present = Some("x".to_string());
        let record = Fixture {
            fields: leak(&[
                FieldDescriptor::named("a", Some("a"), None),
                FieldDescriptor::named("b", Some("b"), None),
            ]),
            values: &[&absent, &present],
        };

        let bindings = classify(record.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        check!(keys(&bindings) == ["b"]);
        let_assert!(Some(FieldValue::Str(b)) = bindings.get("b"));
        check!(*b == "x");
    }

    #[test]
    fn embedded_fields_are_hoisted() {
        let inner = Fixture {
            fields: leak(&[FieldDescriptor::named("p2", Some("param_2"), None)]),
            values: &[&2_i32],
        };
        let record = Fixture {
            fields: leak(&[
                FieldDescriptor::named("p1", Some("param_1"), None),
                FieldDescriptor::embedded("inner"),
            ]),
            values: &[&"foo", &inner],
        };

        let bindings = classify(record.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        check!(keys(&bindings) == ["param_1", "param_2"]);
    }

    #[test]
    fn same_key_last_discovered_wins() {
        let inner = Fixture {
            fields: leak(&[FieldDescriptor::named("id", Some("id"), None)]),
            values: &[&"inner"],
        };
        let record = Fixture {
            fields: leak(&[
                FieldDescriptor::named("id", Some("id"), None),
                FieldDescriptor::embedded("inner"),
            ]),
            values: &[&"outer", &inner],
        };

        let bindings = classify(record.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        let_assert!(Some(FieldValue::Str(id)) = bindings.get("id"));
        check!(*id == "inner");

        let reversed = Fixture {
            fields: leak(&[
                FieldDescriptor::embedded("inner"),
                FieldDescriptor::named("id", Some("id"), None),
            ]),
            values: &[&inner, &"outer"],
        };
        let bindings = classify(reversed.as_field_value(), Destination::Path, admit_all)
            .expect("classify");
        let_assert!(Some(FieldValue::Str(id)) = bindings.get("id"));
        check!(*id == "outer");
    }

    #[test]
    fn absent_embedded_is_skipped() {
        let inner: Option<Fixture<'_>> = None;
        let record = Fixture {
            fields: leak(&[FieldDescriptor::embedded("inner")]),
            values: &[&inner],
        };

        let bindings = classify(record.as_field_value(), Destination::Query, admit_all)
            .expect("classify");
        check!(bindings.is_empty());
    }

    #[test]
    fn embedded_must_be_a_record() {
        let record = Fixture {
            fields: leak(&[FieldDescriptor::embedded("inner")]),
            values: &[&"not a struct"],
        };

        let result = classify(record.as_field_value(), Destination::Path, admit_all);
        let_assert!(Err(Error::EmbeddedNotAggregate { field, kind }) = result);
        check!(field == "inner");
        check!(kind == crate::Kind::String);
    }

    #[test]
    fn data_must_be_a_record() {
        let result = classify("foo".as_field_value(), Destination::Path, admit_all);
        let_assert!(Err(err @ Error::NotAggregate { .. }) = result);
        check!(err.to_string().starts_with("input data must be a structured aggregate"));

        let result = classify(1_i32.as_field_value(), Destination::Query, admit_all);
        let_assert!(Err(Error::NotAggregate { .. }) = result);
    }

    #[test]
    fn data_cannot_be_nil() {
        let data: Option<Fixture<'_>> = None;
        let result = classify(data.as_field_value(), Destination::Path, admit_all);
        let_assert!(Err(Error::NilRecord) = result);

        let data = Some(Fixture {
            fields: leak(&[FieldDescriptor::named("a", Some("a"), None)]),
            values: &[&1_i32],
        });
        let bindings =
            classify(data.as_field_value(), Destination::Path, admit_all).expect("classify");
        check!(keys(&bindings) == ["a"]);
    }

    #[test]
    fn admit_controls_inclusion_and_errors() {
        fn reject_zero(value: &FieldValue<'_>, tag: &Tag<'_>) -> Result<bool> {
            match value {
                FieldValue::Int(0) => Ok(false),
                FieldValue::Int(_) => Ok(true),
                other => Err(Error::UnsupportedQueryField {
                    key: tag.key().to_string(),
                    kind: other.kind(),
                }),
            }
        }

        let fields = leak(&[
            FieldDescriptor::named("a", None, Some("a")),
            FieldDescriptor::named("b", None, Some("b")),
        ]);

        let record = Fixture {
            fields,
            values: &[&0_i32, &5_i32],
        };
        let bindings = classify(record.as_field_value(), Destination::Query, reject_zero)
            .expect("classify");
        check!(keys(&bindings) == ["b"]);

        let record = Fixture {
            fields,
            values: &[&1_i32, &"text"],
        };
        let result = classify(record.as_field_value(), Destination::Query, reject_zero);
        let_assert!(Err(Error::UnsupportedQueryField { key, .. }) = result);
        check!(key == "b");
    }
}
