//! Bind derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type, parse2};

use crate::attrs::{BindFieldOptions, BodyTag, parse_bind_field_options};

/// A named field with its parsed options.
struct BindField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    options: BindFieldOptions,
}

/// Expand the `#[derive(Bind)]` macro.
pub fn expand_bind_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let fields = named_fields(&input)?;

    let record = generate_record_impl(&input, &fields);
    let body = generate_body_impls(&input, &fields);

    Ok(quote! {
        #record
        #body
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<BindField<'_>>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Bind derive only supports structs with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Bind derive only supports structs",
            ));
        }
    };

    let mut result = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_bind_field_options(&field.attrs)?;
        if options.flatten && (options.param.is_some() || options.query.is_some()) {
            return Err(syn::Error::new_spanned(
                field,
                "flatten fields are hoisted and cannot carry `param` or `query` tags",
            ));
        }
        result.push(BindField {
            ident,
            ty: &field.ty,
            options,
        });
    }

    Ok(result)
}

/// Generate `Record` and `AsFieldValue` for the path and query classifier.
fn generate_record_impl(input: &DeriveInput, fields: &[BindField<'_>]) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let described: Vec<_> = fields
        .iter()
        .filter(|field| field.options.is_described())
        .collect();

    let descriptors = described.iter().map(|field| {
        let field_name = field.ident.to_string();
        if field.options.flatten {
            quote! { ::reqbind::FieldDescriptor::embedded(#field_name) }
        } else {
            let param = optional_str(field.options.param.as_deref());
            let query = optional_str(field.options.query.as_deref());
            quote! { ::reqbind::FieldDescriptor::named(#field_name, #param, #query) }
        }
    });

    let values = described.iter().map(|field| {
        let ident = field.ident;
        quote! { ::reqbind::AsFieldValue::as_field_value(&self.#ident) }
    });

    quote! {
        impl #impl_generics ::reqbind::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::reqbind::FieldDescriptor] {
                const FIELDS: &[::reqbind::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_values(&self) -> ::std::vec::Vec<::reqbind::FieldValue<'_>> {
                ::std::vec![#(#values),*]
            }
        }

        impl #impl_generics ::reqbind::AsFieldValue for #name #ty_generics #where_clause {
            fn as_field_value(&self) -> ::reqbind::FieldValue<'_> {
                ::reqbind::FieldValue::Record(self)
            }
        }
    }
}

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::std::option::Option::Some(#value) },
        None => quote! { ::std::option::Option::None },
    }
}

/// Generate `BodyFields` and the `Serialize` implementation built on it.
fn generate_body_impls(input: &DeriveInput, fields: &[BindField<'_>]) -> TokenStream {
    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let entries: Vec<_> = fields.iter().filter_map(generate_body_entry).collect();
    let unused_body = entries.is_empty().then(|| quote! { let _ = body; });
    let counts = entries.iter().map(|entry| &entry.count);
    let writes = entries.iter().map(|entry| &entry.write);

    quote! {
        impl #impl_generics ::reqbind::BodyFields for #name #ty_generics #where_clause {
            fn body_field_count(&self) -> usize {
                0 #(+ #counts)*
            }

            fn serialize_body_fields<__S>(
                &self,
                body: &mut __S,
            ) -> ::std::result::Result<(), __S::Error>
            where
                __S: ::reqbind::serde::ser::SerializeStruct,
            {
                #unused_body
                #(#writes)*
                ::std::result::Result::Ok(())
            }
        }

        impl #impl_generics ::reqbind::serde::Serialize for #name #ty_generics #where_clause {
            fn serialize<__S>(
                &self,
                serializer: __S,
            ) -> ::std::result::Result<__S::Ok, __S::Error>
            where
                __S: ::reqbind::serde::Serializer,
            {
                let mut body = ::reqbind::serde::Serializer::serialize_struct(
                    serializer,
                    #name_str,
                    ::reqbind::BodyFields::body_field_count(self),
                )?;
                ::reqbind::BodyFields::serialize_body_fields(self, &mut body)?;
                ::reqbind::serde::ser::SerializeStruct::end(body)
            }
        }
    }
}

/// Body contribution of one field: how many entries it writes, and how.
struct BodyEntry {
    count: TokenStream,
    write: TokenStream,
}

/// Generate the serialization of one field, `None` when it has no body part.
fn generate_body_entry(field: &BindField<'_>) -> Option<BodyEntry> {
    let ident = field.ident;

    let (key, omit_empty) = match (&field.options.body, field.options.flatten) {
        (Some(BodyTag::Skip), _) | (None, false) => return None,
        (None, true) => {
            return Some(BodyEntry {
                count: quote! { ::reqbind::BodyFields::body_field_count(&self.#ident) },
                write: quote! {
                    ::reqbind::BodyFields::serialize_body_fields(&self.#ident, body)?;
                },
            });
        }
        (Some(BodyTag::Key { name, omit_empty }), _) => (name, *omit_empty),
    };

    let is_option = is_option_type(field.ty);
    let mut conditions = Vec::new();
    if is_option {
        conditions.push(quote! { ::std::option::Option::is_some(&self.#ident) });
    }
    if omit_empty {
        conditions.push(quote! {
            !::reqbind::AsFieldValue::as_field_value(&self.#ident).is_empty_value()
        });
    }

    let write = if is_option {
        quote! {
            if let ::std::option::Option::Some(value) = &self.#ident {
                ::reqbind::serde::ser::SerializeStruct::serialize_field(body, #key, value)?;
            }
        }
    } else {
        quote! {
            ::reqbind::serde::ser::SerializeStruct::serialize_field(body, #key, &self.#ident)?;
        }
    };

    if conditions.is_empty() {
        return Some(BodyEntry {
            count: quote! { 1 },
            write,
        });
    }

    let (first, rest) = conditions.split_at(1);
    Some(BodyEntry {
        count: quote! { usize::from(#(#first)* #(&& #rest)*) },
        write: if omit_empty {
            quote! {
                if !::reqbind::AsFieldValue::as_field_value(&self.#ident).is_empty_value() {
                    #write
                }
            }
        } else {
            write
        },
    })
}

/// Check if a type is `Option<T>`.
fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}
