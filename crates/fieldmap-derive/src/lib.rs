// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

/// Leaf type accepted by the derive: one `FieldKind` variant.
#[derive(Clone)]
struct Leaf {
    kind_tokens: proc_macro2::TokenStream,
}

/// `#[derive(FieldMap)]`: generates the static `TypeDescriptor` plus the
/// by-name `get_field`/`set_field` accessor table for a struct.
///
/// The expansion happens inside the defining crate, so the generated
/// accessors reach private fields: every field behaves as if it were
/// public, without any runtime visibility override.
///
/// Supported field types:
/// - Primitives: `bool`, `i8`..`i64`, `u8`..`u64`, `f32`, `f64`, `char`
/// - `String`: variable-length UTF-8 string
/// - `Vec<u8>`: opaque byte payload
/// - `Option<T>` of any of the above (`None` maps to the codec's null)
///
/// Attributes:
/// - `#[fieldmap(skip)]`: exclude a field from the descriptor; it stays
///   at its `Default` value on `from_map` and never appears in `to_map`.
///
/// # Example
///
/// ```ignore
/// use fieldmap::FieldMap;
///
/// #[derive(FieldMap, Default)]
/// struct SensorReading {
///     sensor_id: u32,
///     temperature: f64,
///     location: Option<String>,
///     #[fieldmap(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(FieldMap, attributes(fieldmap))]
pub fn derive_field_map(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FieldMap only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldMap only supports structs",
            ))
        }
    };

    let mut descriptor_tokens = Vec::new();
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name_str = field_name.to_string();

        if is_skipped(field)? {
            continue;
        }

        let (leaf, optional) = classify(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(
                &field.ty,
                "unsupported field type (expected a primitive, char, String, \
                 Vec<u8>, or Option of one of these; use #[fieldmap(skip)] to \
                 exclude the field)",
            )
        })?;
        let kind_tokens = &leaf.kind_tokens;

        descriptor_tokens.push(quote! {
            ::fieldmap::FieldDescriptor {
                name: #field_name_str,
                kind: #kind_tokens,
                optional: #optional,
            }
        });

        if optional {
            get_arms.push(quote! {
                #field_name_str => Ok(match &self.#field_name {
                    Some(v) => ::fieldmap::Value::from(v.clone()),
                    None => ::fieldmap::Value::Null,
                }),
            });
            set_arms.push(quote! {
                #field_name_str => {
                    self.#field_name = match value {
                        ::fieldmap::Value::Null => None,
                        other => Some(::fieldmap::FromValue::from_value(other)?),
                    };
                    Ok(())
                }
            });
        } else {
            get_arms.push(quote! {
                #field_name_str => Ok(::fieldmap::Value::from(self.#field_name.clone())),
            });
            set_arms.push(quote! {
                #field_name_str => {
                    self.#field_name = ::fieldmap::FromValue::from_value(value)?;
                    Ok(())
                }
            });
        }
    }

    let expanded = quote! {
        impl ::fieldmap::api::FieldMap for #name {
            fn type_descriptor(&self) -> &'static ::fieldmap::TypeDescriptor {
                static DESCRIPTOR: ::fieldmap::TypeDescriptor = ::fieldmap::TypeDescriptor {
                    type_name: concat!(module_path!(), "::", stringify!(#name)),
                    fields: &[#(#descriptor_tokens),*],
                };
                &DESCRIPTOR
            }

            fn get_field(
                &self,
                name: &str,
            ) -> ::core::result::Result<::fieldmap::Value, ::fieldmap::AccessError> {
                match name {
                    #(#get_arms)*
                    _ => Err(::fieldmap::AccessError::FieldNotFound(name.to_string())),
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: ::fieldmap::Value,
            ) -> ::core::result::Result<(), ::fieldmap::AccessError> {
                match name {
                    #(#set_arms)*
                    _ => Err(::fieldmap::AccessError::FieldNotFound(name.to_string())),
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Check for `#[fieldmap(skip)]` on a field.
fn is_skipped(field: &syn::Field) -> Result<bool, syn::Error> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("fieldmap") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown fieldmap attribute (expected `skip`)"))
            }
        })?;
    }
    Ok(skip)
}

/// Classify a field type: returns the leaf kind and whether it was wrapped
/// in `Option`. `None` for unsupported types.
fn classify(ty: &Type) -> Option<(Leaf, bool)> {
    if let Some(inner) = option_inner(ty) {
        return leaf_kind(inner).map(|leaf| (leaf, true));
    }
    leaf_kind(ty).map(|leaf| (leaf, false))
}

/// Unwrap `Option<T>` to `T`, if the type is an `Option`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}

/// Map a leaf Rust type to its `FieldKind` variant.
fn leaf_kind(ty: &Type) -> Option<Leaf> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;

    let kind_tokens = match segment.ident.to_string().as_str() {
        "bool" => quote! { ::fieldmap::FieldKind::Bool },
        "i8" => quote! { ::fieldmap::FieldKind::I8 },
        "i16" => quote! { ::fieldmap::FieldKind::I16 },
        "i32" => quote! { ::fieldmap::FieldKind::I32 },
        "i64" => quote! { ::fieldmap::FieldKind::I64 },
        "u8" => quote! { ::fieldmap::FieldKind::U8 },
        "u16" => quote! { ::fieldmap::FieldKind::U16 },
        "u32" => quote! { ::fieldmap::FieldKind::U32 },
        "u64" => quote! { ::fieldmap::FieldKind::U64 },
        "f32" => quote! { ::fieldmap::FieldKind::F32 },
        "f64" => quote! { ::fieldmap::FieldKind::F64 },
        "char" => quote! { ::fieldmap::FieldKind::Char },
        "String" => quote! { ::fieldmap::FieldKind::String },
        "Vec" => {
            // Only Vec<u8> is a leaf; Vec<T> for other T is unsupported.
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(Type::Path(inner_path))) = args.args.first() {
                    if let Some(inner_segment) = inner_path.path.segments.last() {
                        if inner_segment.ident == "u8" {
                            return Some(Leaf {
                                kind_tokens: quote! { ::fieldmap::FieldKind::Bytes },
                            });
                        }
                    }
                }
            }
            return None;
        }
        _ => return None,
    };

    Some(Leaf { kind_tokens })
}
