use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitInt, LitStr};

pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

/// What `#[entity(...)]` says about one field.
#[derive(Default)]
struct FieldAttrs {
    id: bool,
    audit: bool,
    not_blank: bool,
    min_len: Option<LitInt>,
    max_len: Option<LitInt>,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let collection = extract_collection(input)?;
    let fields = named_fields(input)?;

    let mut id_field = None;
    let mut audit_field = None;
    let mut checks = Vec::new();

    for &field in &fields {
        let attrs = parse_field_attrs(field)?;
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if attrs.id {
            if id_field.is_some() {
                return Err(syn::Error::new_spanned(field, "duplicate #[entity(id)]"));
            }
            id_field = Some(ident.clone());
        }
        if attrs.audit {
            audit_field = Some(ident.clone());
        }
        checks.extend(field_checks(ident, &attrs));
    }

    // Default: look for a field named "id"
    let id_field = match id_field {
        Some(ident) => ident,
        None => fields
            .iter()
            .filter_map(|field| field.ident.clone())
            .find(|ident| ident == "id")
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    name,
                    "Entity derive: no field marked with #[entity(id)] and no field named `id`",
                )
            })?,
    };

    let validate = if checks.is_empty() {
        quote! {}
    } else {
        quote! {
            fn validate(&self) -> Result<(), outcome_rust::Violations> {
                let mut violations = outcome_rust::Violations::new();
                #(#checks)*
                violations.into_result()
            }
        }
    };

    let record_change = match audit_field {
        Some(audit) => quote! {
            fn record_change(&mut self, change: outcome_rust::Change) {
                self.#audit.record(change);
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        impl outcome_rust::Entity for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }

            fn set_id(&mut self, id: String) {
                self.#id_field = id;
            }

            #validate

            #record_change
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<&Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().collect());
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Entity derive: only structs with named fields are supported",
    ))
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection = \"...\"`"))
            }
        })?;

        if let Some(c) = collection {
            return Ok(c);
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    Ok(format!("{}s", to_snake_case(&name)))
}

fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                attrs.id = true;
            } else if meta.path.is_ident("audit") {
                attrs.audit = true;
            } else if meta.path.is_ident("not_blank") {
                attrs.not_blank = true;
            } else if meta.path.is_ident("min_len") {
                attrs.min_len = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("max_len") {
                attrs.max_len = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error(
                    "expected one of `id`, `audit`, `not_blank`, `min_len = N`, `max_len = N`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn field_checks(ident: &Ident, attrs: &FieldAttrs) -> Vec<TokenStream2> {
    let field_name = ident.to_string();
    let mut checks = Vec::new();

    if attrs.not_blank {
        checks.push(quote! {
            outcome_rust::entity::validation::check_not_blank(
                &mut violations, #field_name, &self.#ident,
            );
        });
    }
    if let Some(min) = &attrs.min_len {
        checks.push(quote! {
            outcome_rust::entity::validation::check_min_len(
                &mut violations, #field_name, &self.#ident, #min,
            );
        });
    }
    if let Some(max) = &attrs.max_len {
        checks.push(quote! {
            outcome_rust::entity::validation::check_max_len(
                &mut violations, #field_name, &self.#ident, #max,
            );
        });
    }
    checks
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
