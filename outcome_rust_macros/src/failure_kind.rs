use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_failure_kind(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

struct KindVariant {
    ident: Ident,
    generic: bool,
    title: String,
    template: String,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "FailureKind derive: only fieldless enums are supported",
        ));
    };

    let mut variants = Vec::new();
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "FailureKind derive: variants cannot carry data",
            ));
        }
        variants.push(parse_variant(&variant.ident, &variant.attrs)?);
    }

    let mut generics = variants.iter().filter(|v| v.generic);
    let generic = match (generics.next(), generics.next()) {
        (Some(only), None) => &only.ident,
        (None, _) => {
            return Err(syn::Error::new_spanned(
                name,
                "FailureKind derive: mark one variant with #[failure(generic)]",
            ))
        }
        (Some(_), Some(second)) => {
            return Err(syn::Error::new_spanned(
                &second.ident,
                "FailureKind derive: only one variant can be generic",
            ))
        }
    };

    let name_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let label = ident.to_string();
        quote! { #name::#ident => #label, }
    });
    let title_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let title = &v.title;
        quote! { #name::#ident => #title, }
    });
    let template_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let template = &v.template;
        quote! { #name::#ident => #template, }
    });

    Ok(quote! {
        impl outcome_rust::FailureKind for #name {
            fn generic() -> Self {
                #name::#generic
            }

            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            fn title(&self) -> &'static str {
                match self {
                    #(#title_arms)*
                }
            }

            fn template(&self) -> &'static str {
                match self {
                    #(#template_arms)*
                }
            }
        }
    })
}

fn parse_variant(ident: &Ident, attrs: &[syn::Attribute]) -> syn::Result<KindVariant> {
    let mut variant = KindVariant {
        ident: ident.clone(),
        generic: false,
        title: ident.to_string(),
        template: String::new(),
    };

    for attr in attrs {
        if !attr.path().is_ident("failure") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("generic") {
                variant.generic = true;
            } else if meta.path.is_ident("title") {
                let value: LitStr = meta.value()?.parse()?;
                variant.title = value.value();
            } else if meta.path.is_ident("template") {
                let value: LitStr = meta.value()?.parse()?;
                variant.template = value.value();
            } else {
                return Err(meta.error("expected `generic`, `title = \"...\"` or `template = \"...\"`"));
            }
            Ok(())
        })?;
    }

    Ok(variant)
}
