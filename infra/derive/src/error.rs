use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, Type, Variant,
};

/// Shape of one enum variant as far as the generated glue is concerned.
struct VariantShape<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    has_message: bool,
    /// Fields other than `source`/`context`; a `From` impl is only possible when zero.
    extra_fields: usize,
    cfg: Vec<Attribute>,
}

impl VariantShape<'_> {
    fn source_parts(&self) -> Option<(&Ident, &Type)> {
        let field = self.source?;
        Some((field.ident.as_ref()?, &field.ty))
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "forge_error can only be applied to enums")
            .to_compile_error();
    };

    let mut shapes = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match inspect_variant(variant) {
            Ok(shape) => shapes.push(shape),
            Err(err) => return err.to_compile_error(),
        }
    }

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(&input);
    let context_trait = context_trait(name, &ext, &shapes);
    let source_impls = shapes.iter().filter_map(|shape| source_impl(name, &ext, shape));
    let internal_impls = internal_impls(name, &shapes);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn inspect_variant(variant: &Variant) -> syn::Result<VariantShape<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "forge_error requires named fields so source/context can be wired",
        ));
    };

    let context = context_field(fields)?;
    let source = fields.named.iter().find(|field| is_source_field(field));

    if source.is_some() && context.is_none() {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "forge_error requires `context: Option<Cow<'static, str>>` on variants with a source",
        ));
    }

    let extra_fields = fields
        .named
        .iter()
        .filter(|field| !is_source_field(field) && !field_named(field, "context"))
        .count();

    Ok(VariantShape {
        ident: &variant.ident,
        source,
        has_context: context.is_some(),
        has_message: fields.named.iter().any(|field| field_named(field, "message")),
        extra_fields,
        cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect(),
    })
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) = fields.named.iter().find(|field| field_named(field, "context")) else {
        return Ok(None);
    };
    if is_optional_static_cow(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn context_trait(name: &Ident, ext: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let arms = shapes.iter().filter(|shape| shape.has_context).map(|shape| {
        let cfg = &shape.cfg;
        let ident = shape.ident;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_impl(name: &Ident, ext: &Ident, shape: &VariantShape<'_>) -> Option<TokenStream> {
    if shape.ident == "Internal" || shape.extra_fields > 0 {
        return None;
    }
    let (field, ty) = shape.source_parts()?;
    let ident = shape.ident;
    let cfg = &shape.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfg)*
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let Some(internal) = shapes.iter().find(|shape| shape.ident == "Internal") else {
        return TokenStream::new();
    };
    if !internal.has_message || !internal.has_context {
        return TokenStream::new();
    }
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

/// Derives the enum still needs (`Debug`, `thiserror::Error`), skipping any already declared.
fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut declared = FxHashSet::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                declared.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let mut wanted = Vec::new();
    if !declared.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !declared.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }

    if wanted.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#wanted),*)] } }
}

fn field_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == name)
}

fn is_source_field(field: &Field) -> bool {
    field_named(field, "source")
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

/// Matches `Option<Cow<'static, str>>` (paths may be qualified).
fn is_optional_static_cow(ty: &Type) -> bool {
    let Some(option_args) = last_segment_args(ty, "Option") else {
        return false;
    };
    let Some(GenericArgument::Type(inner)) = option_args.first() else {
        return false;
    };
    let Some(cow_args) = last_segment_args(inner, "Cow") else {
        return false;
    };

    let mut args = cow_args.iter();
    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(path)))
            if path.path.segments.last().is_some_and(|seg| seg.ident == "str")
    );

    static_lifetime && str_type
}

fn last_segment_args<'a>(
    ty: &'a Type,
    ident: &str,
) -> Option<&'a syn::punctuated::Punctuated<GenericArgument, syn::token::Comma>> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != ident {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => Some(&args.args),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expanded(input: DeriveInput) -> String {
        expand(input).to_string()
    }

    #[test]
    fn rejects_structs() {
        let out = expanded(parse_quote! { pub struct NotAnEnum { message: String } });
        assert!(out.contains("compile_error"));
    }

    #[test]
    fn rejects_tuple_variants() {
        let out = expanded(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {0}")]
                Io(std::io::Error),
            }
        });
        assert!(out.contains("named fields"));
    }

    #[test]
    fn rejects_source_without_context() {
        let out = expanded(parse_quote! {
            pub enum DemoError {
                #[error("IO error: {source}")]
                Io { #[source] source: std::io::Error },
            }
        });
        assert!(out.contains("requires `context"));
    }

    #[test]
    fn rejects_context_of_wrong_type() {
        let out = expanded(parse_quote! {
            pub enum DemoError {
                #[error("Bad")]
                Bad { context: Option<String> },
            }
        });
        assert!(out.contains("context field must be"));
    }

    #[test]
    fn skips_from_impl_for_variants_with_extra_fields() {
        let out = expanded(parse_quote! {
            pub enum DemoError {
                #[error("Bad parameter {name}")]
                Parameter {
                    name: String,
                    source: std::num::ParseIntError,
                    context: Option<std::borrow::Cow<'static, str>>,
                },
            }
        });
        assert!(!out.contains("impl From"));
        assert!(out.contains("DemoErrorExt"));
    }

    #[test]
    fn keeps_existing_derives() {
        let out = expanded(parse_quote! {
            #[derive(Debug)]
            pub enum DemoError {
                #[error("Internal{}: {message}", format_context(.context))]
                Internal {
                    message: std::borrow::Cow<'static, str>,
                    context: Option<std::borrow::Cow<'static, str>>,
                },
            }
        });
        assert_eq!(out.matches("Debug").count(), 1);
        assert_eq!(out.matches("impl From").count(), 2);
    }

    #[test]
    fn recognises_qualified_cow_paths() {
        let ty: Type = parse_quote!(Option<std::borrow::Cow<'static, str>>);
        assert!(is_optional_static_cow(&ty));

        let ty: Type = parse_quote!(Option<Cow<'a, str>>);
        assert!(!is_optional_static_cow(&ty));
    }
}
