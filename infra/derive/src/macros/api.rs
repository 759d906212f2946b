use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, ItemFn, ItemStruct};

/// Expands `#[api_model]`.
///
/// Missing derives are added; serde attributes already present on the struct win.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "api_model takes no arguments").to_compile_error();
    }

    let derives = derive_names(&input.attrs);
    let serde = match SerdePolicy::read(&input.attrs) {
        Ok(policy) => policy,
        Err(err) => return err.to_compile_error(),
    };

    let missing: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
        ("ToSchema", quote! { ::utoipa::ToSchema }),
    ]
    .into_iter()
    .filter(|(name, _)| !derives.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();

    let derive_attr = if missing.is_empty() { quote!() } else { quote! { #[derive(#(#missing),*)] } };
    let rename_attr =
        if serde.rename_all { quote!() } else { quote! { #[serde(rename_all = "camelCase")] } };
    let deny_attr = if serde.deny_unknown_fields {
        quote!()
    } else {
        quote! { #[serde(deny_unknown_fields)] }
    };

    quote! {
        #derive_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands `#[api_handler]`.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[::utoipa::path(#args)]
        #vis #sig #block
    }
}

#[derive(Default)]
struct SerdePolicy {
    rename_all: bool,
    deny_unknown_fields: bool,
}

impl SerdePolicy {
    fn read(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut policy = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    let _: syn::LitStr = meta.value()?.parse()?;
                    policy.rename_all = true;
                } else if meta.path.is_ident("deny_unknown_fields") {
                    policy.deny_unknown_fields = true;
                } else if meta.input.peek(syn::Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }
        Ok(policy)
    }
}

pub(crate) fn derive_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                names.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }
    names
}
