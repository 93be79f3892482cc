//! Procedural macros for `strata_config`.
//!
//! The [`SectionName`] derive declares the configuration-section name a type
//! answers to at compile time. By default the name is the type's identifier,
//! matching the convention that a settings type called `ElasticsearchSettings`
//! reads the `ElasticsearchSettings` section. The `#[section(name = "…")]`
//! attribute overrides the default for types whose section key does not match
//! their Rust name (for example `appSettings`).

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr, parse_macro_input};

/// Derive macro for `strata_config::SectionName`.
///
/// ```rust,ignore
/// #[derive(serde::Deserialize, SectionName)]
/// #[section(name = "elasticsearch")]
/// struct ElasticsearchSettings {
///     base_url: String,
/// }
/// ```
#[proc_macro_derive(SectionName, attributes(section))]
pub fn derive_section_name(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident;

    let mut name = ident.to_string();
    for attr in &input.attrs {
        if !attr.path().is_ident("section") {
            continue;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported `section` attribute; expected `name = \"…\"`"))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    if name.is_empty() {
        return syn::Error::new_spanned(&ident, "section name must not be empty")
            .to_compile_error()
            .into();
    }

    let expanded = quote! {
        impl strata_config::SectionName for #ident {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(expanded)
}
