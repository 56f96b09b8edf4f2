//! # exec-script-derive
//!
//! Procedural macro for binding Rust enums to integer procedure parameters.
//!
//! Scripts render enumeration members as their underlying integer. Deriving
//! `SqlEnum` on a fieldless enum implements `exec_script_types::SqlEnum` and
//! `From<T>` / `From<&T>` for `exec_script_types::SqlValue`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use exec_script_derive::SqlEnum;
//!
//! #[derive(SqlEnum)]
//! enum AccountState {
//!     Active = 1,
//!     #[sql_enum(rename = "on_hold")]
//!     Suspended = 3,
//! }
//!
//! let command = Command::new("dbo.SetState").input("@state", SqlType::Int, AccountState::Suspended);
//! // EXEC @rc = dbo.SetState
//! //     @state = 3
//! ```

#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Variant, parse_macro_input};

/// Derive macro for implementing `SqlEnum`.
///
/// Only fieldless, non-generic enums are supported. Discriminants follow the
/// usual Rust rules, so implicit ones count up from the previous value.
///
/// ## Attributes
///
/// - `#[sql_enum(rename = "name")]` - Report a different member name
#[proc_macro_derive(SqlEnum, attributes(sql_enum))]
pub fn derive_sql_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_sql_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_sql_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "SqlEnum can only be derived for enums",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "SqlEnum cannot be derived for generic enums",
        ));
    }

    let arms = data
        .variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "SqlEnum variants cannot carry fields",
                ));
            }
            let ident = &variant.ident;
            let member = member_name(variant)?;
            Ok(quote! {
                #name::#ident => ::exec_script_types::EnumValue::new(#member, #name::#ident as i64)
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::exec_script_types::SqlEnum for #name {
            fn to_enum_value(&self) -> ::exec_script_types::EnumValue {
                match *self {
                    #(#arms,)*
                }
            }
        }

        impl ::core::convert::From<#name> for ::exec_script_types::SqlValue {
            fn from(value: #name) -> Self {
                ::exec_script_types::SqlValue::Enum(
                    ::exec_script_types::SqlEnum::to_enum_value(&value),
                )
            }
        }

        impl ::core::convert::From<&#name> for ::exec_script_types::SqlValue {
            fn from(value: &#name) -> Self {
                ::exec_script_types::SqlValue::Enum(
                    ::exec_script_types::SqlEnum::to_enum_value(value),
                )
            }
        }
    })
}

/// The member name, honouring `#[sql_enum(rename = "...")]`.
fn member_name(variant: &Variant) -> syn::Result<String> {
    let mut member = variant.ident.to_string();

    for attr in &variant.attrs {
        if !attr.path().is_ident("sql_enum") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                member = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported sql_enum attribute"))
            }
        })?;
    }

    Ok(member)
}
