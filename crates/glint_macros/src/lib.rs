//! Glint procedural macros
//!
//! Provides derive macros for the Glint UI framework.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Check if a field has the #[shallow(by_value)] attribute
fn has_by_value_attr(field: &syn::Field) -> syn::Result<bool> {
    let mut by_value = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("shallow")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("by_value") {
                by_value = true;
                Ok(())
            } else {
                Err(meta.error("unsupported shallow attribute, expected `by_value`"))
            }
        })?;
    }
    Ok(by_value)
}

/// Derive macro that generates a partial-update patch type and a per-field
/// `glint_core::Coalesce` implementation for a state struct.
///
/// For `struct Name { a: A, b: B }` the macro generates `NamePatch` with the
/// same field names wrapped in `Option`, plus `Coalesce for Name` that
/// compares every present patch field with the current value.
///
/// # Field Attributes
///
/// - No attribute - compared with `glint_core::ShallowEq` (scalars by value,
///   `Arc`/`Rc` by identity)
/// - `#[shallow(by_value)]` - compared with `PartialEq`, for field types
///   without a `ShallowEq` impl
///
/// # Example
///
/// ```ignore
/// use glint_core::{CoalescedState, ShallowState};
///
/// #[derive(Clone, Debug, Default, ShallowState)]
/// pub struct PressableState {
///     pub hovered: bool,   // -> PressableStatePatch::with_hovered(bool)
///     pub pressed: bool,   // -> PressableStatePatch::with_pressed(bool)
///     #[shallow(by_value)]
///     pub tint: Tint,      // compared with ==
/// }
///
/// let mut state = CoalescedState::new(PressableState::default());
/// state.apply(&PressableStatePatch::new().with_hovered(true));
/// ```
///
/// # Generated Code
///
/// - `NamePatch` (same visibility and generics as `Name`) deriving `Clone`
///   and `Debug`, with `Default`, `new()`, `is_empty()` and a
///   `with_<field>(value)` builder per field
/// - `impl glint_core::Coalesce for Name { type Patch = NamePatch; .. }`
///
/// Every field type must be `Clone` and `Debug`. On generic structs the
/// `Coalesce` impl is bounded on each field type being `Clone` plus
/// `ShallowEq` (or `PartialEq` for `#[shallow(by_value)]` fields).
#[proc_macro_derive(ShallowState, attributes(shallow))]
pub fn derive_shallow_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_shallow_state(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_shallow_state(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;
    let patch_name = format_ident!("{}Patch", name);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "ShallowState requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "ShallowState can only be derived for structs",
            ))
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut patch_fields = Vec::new();
    let mut empty_fields = Vec::new();
    let mut setters = Vec::new();
    let mut is_empty_checks = Vec::new();
    let mut differs_checks = Vec::new();
    let mut merged_fields = Vec::new();
    let mut field_bounds = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_vis = &field.vis;
        let field_type = &field.ty;
        let setter = format_ident!("with_{}", field_name);
        let doc = format!("Set `{}` in this patch.", field_name);

        patch_fields.push(quote! {
            #field_vis #field_name: ::core::option::Option<#field_type>
        });
        empty_fields.push(quote! { #field_name: ::core::option::Option::None });
        setters.push(quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #setter(mut self, value: #field_type) -> Self {
                self.#field_name = ::core::option::Option::Some(value);
                self
            }
        });
        is_empty_checks.push(quote! { self.#field_name.is_none() });

        let same = if has_by_value_attr(field)? {
            field_bounds.push(quote! {
                #field_type: ::core::cmp::PartialEq + ::core::clone::Clone
            });
            quote! { ::core::cmp::PartialEq::eq(&self.#field_name, next) }
        } else {
            field_bounds.push(quote! {
                #field_type: ::glint_core::ShallowEq + ::core::clone::Clone
            });
            quote! { ::glint_core::ShallowEq::shallow_eq(&self.#field_name, next) }
        };
        differs_checks.push(quote! {
            if let ::core::option::Option::Some(next) = &patch.#field_name {
                if !#same {
                    return true;
                }
            }
        });
        merged_fields.push(quote! {
            #field_name: ::core::clone::Clone::clone(
                patch.#field_name.as_ref().unwrap_or(&self.#field_name)
            )
        });
    }

    let patch_doc = format!(
        "Partial update for [`{}`]; `None` fields are left unchanged.",
        name
    );
    let generics = &input.generics;

    // Generic field types need their comparison and clone bounds spelled out
    let mut coalesce_generics = input.generics.clone();
    if input.generics.type_params().next().is_some() {
        let predicates = &mut coalesce_generics.make_where_clause().predicates;
        for bound in &field_bounds {
            predicates.push(syn::parse2(bound.clone())?);
        }
    }
    let coalesce_where = &coalesce_generics.where_clause;

    Ok(quote! {
        #[doc = #patch_doc]
        #[derive(Clone, Debug)]
        #vis struct #patch_name #generics #where_clause {
            #(#patch_fields,)*
        }

        impl #impl_generics ::core::default::Default for #patch_name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#empty_fields,)*
                }
            }
        }

        impl #impl_generics #patch_name #ty_generics #where_clause {
            /// An empty patch; applying it never changes anything.
            pub fn new() -> Self {
                ::core::default::Default::default()
            }

            /// Returns `true` if no field is set.
            pub fn is_empty(&self) -> bool {
                true #(&& #is_empty_checks)*
            }

            #(#setters)*
        }

        impl #impl_generics ::glint_core::Coalesce for #name #ty_generics #coalesce_where {
            type Patch = #patch_name #ty_generics;

            fn differs(&self, patch: &Self::Patch) -> bool {
                #(#differs_checks)*
                false
            }

            fn merged(&self, patch: &Self::Patch) -> Self {
                Self {
                    #(#merged_fields,)*
                }
            }
        }
    })
}
