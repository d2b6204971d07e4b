use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, GenericParam, Ident, Result};

/// Expands `#[derive(Node)]` into `Node` + `Record` implementations.
pub(crate) fn expand(input: DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "#[derive(Node)] requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Node)] only supports structs",
            ));
        }
    };

    let mut idents: Vec<Ident> = Vec::new();
    for field in fields {
        if is_skipped(field)? {
            continue;
        }
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        idents.push(ident);
    }

    let name = &input.ident;
    let type_name = name.to_string();

    // Every type parameter gets a `Node` bound, like standard derives bound
    // their parameters.
    let mut generics = input.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(syn::parse_quote!(::delve::Node));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names: Vec<String> = idents.iter().map(Ident::to_string).collect();
    let indices: Vec<usize> = (0..idents.len()).collect();
    let field_len = idents.len();

    Ok(quote! {
        impl #impl_generics ::delve::Node for #name #ty_generics #where_clause {
            #[inline]
            fn kind(&self) -> ::delve::ops::NodeKind {
                ::delve::ops::NodeKind::Record
            }

            #[inline]
            fn node_ref(&self) -> ::delve::ops::NodeRef<'_> {
                ::delve::ops::NodeRef::Record(self)
            }
        }

        impl #impl_generics ::delve::ops::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::delve::Node> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#idents as &dyn ::delve::Node),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn ::delve::Node> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn ::delve::Node),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_len(&self) -> usize {
                #field_len
            }
        }
    })
}

/// Reports whether a field carries `#[node(skip)]`.
fn is_skipped(field: &syn::Field) -> Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("node") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown `node` attribute; expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
