use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{Attribute, Data, DeriveInput, Fields, FieldsUnnamed};

// NOTE: only #[derive(...)] attributes are copied onto the generated structs; container attributes such as
// #[serde(...)] describe the enum's representation and would change the meaning of a struct
fn derive_attributes(attributes: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attributes.iter().filter(|attribute| attribute.path().is_ident("derive"))
}

pub fn expand(item: TokenStream) -> TokenStream {
    let mut derive_input = syn::parse_macro_input!(item as DeriveInput);
    let enum_ident = derive_input.ident.clone();
    let struct_attributes = derive_attributes(&derive_input.attrs).cloned().collect::<Vec<_>>();
    let struct_visibility = derive_input.vis.clone();
    let Data::Enum(data_enum) = &mut derive_input.data else {
        return derive_input.into_token_stream().into();
    };
    let mut structs = std::vec![];

    for variant in &mut data_enum.variants {
        let Fields::Named(fields_named) = &mut variant.fields else {
            continue;
        };

        // NOTE: the variant's fields become the struct's fields, so they take on the enum's visibility
        for field in &mut fields_named.named {
            field.vis = struct_visibility.clone();
        }

        let struct_ident = variant.ident.clone();
        let fields_unnamed: FieldsUnnamed = syn::parse_quote! { (#struct_ident) };
        let struct_fields = std::mem::replace(&mut variant.fields, Fields::Unnamed(fields_unnamed));
        let structs_item = quote::quote! {
            #(#struct_attributes)*
            #struct_visibility struct #struct_ident #struct_fields

            impl ::core::convert::From<#struct_ident> for #enum_ident {
                fn from(value: #struct_ident) -> Self {
                    Self::#struct_ident(value)
                }
            }
        };

        structs.push(structs_item);
    }

    quote::quote! {
        #(#structs)*
        #derive_input
    }
    .into()
}
