#![recursion_limit = "128"]
extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, Type};

enum FieldType {
    Input,
    Output,
    State,
}

/// Implements `zplane::node::Node` for a structure.
///
/// Fields typed `NodeReceiver<T>` are inputs and fields typed
/// `NodeSender<T>` are outputs; everything else is node state. The generated
/// `call` receives one value from each input in declaration order, hands
/// them to `self.run(..)` and sends a clone of the result to every connected
/// receiver. Add `#[pass_by_ref]` to pass the inputs to `run` by reference.
#[proc_macro_derive(Node, attributes(pass_by_ref))]
pub fn node_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();
    let pass_by_ref = input
        .attrs
        .iter()
        .any(|attr| attr.path.is_ident("pass_by_ref"));

    let fields = match input.data {
        Data::Struct(ref data_struct) => match data_struct.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => panic!("Node derive needs named fields."),
        },
        _ => panic!("Node derive only supports structures."),
    };

    let mut recv_fields = vec![];
    let mut send_fields = vec![];
    for field in fields {
        let ident = match field.ident {
            Some(ref id) => id.clone(),
            None => continue,
        };
        match parse_type(&field.ty) {
            FieldType::Input => recv_fields.push(ident),
            FieldType::Output => send_fields.push(ident),
            FieldType::State => (),
        }
    }

    let recv_values: Vec<Ident> = recv_fields
        .iter()
        .map(|x| Ident::new(&format!("recv_{}", x), Span::call_site()))
        .collect();
    let recv_idents = recv_fields.clone();

    let args = if pass_by_ref {
        quote! { #(&#recv_values),* }
    } else {
        quote! { #(#recv_values),* }
    };

    let macro_out = quote! {
        impl #impl_generics zplane::node::Node for #name #ty_generics #where_clause {
            fn call(&mut self) -> Result<(), zplane::node::NodeError> {
                #(
                    let #recv_values = match self.#recv_fields {
                        Some(ref r) => r
                            .recv()
                            .map_err(|_| zplane::node::NodeError::DataEnd)?,
                        None => {
                            return Err(zplane::node::NodeError::PermanentError)
                        }
                    };
                )*
                let res = self.run(#args)?;
                #(
                    self.#send_fields.retain(|s| s.send(res.clone()).is_ok());
                )*
                let _ = &res;
                Ok(())
            }

            fn is_connected(&self) -> bool {
                true #(&& self.#recv_idents.is_some())*
            }
        }
    };
    macro_out.into()
}

fn parse_type(ty: &Type) -> FieldType {
    let path = match ty {
        Type::Path(ref type_path) => &type_path.path,
        _ => return FieldType::State,
    };
    match path.segments.last() {
        Some(seg) if seg.ident == "NodeReceiver" => FieldType::Input,
        Some(seg) if seg.ident == "NodeSender" => FieldType::Output,
        _ => FieldType::State,
    }
}
