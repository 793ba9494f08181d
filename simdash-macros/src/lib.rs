mod expand;

use proc_macro::TokenStream;

/**
 * Generates associated c-style structs for c-style struct enum variants, along with a `From` impl from each
 * generated struct into the enum. The enum's `#[derive(...)]` attributes are copied onto every generated struct.
 *
 * Example:
 * ```ignore
 * #[expand]
 * #[derive(Debug)]
 * pub enum Enum {
 *     Foo { foo: u8 },
 *     Bar { bar: u8 },
 * }
 * ```
 * generates
 * ```ignore
 * #[derive(Debug)]
 * pub struct Foo {
 *     pub foo: u8,
 * }
 *
 * impl From<Foo> for Enum { ... }
 *
 * #[derive(Debug)]
 * pub struct Bar {
 *     pub bar: u8,
 * }
 *
 * impl From<Bar> for Enum { ... }
 *
 * #[derive(Debug)]
 * pub enum Enum {
 *     Foo(Foo),
 *     Bar(Bar),
 * }
 * ```
 */
#[proc_macro_attribute]
pub fn expand(_arg_tokens: TokenStream, item_tokens: TokenStream) -> TokenStream {
    crate::expand::expand(item_tokens)
}
