use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, quote_spanned};
use std::path::Path;

/// Runs the test against the mock server replaying the given markdown file.
///
/// ```ignore
/// #[swapi_playback_test("playback_data/list_people.md", configure_swapi)]
/// fn lists_people_playback() { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn swapi_playback_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    swapi_test(
        attrs,
        item,
        quote! { ::swapi_mock::InteractionMode::Playback },
        false,
    )
}

/// Runs the test through the mock server in record mode, writing the markdown
/// file. Ignored unless the crate enables its `live` feature.
#[proc_macro_attribute]
pub fn swapi_record_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    swapi_test(
        attrs,
        item,
        quote! { ::swapi_mock::InteractionMode::Record },
        true,
    )
}

fn swapi_test(
    attrs: TokenStream,
    item: TokenStream,
    mode: proc_macro2::TokenStream,
    live_only: bool,
) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let fn_attrs = &input.attrs;
    let visibility = &input.vis;
    let signature = &input.sig;
    let block = &input.block;

    if args.is_empty() || args.len() > 2 {
        return quote! {
            compile_error!("Expected a markdown path and an optional configuration function");
        }
        .into();
    }

    let markdown_name = match &args[0] {
        syn::NestedMeta::Lit(syn::Lit::Str(markdown_name)) => {
            if let Err(stream) = validate_markdown_path(markdown_name.value(), markdown_name.span())
            {
                return stream.into();
            }
            markdown_name.value()
        }
        _ => {
            return quote! {
                compile_error!("The first argument should be a string literal!");
            }
            .into()
        }
    };

    let configure = match args.get(1) {
        Some(syn::NestedMeta::Meta(syn::Meta::Path(function_path))) => {
            quote! { #function_path(&mut __swapi_configuration); }
        }
        Some(_) => {
            return quote! {
                compile_error!("The second argument should be a configuration function!");
            }
            .into()
        }
        None => quote! {},
    };

    if !signature.inputs.is_empty() || signature.asyncness.is_some() {
        return quote_spanned! {signature.ident.span()=>
            compile_error!("The test function should be a synchronous function without arguments");
        }
        .into();
    }

    let ignore = if live_only {
        quote! {
            #[cfg_attr(
                not(feature = "live"),
                ignore = "talks to the live service; enable the `live` feature"
            )]
        }
    } else {
        quote! {}
    };

    let output = quote! {
        #[test]
        #ignore
        #(#fn_attrs)*
        #visibility #signature {
            #[allow(unused_mut)]
            let mut __swapi_configuration =
                ::swapi_mock::MockConfiguration::with_markdown(#mode, #markdown_name);
            #configure

            let __swapi_session = match ::swapi_mock::TestSession::before_test(__swapi_configuration) {
                Ok(session) => session,
                Err(e) => panic!("swapi-mock error: {}", e),
            };

            let __swapi_result = ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| #block));
            let __swapi_finished = __swapi_session.finish();

            if let Err(panic) = __swapi_result {
                ::std::panic::resume_unwind(panic);
            }
            if let Err(e) = __swapi_finished {
                panic!("swapi-mock error: {}", e);
            }
        }
    };

    TokenStream::from(output)
}

fn validate_markdown_path<P: AsRef<Path>>(
    path: P,
    span: Span,
) -> Result<(), proc_macro2::TokenStream> {
    if !path.as_ref().to_string_lossy().ends_with(".md") {
        return Err(quote_spanned! {span=>
            compile_error!("The path should point to a .md file!");
        });
    }

    Ok(())
}
