//! Mark pass: placeholder substitution over one parsed source file.
//!
//! The pass is a depth-first `VisitMut` traversal that rewrites every
//! identifier whose spelling contains placeholder runs, records what it
//! replaced, and collects the template type's own declaration for the
//! sweep pass. All state is threaded explicitly through the visitor;
//! there are no globals.

use proc_macro2::{Group, Span, TokenStream, TokenTree};
use syn::visit_mut::{self, VisitMut};
use syn::{File, Ident, Item};

use stencil_core::{ExpandError, MappingTable, PlaceholderMatcher, ReplacementRecord};

use crate::sweep::MarkedDecls;

/// Everything the mark pass learned about one file.
#[derive(Debug)]
pub struct MarkReport {
    /// Placeholders actually replaced, for output naming.
    pub replaced: ReplacementRecord,
    /// Top-level declarations to be removed by the sweep pass.
    pub marked: MarkedDecls,
}

/// Substitute placeholder identifiers throughout `file` and collect the
/// template type declarations for removal.
///
/// Every node is visited, including the token streams of macro
/// invocations and attribute argument lists, so no identifier is skipped
/// because of its syntactic role. A top-level type declaration whose
/// declared name is an exact mapping key is the template's own
/// definition: it is recorded in [`MarkedDecls`] rather than renamed,
/// while its interior is still substituted like any other code.
///
/// # Errors
/// Fails on the first placeholder-shaped token with no mapping entry
/// ([`ExpandError::UnknownPlaceholder`]) or on a substitution whose
/// result is not a legal identifier
/// ([`ExpandError::InvalidIdentifier`]). The tree may be partially
/// rewritten at that point and must be discarded.
pub fn mark(
    file: &mut File,
    mapping: &MappingTable,
    matcher: &dyn PlaceholderMatcher,
) -> Result<MarkReport, ExpandError> {
    let mut marker = Marker {
        mapping,
        matcher,
        replaced: ReplacementRecord::new(),
        marked: MarkedDecls::default(),
        failure: None,
    };

    marker.visit_file_mut(file);

    match marker.failure {
        Some(err) => Err(err),
        None => Ok(MarkReport {
            replaced: marker.replaced,
            marked: marker.marked,
        }),
    }
}

struct Marker<'a> {
    mapping: &'a MappingTable,
    matcher: &'a dyn PlaceholderMatcher,
    replaced: ReplacementRecord,
    marked: MarkedDecls,
    failure: Option<ExpandError>,
}

impl Marker<'_> {
    /// Replace every placeholder run in `spelling`, left to right.
    ///
    /// Returns `None` if the spelling contains no runs. Characters
    /// outside matched runs are preserved verbatim.
    fn substitute(&mut self, spelling: &str) -> Result<Option<String>, ExpandError> {
        let runs = self.matcher.find_runs(spelling);
        if runs.is_empty() {
            return Ok(None);
        }

        let mut out = String::with_capacity(spelling.len());
        let mut cursor = 0;
        for run in runs {
            let token = &spelling[run.clone()];
            let Some(value) = self.mapping.get(token) else {
                return Err(ExpandError::UnknownPlaceholder {
                    token: token.to_string(),
                });
            };
            out.push_str(&spelling[cursor..run.start]);
            out.push_str(value);
            self.replaced.record(token, value);
            cursor = run.end;
        }
        out.push_str(&spelling[cursor..]);

        Ok(Some(out))
    }

    /// Substitute one identifier in place, keeping its span.
    fn rewrite_ident(&mut self, ident: &mut Ident) {
        if self.failure.is_some() {
            return;
        }
        let spelling = ident.to_string();
        match self.substitute(&spelling) {
            Ok(None) => {}
            Ok(Some(rewritten)) => match syn::parse_str::<Ident>(&rewritten) {
                Ok(mut parsed) => {
                    parsed.set_span(ident.span());
                    *ident = parsed;
                }
                Err(_) => {
                    self.failure = Some(ExpandError::InvalidIdentifier {
                        spelling: rewritten,
                    });
                }
            },
            Err(err) => self.failure = Some(err),
        }
    }

    /// Substitute identifier tokens in a raw token stream.
    ///
    /// Macro invocation bodies and attribute argument lists are opaque
    /// to the typed AST; this walk keeps them in scope for the pass.
    fn rewrite_tokens(&mut self, tokens: TokenStream) -> TokenStream {
        tokens
            .into_iter()
            .map(|tree| match tree {
                TokenTree::Ident(mut ident) => {
                    self.rewrite_ident(&mut ident);
                    TokenTree::Ident(ident)
                }
                TokenTree::Group(group) => {
                    let rewritten = self.rewrite_tokens(group.stream());
                    let mut replacement = Group::new(group.delimiter(), rewritten);
                    replacement.set_span(group.span());
                    TokenTree::Group(replacement)
                }
                other => other,
            })
            .collect()
    }

    /// Walk a marked declaration with its name swapped out, so the
    /// declaration's own name never reaches the substitution rule. The
    /// interior is visited normally; the name is restored before
    /// returning.
    fn visit_shielded(&mut self, item: &mut Item) {
        let Some(name) = declared_type_name_mut(item) else {
            return;
        };
        let preserved = std::mem::replace(name, Ident::new("__pending_removal", Span::call_site()));
        self.visit_item_mut(item);
        if let Some(name) = declared_type_name_mut(item) {
            *name = preserved;
        }
    }
}

impl VisitMut for Marker<'_> {
    fn visit_file_mut(&mut self, file: &mut File) {
        for attr in &mut file.attrs {
            self.visit_attribute_mut(attr);
        }
        for (index, item) in file.items.iter_mut().enumerate() {
            if self.failure.is_some() {
                return;
            }
            match declared_type_name(item) {
                Some(name) if self.mapping.contains(&name.to_string()) => {
                    self.marked.insert(index);
                    self.visit_shielded(item);
                }
                _ => self.visit_item_mut(item),
            }
        }
    }

    fn visit_ident_mut(&mut self, ident: &mut Ident) {
        self.rewrite_ident(ident);
    }

    fn visit_macro_mut(&mut self, node: &mut syn::Macro) {
        visit_mut::visit_macro_mut(self, node);
        let tokens = std::mem::take(&mut node.tokens);
        node.tokens = self.rewrite_tokens(tokens);
    }

    fn visit_meta_list_mut(&mut self, node: &mut syn::MetaList) {
        visit_mut::visit_meta_list_mut(self, node);
        let tokens = std::mem::take(&mut node.tokens);
        node.tokens = self.rewrite_tokens(tokens);
    }
}

/// The declared name of a top-level type declaration, if `item` is one.
///
/// These are the declaration kinds a template type definition can take.
fn declared_type_name(item: &Item) -> Option<&Ident> {
    match item {
        Item::Struct(item) => Some(&item.ident),
        Item::Enum(item) => Some(&item.ident),
        Item::Union(item) => Some(&item.ident),
        Item::Type(item) => Some(&item.ident),
        Item::Trait(item) => Some(&item.ident),
        _ => None,
    }
}

fn declared_type_name_mut(item: &mut Item) -> Option<&mut Ident> {
    match item {
        Item::Struct(item) => Some(&mut item.ident),
        Item::Enum(item) => Some(&mut item.ident),
        Item::Union(item) => Some(&mut item.ident),
        Item::Type(item) => Some(&mut item.ident),
        Item::Trait(item) => Some(&mut item.ident),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn table(pairs: &[(&str, &str)]) -> MappingTable {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MappingTable::build(&owned).unwrap()
    }

    fn run_mark(file: &mut File, mapping: &MappingTable) -> Result<MarkReport, ExpandError> {
        let matcher = stencil_core::UnderscoreMatcher::new();
        mark(file, mapping, &matcher)
    }

    fn rendered(file: &File) -> String {
        file.to_token_stream().to_string()
    }

    #[test]
    fn replaces_identifiers_everywhere() {
        let mapping = table(&[("type", "i64")]);
        let mut file: File = syn::parse_quote! {
            fn sum(values: &[_type_]) -> _type_ {
                let mut total: _type_ = 0;
                for v in values {
                    total += *v;
                }
                total
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        let out = rendered(&file);
        assert!(!out.contains("_type_"));
        assert!(out.contains("i64"));
        assert_eq!(report.replaced.get("_type_"), Some("i64"));
        assert!(report.marked.is_empty());
    }

    #[test]
    fn non_placeholder_identifiers_unchanged() {
        let mapping = table(&[("type", "i64")]);
        let mut file: File = syn::parse_quote! {
            fn subtype_of(archetype: u32) -> u32 {
                archetype
            }
        };
        let before = rendered(&file);

        let report = run_mark(&mut file, &mapping).unwrap();

        // "subtype_of" and "archetype" contain the letters but not the
        // delimited token shape.
        assert_eq!(rendered(&file), before);
        assert!(report.replaced.is_empty());
    }

    #[test]
    fn embedded_runs_preserve_surrounding_text() {
        let mapping = table(&[("type", "point")]);
        let mut file: File = syn::parse_quote! {
            fn new_type_list() -> Vec<u8> {
                Vec::new()
            }
        };

        run_mark(&mut file, &mapping).unwrap();

        let out = rendered(&file);
        assert!(out.contains("newpointlist"));
    }

    #[test]
    fn marks_template_declaration_without_renaming() {
        let mapping = table(&[("type", "i32")]);
        let mut file: File = syn::parse_quote! {
            type _type_ = u8;
            struct Holder {
                value: _type_,
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        assert_eq!(report.marked.len(), 1);
        assert!(report.marked.contains(0));

        // The declaration's own name is untouched; the field use is not.
        let syn::Item::Type(alias) = &file.items[0] else {
            panic!("expected type alias");
        };
        assert_eq!(alias.ident.to_string(), "_type_");
        assert!(rendered(&file).contains("value : i32"));
    }

    #[test]
    fn marked_declaration_name_not_recorded() {
        let mapping = table(&[("type", "i32")]);
        // `_Type_` appears only as the marked declaration's name.
        let mut file: File = syn::parse_quote! {
            struct _Type_ {
                value: _type_,
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        assert!(report.marked.contains(0));
        assert_eq!(report.replaced.get("_type_"), Some("i32"));
        assert!(report.replaced.get("_Type_").is_none());
    }

    #[test]
    fn exact_match_only_for_marking() {
        let mapping = table(&[("type", "i32")]);
        // The name contains a placeholder run but is not an exact key, so
        // it is substituted, not marked.
        let mut file: File = syn::parse_quote! {
            struct _Type_List {
                items: Vec<_type_>,
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        assert!(report.marked.is_empty());
        let syn::Item::Struct(decl) = &file.items[0] else {
            panic!("expected struct");
        };
        assert_eq!(decl.ident.to_string(), "I32List");
    }

    #[test]
    fn both_casings_resolve() {
        let mapping = table(&[("typeKey", "value")]);
        let mut file: File = syn::parse_quote! {
            fn lookup(k: _typeKey_) -> _TypeKey_ {
                _TypeKey_::from(k)
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        let out = rendered(&file);
        assert!(out.contains("value"));
        assert!(out.contains("Value"));
        assert_eq!(report.replaced.get("_typeKey_"), Some("value"));
        assert_eq!(report.replaced.get("_TypeKey_"), Some("Value"));
    }

    #[test]
    fn unknown_placeholder_fails() {
        let mapping = table(&[("key", "i32")]);
        let mut file: File = syn::parse_quote! {
            fn get(v: _typeValue_) {}
        };

        let err = run_mark(&mut file, &mapping).unwrap_err();

        assert_eq!(
            err,
            ExpandError::UnknownPlaceholder {
                token: "_typeValue_".to_string(),
            }
        );
    }

    #[test]
    fn keyword_replacement_fails_cleanly() {
        let mapping = table(&[("type", "fn")]);
        let mut file: File = syn::parse_quote! {
            fn id(v: _type_) {}
        };

        let err = run_mark(&mut file, &mapping).unwrap_err();

        assert!(matches!(err, ExpandError::InvalidIdentifier { .. }));
    }

    #[test]
    fn macro_arguments_are_substituted() {
        let mapping = table(&[("type", "u16")]);
        let mut file: File = syn::parse_quote! {
            fn show() {
                println!("{}", _type_::MAX);
                let v = vec![_type_::MIN; 4];
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        let out = rendered(&file);
        assert!(!out.contains("_type_"));
        assert!(out.contains("u16 :: MAX"));
        assert_eq!(report.replaced.get("_type_"), Some("u16"));
    }

    #[test]
    fn unknown_placeholder_inside_macro_fails() {
        let mapping = table(&[("key", "i32")]);
        let mut file: File = syn::parse_quote! {
            fn show() {
                println!("{}", _typeOther_::MAX);
            }
        };

        let err = run_mark(&mut file, &mapping).unwrap_err();
        assert_eq!(err.token(), Some("_typeOther_"));
    }

    #[test]
    fn nested_items_are_in_scope() {
        let mapping = table(&[("type", "f32")]);
        let mut file: File = syn::parse_quote! {
            mod inner {
                pub fn scale(v: _type_) -> _type_ {
                    v * 2.0
                }
            }
        };

        run_mark(&mut file, &mapping).unwrap();

        assert!(!rendered(&file).contains("_type_"));
    }

    #[test]
    fn declarations_inside_modules_are_not_marked() {
        // Template detection is top-level only, as in the reference
        // behavior; the nested name is substituted instead.
        let mapping = table(&[("type", "i8")]);
        let mut file: File = syn::parse_quote! {
            mod inner {
                pub type _type_ = u8;
            }
        };

        let report = run_mark(&mut file, &mapping).unwrap();

        assert!(report.marked.is_empty());
        assert!(rendered(&file).contains("type i8 = u8"));
    }
}
