//! This is the semantic token collector, which editors use to color user symbols.
//!
//! Semantic Tokens and Editor Highlighting
//!
//! 1. The grammar-based highlighter in each editor plugin already colors keywords, operators,
//! numbers and strings. Semantic tokens are layered on top and only ever describe names the
//! analyzer could resolve: user constants, variables, labels, methods, objects and the storage
//! keywords that size them. An identifier the analyzer does not know gets no token at all and
//! keeps whatever color the grammar gave it.
//! 2. The LSP declares the legend below at initialization and emits indices into it. Kind and
//! modifier names follow the standard LSP vocabulary where one exists (`variable`, `enumMember`,
//! `readonly`, ...) so stock themes color them without any plugin-side mapping. The three
//! non-standard names, `returnValue`, `displayName` and `storageType`, are mapped by the plugins.
//!
//! VSCode, declarative mapping in `package.json`:
//!
//! ```json
//! "semanticTokenScopes": [{
//!     "language": "spin2",
//!     "scopes": {
//!         "returnValue": ["variable.other.readwrite"],
//!         "displayName": ["entity.name.type"],
//!         "storageType": ["storage.type"]
//!     }
//! }]
//! ```
//!
//! Ordering is part of the contract: tokens come back sorted by position, one per start, which is
//! what the delta encoding in the server expects.

use crate::analysis::Analysis;
use crate::position::Range;
use crate::resolve::TokenKind;
use crate::symbols::{Modifier, Modifiers};

/// Legend order; the index of a kind here is its wire value.
pub const SEMANTIC_TOKEN_KINDS: &[TokenKind] = &[
    TokenKind::Variable,
    TokenKind::Constant,
    TokenKind::EnumMember,
    TokenKind::Label,
    TokenKind::Method,
    TokenKind::Parameter,
    TokenKind::ReturnValue,
    TokenKind::Namespace,
    TokenKind::DisplayName,
    TokenKind::StorageType,
];

/// Modifier legend; bit `n` of a token's modifier set is entry `n`.
pub const SEMANTIC_TOKEN_MODIFIERS: &[Modifier] = &Modifier::ALL;

#[derive(Debug, Clone, PartialEq)]
pub struct SpinSemanticToken {
    pub kind: TokenKind,
    pub modifiers: Modifiers,
    pub range: Range,
}

pub fn collect_semantic_tokens(analysis: &Analysis) -> Vec<SpinSemanticToken> {
    let mut tokens: Vec<SpinSemanticToken> = analysis
        .tokens()
        .iter()
        .filter(|token| token.length > 0)
        .map(|token| SpinSemanticToken {
            kind: token.kind,
            modifiers: token.modifiers,
            range: token.range(),
        })
        .collect();
    // Stable sort, so the first emitted token wins a shared start.
    tokens.sort_by_key(|token| token.range.start);
    tokens.dedup_by_key(|token| token.range.start);
    tokens
}

/// Index of `kind` in [`SEMANTIC_TOKEN_KINDS`].
pub fn kind_index(kind: TokenKind) -> u32 {
    SEMANTIC_TOKEN_KINDS
        .iter()
        .position(|candidate| *candidate == kind)
        .unwrap_or_default() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::test_support::sample_source;

    fn snippets(source: &str, tokens: &[SpinSemanticToken], kind: TokenKind) -> Vec<String> {
        let lines: Vec<&str> = source.lines().collect();
        tokens
            .iter()
            .filter(|token| token.kind == kind)
            .map(|token| {
                let line = lines[token.range.start.line];
                line[token.range.start.column..token.range.end.column].to_string()
            })
            .collect()
    }

    #[test]
    fn legend_matches_kind_names() {
        let names: Vec<&str> = SEMANTIC_TOKEN_KINDS.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "variable",
                "constant",
                "enumMember",
                "label",
                "method",
                "parameter",
                "returnValue",
                "namespace",
                "displayName",
                "storageType",
            ]
        );
        assert_eq!(SEMANTIC_TOKEN_MODIFIERS.len(), 6);
        assert_eq!(kind_index(TokenKind::StorageType), 9);
    }

    #[test]
    fn tokens_are_sorted_and_unique() {
        let tokens = collect_semantic_tokens(&analyze(sample_source()));
        assert!(!tokens.is_empty());
        for pair in tokens.windows(2) {
            assert!(pair[0].range.start < pair[1].range.start);
        }
    }

    #[test]
    fn sample_symbols_are_highlighted() {
        let source = sample_source();
        let tokens = collect_semantic_tokens(&analyze(source));
        let namespaces = snippets(source, &tokens, TokenKind::Namespace);
        assert!(namespaces.iter().all(|text| text == "ser"));
        assert!(namespaces.len() >= 2);
        assert!(snippets(source, &tokens, TokenKind::EnumMember).contains(&"MODE_FAST".to_string()));
        assert!(snippets(source, &tokens, TokenKind::Label).contains(&"loop".to_string()));
    }

    #[test]
    fn empty_document_has_no_tokens() {
        assert!(collect_semantic_tokens(&analyze("")).is_empty());
    }
}
