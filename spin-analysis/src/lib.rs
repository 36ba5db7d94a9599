//! Semantic analysis for Spin and Spin2 sources
//!
//! This crate scans Spin/Spin2 object files and classifies every identifier they reference,
//! enabling features like semantic highlighting, outlines, hover text and navigation.
//!
//! # Architecture
//!
//! The language has no block delimiters: which section a line belongs to is decided purely by
//! keyword cues at column zero. Analysis therefore runs line by line, twice over the same text:
//!
//! - `state`: Section/sub-state tracking (CON, VAR, OBJ, PUB, PRI, DAT, comments, PASM)
//! - `strip`: Comment and string blanking with column-preserving views of a line
//! - `tokenizer`: Per-section split policies producing column-exact tokens
//! - `vocabulary` / `builtins`: Dialect rule sets and built-in documentation
//! - `symbols`: Layered symbol tables (global, per-method, inline PASM labels)
//! - `resolve`: The resolution chain shared by the classifier and the consumers
//! - `analysis`: The `analyze` entry points and the immutable [`Analysis`] result
//!
//! The first pass declares, the second classifies. Both passes are driven by the same per-state
//! handlers, so a declaration and its classified token always agree on position.
//!
//! Consumers sit on top of an [`Analysis`]:
//!
//! - `semantic_tokens`: Sorted, de-duplicated tokens plus the legend
//! - `document_symbols`: Section outline
//! - `hover`: Markdown for user symbols and built-ins
//! - `signature_help`: Parameter help for the innermost open call
//! - `go_to_definition`: Declaring position of a user symbol
//!
//! # Design Principles
//!
//! - **Stateless**: Every run starts from the text alone and returns plain data
//! - **Infallible**: Malformed input degrades to fewer tokens, never to an error or a panic
//! - **Reusable**: Not tied to the LSP protocol beyond `lsp_types::SymbolKind` for outlines
//!
//! # Usage
//!
//! ```rust
//! use spin_analysis::semantic_tokens::collect_semantic_tokens;
//! use spin_analysis::{Analyzer, Dialect};
//!
//! let source = "CON\n  LED = 56\n\nPUB main()\n  pinhigh(LED)\n";
//! let analysis = Analyzer::new(Dialect::Spin2).analyze(source);
//!
//! assert!(analysis.is_known_symbol("led"));
//! assert!(!collect_semantic_tokens(&analysis).is_empty());
//! ```

// Core engine
pub mod analysis;
pub mod builtins;
pub mod position;
pub mod resolve;
mod scanner;
pub mod state;
pub mod strip;
pub mod symbols;
pub mod tokenizer;
pub mod utils;
pub mod vocabulary;

// Consumers
pub mod document_symbols;
pub mod go_to_definition;
pub mod hover;
pub mod semantic_tokens;
pub mod signature_help;

// Test support (available in tests and as dev-dependency)
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use analysis::{
    analyze, analyze_with_cancellation, Analysis, Analyzer, Cancellation, ClassifiedToken,
    MethodScope, NeverCancel,
};
pub use position::{Position, Range};
pub use vocabulary::Dialect;
