// LSP-specific features (wire encodings the analysis crate knows nothing about)
pub mod position_encoding;

// Re-export analysis features from spin-analysis
pub use spin_analysis::{
    document_symbols, go_to_definition, hover, semantic_tokens, signature_help,
};
