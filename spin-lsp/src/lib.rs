//! Language Server Protocol (LSP) implementation for Spin and Spin2
//!
//!     This crate provides language server capabilities for Parallax Propeller Spin (P1) and
//!     Spin2 (P2) sources, enabling semantic editor support in any LSP-compatible editor
//!     (VSCode, Neovim, Emacs, Sublime, etc.).
//!
//! Design Decision: tower-lsp
//!
//!     The server is built on tower-lsp:
//!         - Async request handling on tokio, so a long analysis never blocks the JSON-RPC loop
//!         - The `LanguageServer` trait keeps every handler a plain async method that tests can
//!           call directly, without a transport
//!
//!     Trade-offs:
//!         - Handlers take &self, so document and configuration state live behind tokio locks
//!         - Notification ordering is async; stale analyses are cancelled rather than ordered
//!
//! Feature Set
//!
//!     Spin is a section-oriented language without block delimiters. Every feature reads the
//!     same two-pass analysis produced by `spin-analysis`:
//!
//!         1. Semantic Tokens (textDocument/semanticTokens/full):
//!             - User constants, enum values, variables, labels, methods, objects
//!             - Declaration, readonly, local, instance, static and modification modifiers
//!             - Storage types (BYTE/WORD/LONG) in declarations
//!         2. Document Symbols (textDocument/documentSymbol):
//!             - One entry per CON/VAR/OBJ/DAT/PUB/PRI section
//!             - DAT labels and variables as children
//!         3. Hover (textDocument/hover):
//!             - Scope and kind of user symbols, with their declaration comments
//!             - Built-in method, constant and register documentation per dialect
//!         4. Signature Help (textDocument/signatureHelp):
//!             - User methods from their PUB/PRI line, built-ins from the documentation tables
//!         5. Go to Definition (textDocument/definition):
//!             - Method-scoped resolution, so parameters and inline labels jump to the right method
//!
//! Configuration
//!
//!     Settings live under the `spin` key of workspace/didChangeConfiguration (or the
//!     initialization options):
//!         - `spin.dialect`: "auto" (default, from language id then extension), "spin1", "spin2"
//!         - `spin.semanticHighlighting`: false answers token requests with an empty list
//!     Any change re-analyzes every open document and asks the client to refresh tokens.
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - Handles JSON-RPC communication and capability negotiation
//!
//!     Server Layer (this crate):
//!         - Implements the LanguageServer trait
//!         - Stores open documents with their finished analysis
//!         - Converts byte columns to UTF-16 positions and encodes semantic tokens
//!         - Thin tests asserting the right feature is called and its result returned
//!
//!     Feature Layer (`spin-analysis`):
//!         - Stateless functions over an analysis and the document text
//!         - All logic and dense unit tests
//!
//! Error Handling and Robustness
//!
//!     1. No Panics:
//!         - The analysis engine is infallible; malformed input yields fewer tokens.
//!         - No `unwrap()` or `expect()` in production code paths.
//!
//!     2. Graceful Degradation:
//!         - Requests for unknown documents answer `None`.
//!         - Invalid settings are reported to the user and otherwise ignored.
//!
//!     3. Property-Based Testing:
//!         - `proptest` feeds arbitrary text through did_open and every request handler.
//!
//! Usage
//!
//!     Library:
//!         ```rust,no_run
//!         use spin_lsp::SpinLanguageServer;
//!         use tower_lsp::{LspService, Server};
//!
//!         #[tokio::main]
//!         async fn main() {
//!             let stdin = tokio::io::stdin();
//!             let stdout = tokio::io::stdout();
//!
//!             let (service, socket) = LspService::new(SpinLanguageServer::new);
//!             Server::new(stdin, stdout, socket).serve(service).await;
//!         }
//!         ```
//!
//!     Binary:
//!         $ spin-lsp
//!         Starts the language server on stdin/stdout for editor integration.
//!         $ spin-lsp tokens blinker.spin2
//!         $ spin-lsp symbols --dialect spin1 driver.spin
//!         Print the analysis of a file on disk.

pub mod features;
pub mod server;

pub use server::SpinLanguageServer;
