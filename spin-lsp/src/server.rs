//! Main language server implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::features::document_symbols::{collect_document_symbols, SpinDocumentSymbol};
use crate::features::go_to_definition::goto_definition;
use crate::features::hover::{hover as compute_hover, HoverResult};
use crate::features::position_encoding::LineIndex;
use crate::features::semantic_tokens::{
    collect_semantic_tokens, kind_index, SpinSemanticToken, SEMANTIC_TOKEN_KINDS,
    SEMANTIC_TOKEN_MODIFIERS,
};
use crate::features::signature_help::{signature_help, SignatureHelpResult};
use serde::Deserialize;
use serde_json::Value;
use spin_analysis::{
    analyze_with_cancellation, Analysis, Dialect, Position as SpinPosition, Range as SpinRange,
};
use tokio::sync::{Mutex, RwLock};
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DocumentSymbol, DocumentSymbolParams, DocumentSymbolResponse,
    Documentation, GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverContents,
    HoverParams, HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    Location, MarkupContent, MarkupKind, MessageType, OneOf, ParameterInformation,
    ParameterLabel, SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokens,
    SemanticTokensFullOptions, SemanticTokensLegend, SemanticTokensOptions, SemanticTokensParams,
    SemanticTokensResult, SemanticTokensServerCapabilities, ServerCapabilities, ServerInfo,
    SignatureHelp, SignatureHelpOptions, SignatureHelpParams, SignatureInformation,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
    WorkDoneProgressOptions,
};
use tower_lsp::Client;
use tracing::{debug, warn};

#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn show_message(&self, typ: MessageType, message: String);
    /// Ask the editor to re-request semantic tokens for every open document.
    async fn refresh_semantic_tokens(&self);
}

#[async_trait]
impl LspClient for Client {
    async fn show_message(&self, typ: MessageType, message: String) {
        self.show_message(typ, message).await;
    }

    async fn refresh_semantic_tokens(&self) {
        if let Err(error) = self.semantic_tokens_refresh().await {
            debug!(%error, "client refused semantic token refresh");
        }
    }
}

pub trait FeatureProvider: Send + Sync + 'static {
    fn semantic_tokens(&self, analysis: &Analysis) -> Vec<SpinSemanticToken>;
    fn document_symbols(&self, analysis: &Analysis, text: &str) -> Vec<SpinDocumentSymbol>;
    fn hover(&self, analysis: &Analysis, text: &str, position: SpinPosition) -> Option<HoverResult>;
    fn signature_help(
        &self,
        analysis: &Analysis,
        text: &str,
        position: SpinPosition,
    ) -> Option<SignatureHelpResult>;
    fn goto_definition(
        &self,
        analysis: &Analysis,
        text: &str,
        position: SpinPosition,
    ) -> Option<SpinRange>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider;

impl DefaultFeatureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn semantic_tokens(&self, analysis: &Analysis) -> Vec<SpinSemanticToken> {
        collect_semantic_tokens(analysis)
    }

    fn document_symbols(&self, analysis: &Analysis, text: &str) -> Vec<SpinDocumentSymbol> {
        collect_document_symbols(analysis, text)
    }

    fn hover(&self, analysis: &Analysis, text: &str, position: SpinPosition) -> Option<HoverResult> {
        compute_hover(analysis, text, position)
    }

    fn signature_help(
        &self,
        analysis: &Analysis,
        text: &str,
        position: SpinPosition,
    ) -> Option<SignatureHelpResult> {
        signature_help(analysis, text, position)
    }

    fn goto_definition(
        &self,
        analysis: &Analysis,
        text: &str,
        position: SpinPosition,
    ) -> Option<SpinRange> {
        goto_definition(analysis, text, position)
    }
}

/// How the dialect of a document is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectSetting {
    /// From the language id, then the file extension.
    #[default]
    Auto,
    Spin1,
    Spin2,
}

impl DialectSetting {
    pub fn resolve(self, uri: &Url, language_id: &str) -> Dialect {
        match self {
            DialectSetting::Spin1 => Dialect::Spin1,
            DialectSetting::Spin2 => Dialect::Spin2,
            DialectSetting::Auto => Dialect::from_language_id(language_id)
                .or_else(|| Dialect::from_path(uri.path()))
                .unwrap_or_default(),
        }
    }
}

/// Settings under the `spin` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpinConfiguration {
    pub dialect: DialectSetting,
    pub semantic_highlighting: bool,
}

impl Default for SpinConfiguration {
    fn default() -> Self {
        Self {
            dialect: DialectSetting::Auto,
            semantic_highlighting: true,
        }
    }
}

impl SpinConfiguration {
    /// Reads `{"spin": {...}}`, or the bare `{...}` object some clients send as initialization
    /// options. `Ok(None)` when there is nothing to apply.
    pub fn from_settings(settings: &Value) -> serde_json::Result<Option<Self>> {
        let section = settings.get("spin").unwrap_or(settings);
        if !section.is_object() {
            return Ok(None);
        }
        serde_json::from_value(section.clone()).map(Some)
    }
}

#[derive(Clone)]
struct DocumentEntry {
    analysis: Arc<Analysis>,
    text: Arc<String>,
    language_id: String,
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
    /// Cancellation flag of the newest analysis started for each document.
    pending: Mutex<HashMap<Url, Arc<AtomicBool>>>,
}

impl DocumentStore {
    /// Analyze `text` off the async runtime and store the result.
    ///
    /// Starting a newer analysis of the same document cancels this one; `None` means the result
    /// was superseded.
    async fn upsert(
        &self,
        uri: Url,
        text: String,
        language_id: String,
        dialect: Dialect,
    ) -> Option<DocumentEntry> {
        let cancel = Arc::new(AtomicBool::new(false));
        if let Some(previous) = self.pending.lock().await.insert(uri.clone(), cancel.clone()) {
            previous.store(true, Ordering::Relaxed);
        }

        let text = Arc::new(text);
        let source = text.clone();
        let flag = cancel.clone();
        let analysis = tokio::task::spawn_blocking(move || {
            analyze_with_cancellation(source.as_str(), dialect, &flag)
        })
        .await
        .ok()
        .flatten();

        let mut entries = self.entries.write().await;
        self.release(&uri, &cancel).await;
        let analysis = analysis?;
        if cancel.load(Ordering::Relaxed) {
            debug!(%uri, "analysis superseded");
            return None;
        }
        let entry = DocumentEntry {
            analysis: Arc::new(analysis),
            text,
            language_id,
        };
        entries.insert(uri, entry.clone());
        Some(entry)
    }

    /// Drop the pending flag of a finished analysis unless a newer one replaced it.
    async fn release(&self, uri: &Url, flag: &Arc<AtomicBool>) {
        let mut pending = self.pending.lock().await;
        if pending.get(uri).is_some_and(|current| Arc::ptr_eq(current, flag)) {
            pending.remove(uri);
        }
    }

    async fn get(&self, uri: &Url) -> Option<DocumentEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn snapshot(&self) -> Vec<(Url, DocumentEntry)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(uri, entry)| (uri.clone(), entry.clone()))
            .collect()
    }

    async fn remove(&self, uri: &Url) {
        if let Some(flag) = self.pending.lock().await.remove(uri) {
            flag.store(true, Ordering::Relaxed);
        }
        self.entries.write().await.remove(uri);
    }
}

fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: SEMANTIC_TOKEN_KINDS
            .iter()
            .map(|kind| SemanticTokenType::new(kind.as_str()))
            .collect(),
        token_modifiers: SEMANTIC_TOKEN_MODIFIERS
            .iter()
            .map(|modifier| SemanticTokenModifier::new(modifier.as_str()))
            .collect(),
    }
}

pub struct SpinLanguageServer<C = Client, P = DefaultFeatureProvider> {
    client: C,
    documents: DocumentStore,
    features: Arc<P>,
    config: RwLock<SpinConfiguration>,
}

impl SpinLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(DefaultFeatureProvider::new()))
    }
}

impl<C, P> SpinLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self {
            client,
            documents: DocumentStore::default(),
            features,
            config: RwLock::new(SpinConfiguration::default()),
        }
    }

    async fn analyze_and_store(&self, uri: Url, text: String, language_id: String) {
        let dialect = self.config.read().await.dialect.resolve(&uri, &language_id);
        debug!(%uri, %dialect, bytes = text.len(), "analyzing document");
        self.documents.upsert(uri, text, language_id, dialect).await;
    }

    async fn document_entry(&self, uri: &Url) -> Option<DocumentEntry> {
        self.documents.get(uri).await
    }

    /// Apply new settings; `true` when anything changed.
    async fn apply_settings(&self, settings: &Value) -> bool {
        let parsed = match SpinConfiguration::from_settings(settings) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return false,
            Err(error) => {
                warn!(%error, "ignoring invalid spin settings");
                self.client
                    .show_message(MessageType::WARNING, format!("Invalid spin settings: {error}"))
                    .await;
                return false;
            }
        };
        let mut config = self.config.write().await;
        let changed = *config != parsed;
        *config = parsed;
        changed
    }
}

fn encode_semantic_tokens(tokens: &[SpinSemanticToken], text: &str) -> Vec<SemanticToken> {
    let index = LineIndex::new(text);
    let mut data = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let range = index.to_lsp_range(token.range);
        let length = range.end.character.saturating_sub(range.start.character);
        if length == 0 {
            continue;
        }
        let line = range.start.line;
        let start = range.start.character;
        let delta_line = line.saturating_sub(prev_line);
        let delta_start = if delta_line == 0 {
            start.saturating_sub(prev_start)
        } else {
            start
        };
        data.push(SemanticToken {
            delta_line,
            delta_start,
            length,
            token_type: kind_index(token.kind),
            token_modifiers_bitset: token.modifiers.bits(),
        });
        prev_line = line;
        prev_start = start;
    }

    data
}

#[allow(deprecated)]
fn to_document_symbol(index: &LineIndex<'_>, symbol: &SpinDocumentSymbol) -> DocumentSymbol {
    DocumentSymbol {
        name: symbol.name.clone(),
        detail: symbol.detail.clone(),
        kind: symbol.kind,
        deprecated: None,
        range: index.to_lsp_range(symbol.range),
        selection_range: index.to_lsp_range(symbol.selection_range),
        children: if symbol.children.is_empty() {
            None
        } else {
            Some(
                symbol
                    .children
                    .iter()
                    .map(|child| to_document_symbol(index, child))
                    .collect(),
            )
        },
        tags: None,
    }
}

fn to_lsp_signature_help(result: SignatureHelpResult) -> SignatureHelp {
    let active = result.active_parameter as u32;
    let parameters = result
        .parameters
        .into_iter()
        .map(|parameter| ParameterInformation {
            label: ParameterLabel::Simple(parameter.label),
            documentation: parameter.documentation.map(Documentation::String),
        })
        .collect();
    SignatureHelp {
        signatures: vec![SignatureInformation {
            label: result.label,
            documentation: result.documentation.map(Documentation::String),
            parameters: Some(parameters),
            active_parameter: Some(active),
        }],
        active_signature: Some(0),
        active_parameter: Some(active),
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for SpinLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options.as_ref() {
            self.apply_settings(options).await;
        }
        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            document_symbol_provider: Some(OneOf::Left(true)),
            definition_provider: Some(OneOf::Left(true)),
            signature_help_provider: Some(SignatureHelpOptions {
                trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
                retrigger_characters: None,
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            semantic_tokens_provider: Some(
                SemanticTokensServerCapabilities::SemanticTokensOptions(SemanticTokensOptions {
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    legend: semantic_tokens_legend(),
                    range: None,
                    full: Some(SemanticTokensFullOptions::Bool(true)),
                }),
            ),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "spin-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {}

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri,
            text,
            language_id,
            ..
        } = params.text_document;
        self.analyze_and_store(uri, text, language_id).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if !self.apply_settings(&params.settings).await {
            return;
        }
        // The dialect may have changed under every open document.
        for (uri, entry) in self.documents.snapshot().await {
            self.analyze_and_store(uri, entry.text.to_string(), entry.language_id)
                .await;
        }
        self.client.refresh_semantic_tokens().await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let language_id = match self.document_entry(&uri).await {
            Some(entry) => entry.language_id,
            None => {
                warn!(%uri, "change for a document that was never opened");
                String::new()
            }
        };
        self.analyze_and_store(uri, change.text, language_id).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let Some(entry) = self.document_entry(&params.text_document.uri).await else {
            return Ok(None);
        };
        let data = if self.config.read().await.semantic_highlighting {
            let tokens = self.features.semantic_tokens(&entry.analysis);
            encode_semantic_tokens(&tokens, entry.text.as_str())
        } else {
            Vec::new()
        };
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data,
        })))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        if let Some(entry) = self.document_entry(&params.text_document.uri).await {
            let symbols = self
                .features
                .document_symbols(&entry.analysis, entry.text.as_str());
            let index = LineIndex::new(entry.text.as_str());
            let converted: Vec<DocumentSymbol> = symbols
                .iter()
                .map(|symbol| to_document_symbol(&index, symbol))
                .collect();
            Ok(Some(DocumentSymbolResponse::Nested(converted)))
        } else {
            Ok(None)
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position_params = params.text_document_position_params;
        if let Some(entry) = self.document_entry(&position_params.text_document.uri).await {
            let index = LineIndex::new(entry.text.as_str());
            let position = index.from_lsp_position(position_params.position);
            if let Some(result) = self
                .features
                .hover(&entry.analysis, entry.text.as_str(), position)
            {
                return Ok(Some(Hover {
                    contents: HoverContents::Markup(MarkupContent {
                        kind: MarkupKind::Markdown,
                        value: result.contents,
                    }),
                    range: Some(index.to_lsp_range(result.range)),
                }));
            }
        }
        Ok(None)
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let position_params = params.text_document_position_params;
        let Some(entry) = self.document_entry(&position_params.text_document.uri).await else {
            return Ok(None);
        };
        let index = LineIndex::new(entry.text.as_str());
        let position = index.from_lsp_position(position_params.position);
        Ok(self
            .features
            .signature_help(&entry.analysis, entry.text.as_str(), position)
            .map(to_lsp_signature_help))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let Some(entry) = self.document_entry(&uri).await else {
            return Ok(None);
        };
        let index = LineIndex::new(entry.text.as_str());
        let position = index.from_lsp_position(params.text_document_position_params.position);
        Ok(self
            .features
            .goto_definition(&entry.analysis, entry.text.as_str(), position)
            .map(|range| {
                GotoDefinitionResponse::Scalar(Location {
                    uri,
                    range: index.to_lsp_range(range),
                })
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::document_symbols::SpinDocumentSymbol;
    use serde_json::json;
    use spin_analysis::resolve::TokenKind;
    use spin_analysis::symbols::{Modifier, Modifiers};
    use spin_analysis::test_support::sample_source;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;
    use tower_lsp::lsp_types::{
        DidChangeConfigurationParams, DidOpenTextDocumentParams, DocumentSymbolParams,
        GotoDefinitionParams, HoverParams, Position, Range, SemanticTokensParams,
        SignatureHelpParams, SymbolKind, TextDocumentContentChangeEvent, TextDocumentIdentifier,
        TextDocumentItem, TextDocumentPositionParams, VersionedTextDocumentIdentifier,
    };
    use tower_lsp::LanguageServer;

    #[derive(Clone, Default)]
    struct NoopClient {
        messages: Arc<AtomicUsize>,
        refreshes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LspClient for NoopClient {
        async fn show_message(&self, _: MessageType, _: String) {
            self.messages.fetch_add(1, Ordering::SeqCst);
        }

        async fn refresh_semantic_tokens(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn line_range() -> SpinRange {
        SpinRange::on_line(0, 0, 5)
    }

    #[derive(Default)]
    struct MockFeatureProvider {
        semantic_tokens_called: AtomicUsize,
        document_symbols_called: AtomicUsize,
        hover_called: AtomicUsize,
        last_hover_position: StdMutex<Option<SpinPosition>>,
        signature_help_called: AtomicUsize,
        definition_called: AtomicUsize,
        last_dialect: StdMutex<Option<Dialect>>,
    }

    impl FeatureProvider for MockFeatureProvider {
        fn semantic_tokens(&self, analysis: &Analysis) -> Vec<SpinSemanticToken> {
            self.semantic_tokens_called.fetch_add(1, Ordering::SeqCst);
            *self.last_dialect.lock().unwrap() = Some(analysis.dialect());
            vec![SpinSemanticToken {
                kind: TokenKind::Constant,
                modifiers: Modifiers::of(&[Modifier::Readonly]),
                range: line_range(),
            }]
        }

        fn document_symbols(&self, _: &Analysis, _: &str) -> Vec<SpinDocumentSymbol> {
            self.document_symbols_called.fetch_add(1, Ordering::SeqCst);
            vec![SpinDocumentSymbol {
                name: "symbol".into(),
                detail: None,
                kind: SymbolKind::FIELD,
                range: line_range(),
                selection_range: line_range(),
                children: Vec::new(),
            }]
        }

        fn hover(&self, _: &Analysis, _: &str, position: SpinPosition) -> Option<HoverResult> {
            self.hover_called.fetch_add(1, Ordering::SeqCst);
            *self.last_hover_position.lock().unwrap() = Some(position);
            Some(HoverResult {
                range: line_range(),
                contents: "hover".into(),
            })
        }

        fn signature_help(
            &self,
            _: &Analysis,
            _: &str,
            _: SpinPosition,
        ) -> Option<SignatureHelpResult> {
            self.signature_help_called.fetch_add(1, Ordering::SeqCst);
            None
        }

        fn goto_definition(&self, _: &Analysis, _: &str, _: SpinPosition) -> Option<SpinRange> {
            self.definition_called.fetch_add(1, Ordering::SeqCst);
            Some(line_range())
        }
    }

    fn sample_uri() -> Url {
        Url::parse("file:///blinker.spin2").unwrap()
    }

    async fn open(server: &impl LanguageServer, uri: Url, language_id: &str, text: &str) {
        server
            .did_open(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri,
                    language_id: language_id.into(),
                    version: 1,
                    text: text.to_string(),
                },
            })
            .await;
    }

    async fn open_sample_document(server: &impl LanguageServer) {
        open(server, sample_uri(), "spin2", sample_source()).await;
    }

    fn position_params(uri: Url, line: u32, character: u32) -> TextDocumentPositionParams {
        TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri },
            position: Position::new(line, character),
        }
    }

    async fn semantic_data(server: &impl LanguageServer, uri: Url) -> Option<Vec<SemanticToken>> {
        let result = server
            .semantic_tokens_full(SemanticTokensParams {
                text_document: TextDocumentIdentifier { uri },
                work_done_progress_params: Default::default(),
                partial_result_params: Default::default(),
            })
            .await
            .unwrap()?;
        match result {
            SemanticTokensResult::Tokens(tokens) => Some(tokens.data),
            SemanticTokensResult::Partial(partial) => Some(partial.data),
        }
    }

    #[test]
    fn encode_semantic_tokens_uses_deltas_and_bitsets() {
        let text = "CON\n  A = 1, B = 2\n  C = A";
        let tokens = vec![
            SpinSemanticToken {
                kind: TokenKind::Constant,
                modifiers: Modifiers::of(&[Modifier::Declaration, Modifier::Readonly]),
                range: SpinRange::on_line(1, 2, 1),
            },
            SpinSemanticToken {
                kind: TokenKind::Constant,
                modifiers: Modifiers::of(&[Modifier::Declaration, Modifier::Readonly]),
                range: SpinRange::on_line(1, 9, 1),
            },
            SpinSemanticToken {
                kind: TokenKind::Variable,
                modifiers: Modifiers::default(),
                range: SpinRange::on_line(2, 6, 1),
            },
        ];
        let encoded = encode_semantic_tokens(&tokens, text);
        let triples: Vec<(u32, u32, u32)> = encoded
            .iter()
            .map(|token| (token.delta_line, token.delta_start, token.length))
            .collect();
        assert_eq!(triples, vec![(1, 2, 1), (0, 7, 1), (1, 6, 1)]);
        assert_eq!(encoded[0].token_type, kind_index(TokenKind::Constant));
        assert_eq!(encoded[2].token_type, kind_index(TokenKind::Variable));
        assert_eq!(encoded[0].token_modifiers_bitset, 0b11);
        assert_eq!(encoded[2].token_modifiers_bitset, 0);
    }

    #[test]
    fn encode_semantic_tokens_counts_utf16_columns() {
        let text = "{ é } FOO";
        let tokens = vec![SpinSemanticToken {
            kind: TokenKind::Constant,
            modifiers: Modifiers::default(),
            range: SpinRange::on_line(0, "{ é } ".len(), 3),
        }];
        let encoded = encode_semantic_tokens(&tokens, text);
        assert_eq!(encoded[0].delta_start, 6);
        assert_eq!(encoded[0].length, 3);
    }

    #[test]
    fn settings_parse_with_defaults() {
        let parsed = SpinConfiguration::from_settings(&json!({"spin": {"dialect": "spin1"}}))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.dialect, DialectSetting::Spin1);
        assert!(parsed.semantic_highlighting);
        assert!(SpinConfiguration::from_settings(&json!(null)).unwrap().is_none());
        assert!(SpinConfiguration::from_settings(&json!({"spin": {"dialect": "spin3"}})).is_err());
    }

    #[test]
    fn auto_dialect_prefers_language_id_then_extension() {
        let spin1 = Url::parse("file:///old/driver.spin").unwrap();
        assert_eq!(DialectSetting::Auto.resolve(&spin1, ""), Dialect::Spin1);
        assert_eq!(DialectSetting::Auto.resolve(&spin1, "spin2"), Dialect::Spin2);
        let unknown = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(DialectSetting::Auto.resolve(&unknown, "plaintext"), Dialect::Spin2);
        assert_eq!(DialectSetting::Spin1.resolve(&sample_uri(), "spin2"), Dialect::Spin1);
    }

    #[tokio::test]
    async fn semantic_tokens_call_feature_layer() {
        let provider = Arc::new(MockFeatureProvider::default());
        let server = SpinLanguageServer::with_features(NoopClient::default(), provider.clone());
        open_sample_document(&server).await;

        let data = semantic_data(&server, sample_uri()).await.unwrap();
        assert_eq!(provider.semantic_tokens_called.load(Ordering::SeqCst), 1);
        assert_eq!(data.len(), 1);
        assert_eq!(*provider.last_dialect.lock().unwrap(), Some(Dialect::Spin2));
    }

    #[tokio::test]
    async fn semantic_tokens_return_none_when_document_missing() {
        let server =
            SpinLanguageServer::with_features(NoopClient::default(), Arc::new(MockFeatureProvider::default()));
        assert!(semantic_data(&server, sample_uri()).await.is_none());
    }

    #[tokio::test]
    async fn document_symbols_call_feature_layer() {
        let provider = Arc::new(MockFeatureProvider::default());
        let server = SpinLanguageServer::with_features(NoopClient::default(), provider.clone());
        open_sample_document(&server).await;

        let response = server
            .document_symbol(DocumentSymbolParams {
                text_document: TextDocumentIdentifier { uri: sample_uri() },
                work_done_progress_params: Default::default(),
                partial_result_params: Default::default(),
            })
            .await
            .unwrap()
            .unwrap();

        match response {
            DocumentSymbolResponse::Nested(symbols) => assert_eq!(symbols.len(), 1),
            _ => panic!("unexpected symbol response"),
        }
        assert_eq!(provider.document_symbols_called.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hover_uses_feature_provider_position() {
        let provider = Arc::new(MockFeatureProvider::default());
        let server = SpinLanguageServer::with_features(NoopClient::default(), provider.clone());
        open_sample_document(&server).await;

        let hover = server
            .hover(HoverParams {
                text_document_position_params: position_params(sample_uri(), 4, 3),
                work_done_progress_params: Default::default(),
            })
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(hover.contents, HoverContents::Markup(_)));
        assert_eq!(
            hover.range,
            Some(Range::new(Position::new(0, 0), Position::new(0, 2)))
        );
        assert_eq!(provider.hover_called.load(Ordering::SeqCst), 1);
        let stored = provider.last_hover_position.lock().unwrap().unwrap();
        assert_eq!(stored, SpinPosition::new(4, 3));
    }

    #[tokio::test]
    async fn signature_help_and_definition_use_feature_provider() {
        let provider = Arc::new(MockFeatureProvider::default());
        let server = SpinLanguageServer::with_features(NoopClient::default(), provider.clone());
        open_sample_document(&server).await;

        let help = server
            .signature_help(SignatureHelpParams {
                context: None,
                text_document_position_params: position_params(sample_uri(), 30, 14),
                work_done_progress_params: Default::default(),
            })
            .await
            .unwrap();
        assert!(help.is_none());
        assert_eq!(provider.signature_help_called.load(Ordering::SeqCst), 1);

        let definition = server
            .goto_definition(GotoDefinitionParams {
                text_document_position_params: position_params(sample_uri(), 30, 14),
                work_done_progress_params: Default::default(),
                partial_result_params: Default::default(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(provider.definition_called.load(Ordering::SeqCst), 1);
        match definition {
            GotoDefinitionResponse::Scalar(location) => assert_eq!(location.uri, sample_uri()),
            _ => panic!("unexpected definition response"),
        }
    }

    #[tokio::test]
    async fn changes_reanalyze_and_close_forgets() {
        let server = SpinLanguageServer::new_for_tests();
        let uri = sample_uri();
        open(&server, uri.clone(), "spin2", "CON\n  A = 1").await;
        server
            .did_change(DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier {
                    uri: uri.clone(),
                    version: 2,
                },
                content_changes: vec![TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text: "CON\n  A = 1, B = 2".into(),
                }],
            })
            .await;
        assert_eq!(semantic_data(&server, uri.clone()).await.unwrap().len(), 2);

        server
            .did_close(DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
            })
            .await;
        assert!(semantic_data(&server, uri).await.is_none());
    }

    #[tokio::test]
    async fn finished_analyses_release_their_pending_flag() {
        let server = SpinLanguageServer::new_for_tests();
        let uri = sample_uri();
        open(&server, uri.clone(), "spin2", "CON\n  A = 1").await;
        assert!(server.documents.pending.lock().await.is_empty());

        let store = DocumentStore::default();
        let newer = Arc::new(AtomicBool::new(false));
        store.pending.lock().await.insert(uri.clone(), newer.clone());
        store.release(&uri, &Arc::new(AtomicBool::new(false))).await;
        assert!(store.pending.lock().await.contains_key(&uri));
        store.release(&uri, &newer).await;
        assert!(store.pending.lock().await.is_empty());
    }

    #[tokio::test]
    async fn configuration_switches_dialect_and_highlighting() {
        let provider = Arc::new(MockFeatureProvider::default());
        let client = NoopClient::default();
        let server = SpinLanguageServer::with_features(client.clone(), provider.clone());
        open_sample_document(&server).await;

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: json!({"spin": {"dialect": "spin1", "semanticHighlighting": true}}),
            })
            .await;
        assert_eq!(client.refreshes.load(Ordering::SeqCst), 1);
        semantic_data(&server, sample_uri()).await.unwrap();
        assert_eq!(*provider.last_dialect.lock().unwrap(), Some(Dialect::Spin1));

        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: json!({"spin": {"dialect": "spin1", "semanticHighlighting": false}}),
            })
            .await;
        assert!(semantic_data(&server, sample_uri()).await.unwrap().is_empty());
        assert_eq!(provider.semantic_tokens_called.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_settings_are_reported_and_ignored() {
        let client = NoopClient::default();
        let server =
            SpinLanguageServer::with_features(client.clone(), Arc::new(MockFeatureProvider::default()));
        server
            .did_change_configuration(DidChangeConfigurationParams {
                settings: json!({"spin": {"dialect": 2}}),
            })
            .await;
        assert_eq!(client.messages.load(Ordering::SeqCst), 1);
        assert_eq!(client.refreshes.load(Ordering::SeqCst), 0);
        assert_eq!(*server.config.read().await, SpinConfiguration::default());
    }

    #[tokio::test]
    async fn default_provider_answers_from_the_analysis() {
        let server = SpinLanguageServer::new_for_tests();
        open_sample_document(&server).await;
        let line = sample_source()
            .lines()
            .position(|line| line.contains("pintoggle(pin)"))
            .unwrap() as u32;

        let hover = server
            .hover(HoverParams {
                text_document_position_params: position_params(sample_uri(), line, 15),
                work_done_progress_params: Default::default(),
            })
            .await
            .unwrap()
            .unwrap();
        match hover.contents {
            HoverContents::Markup(markup) => assert_eq!(markup.value, "(*Method* parameter) **pin**"),
            _ => panic!("unexpected hover contents"),
        }

        let help = server
            .signature_help(SignatureHelpParams {
                context: None,
                text_document_position_params: position_params(sample_uri(), line, 14),
                work_done_progress_params: Default::default(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(help.signatures[0].label, "PINTOGGLE(PinField)");
        assert_eq!(help.active_parameter, Some(0));
    }

    impl SpinLanguageServer<NoopClient, DefaultFeatureProvider> {
        fn new_for_tests() -> Self {
            Self::with_features(NoopClient::default(), Arc::new(DefaultFeatureProvider::new()))
        }
    }
}
