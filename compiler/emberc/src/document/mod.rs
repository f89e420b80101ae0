//! Editable source document.

use std::rc::Rc;

use ember_diagnostic::{Diagnostic, TrackedReport};
use ember_ir::ast::{innermost_at, NodeRef, Program};
use ember_ir::{Position, Token};
use ember_lexer::{EditError, TokenStream};
use ember_parse::{parse, MemoStats, MemoTable};
use tracing::debug;

use crate::DocumentConfig;

/// Error for source text the document cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("source is {0} bytes, more than a u32 offset can address")]
    TooLarge(usize),
}

/// Result of the latest parse, kept until the next edit.
struct Parsed {
    program: Rc<Program>,
    diagnostics: Vec<Diagnostic>,
    stats: MemoStats,
}

/// One source file under edit.
pub struct Document {
    config: DocumentConfig,
    stream: TokenStream,
    memo: MemoTable,
    parsed: Option<Parsed>,
}

impl Document {
    /// An empty document.
    pub fn new(config: DocumentConfig) -> Self {
        Document {
            config,
            stream: TokenStream::new(String::new()),
            memo: MemoTable::new(),
            parsed: None,
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Replace the whole text. Nothing from the previous text is reused.
    pub fn load_source(&mut self, text: impl Into<String>) -> Result<(), LoadError> {
        let text = text.into();
        check_size(text.len())?;
        debug!(len = text.len(), "loading source");
        self.stream = TokenStream::new(text);
        self.memo.clear();
        self.parsed = None;
        Ok(())
    }

    /// Replace `removed_len` bytes at `byte_pos` with `inserted`.
    ///
    /// Tokens outside the edited region are kept, and so are the memo
    /// entries keyed by them; the next [`parse`](Self::parse) decides which
    /// of those entries still hold.
    pub fn edit_source(
        &mut self,
        byte_pos: usize,
        removed_len: usize,
        inserted: &str,
    ) -> Result<(), EditError> {
        let mutation = self.stream.edit(byte_pos, removed_len, inserted)?;
        let forgotten = self.memo.forget(&mutation.removed);
        debug!(
            byte_pos,
            removed_len,
            inserted = inserted.len(),
            forgotten,
            "source edited"
        );
        self.parsed = None;
        Ok(())
    }

    /// The tree for the current text. Parses at most once per edit.
    pub fn parse(&mut self) -> Rc<Program> {
        Rc::clone(&self.parsed().program)
    }

    /// Lexical and syntax diagnostics for the current text, ordered by
    /// start offset and limited by the configuration. At equal offsets
    /// lexical diagnostics come first.
    pub fn diagnostics(&mut self) -> &[Diagnostic] {
        &self.parsed().diagnostics
    }

    /// Memo counters of the latest parse.
    pub fn stats(&mut self) -> MemoStats {
        self.parsed().stats
    }

    /// Innermost node at `pos`.
    pub fn node_at(&mut self, pos: Position) -> Option<NodeRef<'_>> {
        innermost_at(&self.parsed().program, pos)
    }

    pub fn source(&self) -> &str {
        self.stream.source()
    }

    /// Tokens read so far; after a parse, every token of the text.
    pub fn tokens(&self) -> &[Rc<Token>] {
        self.stream.tokens()
    }

    fn parsed(&mut self) -> &Parsed {
        let Document {
            config,
            stream,
            memo,
            parsed,
        } = self;
        parsed.get_or_insert_with(|| run(config, stream, memo))
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new(DocumentConfig::default())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("config", &self.config)
            .field("stream", &self.stream)
            .field("memo", &self.memo)
            .field("parsed", &self.parsed.is_some())
            .finish()
    }
}

fn run(config: &DocumentConfig, stream: &mut TokenStream, memo: &mut MemoTable) -> Parsed {
    let output = parse(stream, memo);
    let mut diagnostics = stream.diagnostics();
    diagnostics.extend(output.reports.iter().map(TrackedReport::to_diagnostic));
    config.diagnostics().finish(&mut diagnostics);
    Parsed {
        program: output.program,
        diagnostics,
        stats: output.stats,
    }
}

fn check_size(len: usize) -> Result<(), LoadError> {
    if u32::try_from(len).is_err() {
        return Err(LoadError::TooLarge(len));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
