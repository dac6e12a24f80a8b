//! Implementation of the AstConverter trait for SLang

use log::{debug, warn};
use slang_api::{AstConverter, SlangResult, Tree, TreeMetaDataProvider};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::ParserConfig;
use crate::errors::{ParseError, Result};
use crate::lexer::tokenize;
use crate::metrics::ParserMetrics;
use crate::parser::Parser;

/// SLang front end implementing the AstConverter trait
pub struct SlangConverter {
    config: ParserConfig,
    metrics: Mutex<ParserMetrics>,
}

impl SlangConverter {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            metrics: Mutex::new(ParserMetrics::default()),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Convert a source into its top-level tree, recording metrics
    pub fn parse_source(&self, source: &str) -> Result<Tree> {
        let start = Instant::now();
        let result = self.convert(source);
        let duration = start.elapsed();

        match &result {
            Ok(tree) => {
                let nodes = tree.descendants().count() + 1;
                debug!("converted {} byte(s) into {} node(s)", source.len(), nodes);
                self.update_metrics(true, duration, nodes);
            }
            Err(error) => {
                warn!("failed to convert source: {}", error);
                self.update_metrics(false, duration, 0);
            }
        }
        result
    }

    fn convert(&self, source: &str) -> Result<Tree> {
        if source.len() > self.config.max_source_size {
            return Err(ParseError::source_too_large(
                self.config.max_source_size,
                source.len(),
            ));
        }

        let lexed = tokenize(source)?;
        let tokens = lexed.tokens();
        let comments = if self.config.collect_comments {
            lexed.comments
        } else {
            Vec::new()
        };
        let provider = TreeMetaDataProvider::new(comments, tokens);
        Parser::new(&lexed.lexemes, &provider).parse_top_level()
    }

    fn lock_metrics(&self) -> MutexGuard<'_, ParserMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_metrics(&self, success: bool, duration: Duration, nodes: usize) {
        let mut metrics = self.lock_metrics();
        metrics.files_attempted += 1;
        if success {
            metrics.files_succeeded += 1;
        } else {
            metrics.files_failed += 1;
        }
        metrics.total_parse_time += duration;
        metrics.total_nodes += nodes;
    }

    pub fn metrics(&self) -> ParserMetrics {
        self.lock_metrics().clone()
    }

    pub fn reset_metrics(&mut self) {
        *self.lock_metrics() = ParserMetrics::default();
    }
}

impl Default for SlangConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstConverter for SlangConverter {
    fn parse(&self, content: &str) -> SlangResult<Tree> {
        Ok(self.parse_source(content)?)
    }

    fn parse_with_file(&self, content: &str, file_name: &str) -> SlangResult<Tree> {
        debug!("parsing {}", file_name);
        self.parse(content)
    }
}
