//! Batch orchestration: one row at a time through search, inference,
//! parsing and reconciliation.

use std::sync::Arc;
use tracing::{info, warn};

use super::infer::InferenceClient;
use super::parse::parse_answer;
use super::query::build_query;
use super::reconcile::reconcile;
use super::retrieve::EvidenceRetriever;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::traits::model::LanguageModel;
use crate::traits::searcher::WebSearcher;
use crate::types::evidence::EvidenceResult;
use crate::types::exclusion::ExclusionList;
use crate::types::log::BatchLog;
use crate::types::outcome::{BatchOutcome, Progress, RowRecord, RowResult};
use crate::types::reference::BrandReference;
use crate::types::table::{columns, InputRow, Table};

/// Runs the enrichment pipeline over a whole table.
///
/// Rows are processed strictly in order; a failing row is recorded and
/// the batch moves on.
pub struct BatchOrchestrator {
    retriever: EvidenceRetriever,
    inference: InferenceClient,
    output_summary_chars: usize,
}

impl BatchOrchestrator {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        model: Arc<dyn LanguageModel>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            retriever: EvidenceRetriever::new(searcher, config),
            inference: InferenceClient::new(model, config),
            output_summary_chars: config.output_summary_chars,
        }
    }

    /// Enrich every row of `table`.
    ///
    /// Fails before touching any row when a required column is missing.
    /// `on_progress` is called after each row.
    pub async fn run<F>(
        &self,
        table: &Table,
        reference: &BrandReference,
        exclusions: &ExclusionList,
        mut on_progress: F,
    ) -> Result<BatchOutcome>
    where
        F: FnMut(Progress),
    {
        if let Err(err) = table.require_columns(&columns::REQUIRED) {
            warn!(error = %err, "input table rejected");
            return Err(err.into());
        }

        let total = table.len();
        let mut records = Vec::with_capacity(total);
        let mut errors = Vec::new();
        let mut log = BatchLog::new();

        info!(rows = total, exclusions = exclusions.len(), reference = reference.len(), "batch started");
        log.push(format!("batch started: {total} rows"));

        for (index, row) in table.rows().iter().enumerate() {
            let number = index + 1;
            let record = self.process_row(number, row, reference, exclusions, &mut log).await;

            if record.is_failed() {
                errors.push(row.clone());
            }
            records.push(record);

            on_progress(Progress {
                completed: number,
                total,
            });
        }

        let outcome = BatchOutcome {
            headers: table.headers().to_vec(),
            records,
            errors,
            log,
        };

        info!(
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            "batch finished"
        );
        Ok(outcome)
    }

    async fn process_row(
        &self,
        number: usize,
        row: &InputRow,
        reference: &BrandReference,
        exclusions: &ExclusionList,
        log: &mut BatchLog,
    ) -> RowRecord {
        let query = build_query(row);
        log.push(format!("row {number} start: {query}"));

        let evidence = self.retriever.retrieve(&query, exclusions).await;
        if evidence.is_error() {
            let reason = evidence.summary.clone();
            warn!(row = number, query = %query, reason = %reason, "row failed at retrieval");
            log.push(format!("row {number} failed: {reason}"));
            let summary = evidence.summary_truncated(self.output_summary_chars).to_string();
            return RowRecord {
                row: row.clone(),
                result: RowResult {
                    query,
                    evidence: EvidenceResult::new(summary, Vec::new()),
                    ..Default::default()
                },
                failure: Some(reason),
            };
        }

        let product_name = match row.product_name().trim() {
            "" => query.as_str(),
            name => name,
        };
        let answer = self.inference.infer(&evidence.summary, product_name).await;
        let summary = evidence.summary_truncated(self.output_summary_chars).to_string();
        let evidence = EvidenceResult::new(summary, evidence.source_links);

        let answer = match answer {
            Ok(answer) => answer,
            Err(err) => {
                let reason = format!("inference failed: {err}");
                warn!(row = number, query = %query, error = %err, "row failed at inference");
                log.push(format!("row {number} failed: {reason}"));
                return RowRecord {
                    row: row.clone(),
                    result: RowResult {
                        query,
                        evidence,
                        ..Default::default()
                    },
                    failure: Some(reason),
                };
            }
        };

        let fields = parse_answer(&answer);
        let status = reconcile(&fields.brand, &fields.manufacturer, reference);
        let entry = if fields.brand_missing() {
            None
        } else {
            reference.get(&fields.brand).cloned()
        };

        info!(
            row = number,
            brand = %fields.brand,
            manufacturer = %fields.manufacturer,
            status = %status,
            "row enriched"
        );
        log.push(format!(
            "row {number} ok: brand={} manufacturer={} status={}",
            fields.brand, fields.manufacturer, status
        ));

        RowRecord {
            row: row.clone(),
            result: RowResult {
                query,
                fields,
                evidence,
                status: Some(status),
                reference: entry,
            },
            failure: None,
        }
    }
}
