//! Constrained minimum-cost section selection
//!
//! For every beam the governing moment of a simply supported span under
//! uniform load is compared against the rated capacity of each library
//! section, and the cheapest adequate section is proposed. The search is a
//! single pass over the library; undersized sections are never proposed.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::CatalogSource;
use crate::error::{OptimizerError, OptimizerResult};
use crate::extractor::BeamSource;
use crate::models::{
    BeamRecord, CatalogSection, CostSummary, OptimizationRecord, OptimizationReport, ReportedCost,
};

/// Maximum bending moment of a simply supported beam under uniform load,
/// `w * L^2 / 8`.
pub fn calculate_moment(length: f64, load: f64) -> f64 {
    load * length.powi(2) / 8.0
}

/// Outcome of a section search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Section(&'a CatalogSection),
    /// No library section has enough capacity
    NoFeasibleReplacement,
}

/// Cheapest section with `max_moment >= moment`.
///
/// Among sections of equal cost the first one in library order is returned.
pub fn select_section(moment: f64, catalog: &[CatalogSection]) -> OptimizerResult<Selection<'_>> {
    if catalog.is_empty() {
        return Err(empty_catalog());
    }

    let best = catalog
        .iter()
        .filter(|section| section.max_moment >= moment)
        .fold(None, |best: Option<&CatalogSection>, section| match best {
            Some(current) if current.cost <= section.cost => Some(current),
            _ => Some(section),
        });

    Ok(match best {
        Some(section) => Selection::Section(section),
        None => Selection::NoFeasibleReplacement,
    })
}

/// One record per beam, in input order.
pub fn optimize_beams(
    beams: &[BeamRecord],
    catalog: &[CatalogSection],
) -> OptimizerResult<Vec<OptimizationRecord>> {
    if catalog.is_empty() {
        return Err(empty_catalog());
    }

    beams
        .iter()
        .map(|beam| -> OptimizerResult<OptimizationRecord> {
            let moment = calculate_moment(beam.length, beam.load);
            let record = match select_section(moment, catalog)? {
                Selection::Section(section) => OptimizationRecord {
                    beam_id: beam.identifier.clone(),
                    original_section: beam.original_section.clone(),
                    optimized_section: section.section_id.clone(),
                    cost: ReportedCost::Amount(section.cost),
                },
                Selection::NoFeasibleReplacement => {
                    tracing::debug!(
                        "Beam {}: no section carries M = {:.3}, keeping {}",
                        beam.identifier,
                        moment,
                        beam.original_section
                    );
                    OptimizationRecord {
                        beam_id: beam.identifier.clone(),
                        original_section: beam.original_section.clone(),
                        optimized_section: beam.original_section.clone(),
                        cost: ReportedCost::NoReplacement,
                    }
                }
            };
            Ok(record)
        })
        .collect()
}

/// Compare the cost of the original sections with the optimized ones.
///
/// Costs are per unit length in the library, so each beam contributes
/// `cost * length`. Beams whose original section is not in the library
/// cannot be priced and are left out of both totals.
///
/// A beam counts as replaced only when it moves to a different section that
/// is not dearer than its original one. When the original section is too
/// small for the load, the cheapest adequate section may cost more; such
/// beams are counted as upsized and can drive `savings` below zero.
pub fn summarize(
    beams: &[BeamRecord],
    records: &[OptimizationRecord],
    catalog: &[CatalogSection],
) -> CostSummary {
    let mut summary = CostSummary {
        total_original_cost: 0.0,
        total_optimized_cost: 0.0,
        savings: 0.0,
        savings_percent: 0.0,
        replaced: 0,
        upsized: 0,
        unchanged: 0,
        unpriced: 0,
    };

    for (beam, record) in beams.iter().zip(records) {
        let original_cost = catalog
            .iter()
            .find(|section| section.section_id == beam.original_section)
            .map(|section| section.cost);

        if !record.is_replaced() {
            summary.unchanged += 1;
        } else {
            match (original_cost, record.cost.amount()) {
                (Some(original), Some(selected)) if selected > original => summary.upsized += 1,
                _ => summary.replaced += 1,
            }
        }

        let Some(original_cost) = original_cost else {
            summary.unpriced += 1;
            continue;
        };

        let optimized_cost = record.cost.amount().unwrap_or(original_cost);
        summary.total_original_cost += original_cost * beam.length;
        summary.total_optimized_cost += optimized_cost * beam.length;
    }

    summary.savings = summary.total_original_cost - summary.total_optimized_cost;
    if summary.total_original_cost > 0.0 {
        summary.savings_percent = summary.savings / summary.total_original_cost * 100.0;
    }

    summary
}

fn empty_catalog() -> OptimizerError {
    OptimizerError::Configuration("beam library contains no sections".to_string())
}

/// Runs the extract, select and report pipeline against injected sources
#[derive(Clone)]
pub struct Optimizer {
    beams: Arc<dyn BeamSource>,
    catalog: Arc<dyn CatalogSource>,
}

impl Optimizer {
    pub fn new(beams: Arc<dyn BeamSource>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { beams, catalog }
    }

    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }

    /// Query the model once, load the library once and optimize every beam
    pub fn run(&self) -> OptimizerResult<Vec<OptimizationRecord>> {
        self.execute().map(|(_, _, records)| records)
    }

    /// Like [`Optimizer::run`], with a cost comparison over the whole model
    pub fn run_report(&self) -> OptimizerResult<OptimizationReport> {
        let (beams, catalog, records) = self.execute()?;
        let summary = summarize(&beams, &records, &catalog);
        Ok(OptimizationReport {
            results: records,
            summary,
        })
    }

    fn execute(
        &self,
    ) -> OptimizerResult<(Vec<BeamRecord>, Vec<CatalogSection>, Vec<OptimizationRecord>)> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("optimization", %run_id);
        let _guard = span.enter();

        let beams = self.beams.list_beams();
        tracing::info!("Extracted {} beams", beams.len());

        let catalog = self.catalog.load()?;
        tracing::info!(
            "Loaded {} sections from {}",
            catalog.len(),
            self.catalog.describe()
        );

        let records = optimize_beams(&beams, &catalog)?;
        let replaced = records.iter().filter(|r| r.is_replaced()).count();
        tracing::info!(
            "Optimization finished: {} with a new section, {} unchanged",
            replaced,
            records.len() - replaced
        );

        Ok((beams, catalog, records))
    }
}
