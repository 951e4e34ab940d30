use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::places::{
    transform, FacetPolicy, PlacesSearch, QueryGenerator, Rejection, TransformContext, Venue,
    VenueCandidate,
};
use crate::storage::ArtifactWriter;

#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    /// Pause between consecutive search calls.
    pub delay: Duration,
    pub max_queries: Option<usize>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub queries_issued: usize,
    pub queries_failed: usize,
    pub candidates_seen: usize,
    pub duplicates_skipped: usize,
    pub rejected: HashMap<Rejection, usize>,
    pub venues_emitted: usize,
}

impl RunStats {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Emitted,
    Duplicate,
    Rejected(Rejection),
}

/// State owned by one ingestion run: the seen-id set, the buffered venues
/// and the tally.
#[derive(Debug, Default)]
pub struct RunContext {
    seen: HashSet<String>,
    venues: Vec<Venue>,
    stats: RunStats,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dedups by id, then validates and transforms. An id is marked seen
    /// before validation, so a rejected place is not reconsidered later
    /// in the run.
    pub fn offer(
        &mut self,
        candidate: Option<&VenueCandidate>,
        neighborhood: &str,
        ctx: &TransformContext,
        facets: &mut dyn FacetPolicy,
    ) -> Offer {
        self.stats.candidates_seen += 1;

        if let Some(c) = candidate {
            if !self.seen.insert(c.id.clone()) {
                self.stats.duplicates_skipped += 1;
                return Offer::Duplicate;
            }
        }

        match transform(candidate, neighborhood, ctx, facets) {
            Ok(venue) => {
                self.venues.push(venue);
                self.stats.venues_emitted += 1;
                Offer::Emitted
            }
            Err(reason) => {
                *self.stats.rejected.entry(reason).or_insert(0) += 1;
                Offer::Rejected(reason)
            }
        }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub venues: Vec<Venue>,
    /// `None` on dry runs.
    pub output_path: Option<PathBuf>,
}

pub struct IngestionService<S, F> {
    search: S,
    facets: F,
    queries: QueryGenerator,
    transform_ctx: TransformContext,
    writer: ArtifactWriter,
    settings: RunSettings,
}

impl<S, F> IngestionService<S, F>
where
    S: PlacesSearch,
    F: FacetPolicy,
{
    pub fn new(
        search: S,
        facets: F,
        queries: QueryGenerator,
        transform_ctx: TransformContext,
        writer: ArtifactWriter,
        settings: RunSettings,
    ) -> Self {
        Self {
            search,
            facets,
            queries,
            transform_ctx,
            writer,
            settings,
        }
    }

    /// Sweeps every query in order, one call at a time, and writes the
    /// artifact once at the end. Nothing is persisted before that.
    pub async fn run(&mut self) -> anyhow::Result<RunReport> {
        let mut ctx = RunContext::new();
        let total = self
            .settings
            .max_queries
            .map_or(self.queries.len(), |max| max.min(self.queries.len()));

        info!(total, "Starting venue ingestion");

        for (idx, query) in self.queries.iter().take(total).enumerate() {
            if idx > 0 && !self.settings.delay.is_zero() {
                sleep(self.settings.delay).await;
            }

            info!(
                progress = idx + 1,
                total,
                query = %query.text,
                "Searching places"
            );

            ctx.stats.queries_issued += 1;
            let candidates = match self.search.search(&query.text).await {
                Ok(v) => v,
                Err(e) => {
                    error!(query = %query.text, error = %e, "Places search failed");
                    ctx.stats.queries_failed += 1;
                    Vec::new()
                }
            };

            let before = ctx.stats.venues_emitted;
            for candidate in &candidates {
                let outcome = ctx.offer(
                    candidate.as_ref(),
                    &query.neighborhood,
                    &self.transform_ctx,
                    &mut self.facets,
                );
                if let (Offer::Emitted, Some(c)) = (outcome, candidate) {
                    debug!(id = %c.id, neighborhood = %query.neighborhood, "Accepted venue");
                }
            }

            info!(
                results = candidates.len(),
                added = ctx.stats.venues_emitted - before,
                total_venues = ctx.stats.venues_emitted,
                "Query processed"
            );
        }

        let stats = ctx.stats.clone();
        info!(
            queries = stats.queries_issued,
            failed_queries = stats.queries_failed,
            candidates = stats.candidates_seen,
            duplicates = stats.duplicates_skipped,
            rejected = stats.rejected_total(),
            venues = stats.venues_emitted,
            "Ingestion sweep finished"
        );

        if stats.venues_emitted == 0 {
            warn!("No venues collected");
        }

        let output_path = if self.settings.dry_run {
            info!("Dry run, skipping artifact write");
            None
        } else {
            let bytes = self.writer.write(&ctx.venues).await?;
            info!(
                path = %self.writer.path().display(),
                bytes,
                venues = ctx.venues.len(),
                "Wrote venue artifact"
            );
            Some(self.writer.path().to_path_buf())
        };

        Ok(RunReport {
            stats,
            venues: ctx.venues,
            output_path,
        })
    }
}
