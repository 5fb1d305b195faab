use std::sync::Arc;
use std::time::Duration;

use singfit_audio::Waveform;
use singfit_catalog::Catalog;
use singfit_index::{SimilarityIndex, l2_normalize};
use singfit_pitch::{EstimatorConfig, PitchTrackEstimator, VocalRange};
use singfit_recommend::{GenderFilter, GenreFilter, RecommendRequest, Recommendation, YearRange};

use crate::error::EngineError;
use crate::extractor::EmbeddingExtractor;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How many singers the similarity search returns (default: 3).
    pub top_k: usize,
    /// Time budget for the joined analyses (default: 10 s).
    pub analysis_timeout: Duration,
    /// Semitone slack for the vocal-range filter (default: 2).
    pub range_tolerance: i32,
    /// Minimum analyzable input duration in seconds (default: 0.5).
    pub min_duration_secs: f32,
    /// Pitch estimator settings.
    pub estimator: EstimatorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let estimator = EstimatorConfig::default();
        Self {
            top_k: 3,
            analysis_timeout: Duration::from_secs(10),
            range_tolerance: 2,
            min_duration_secs: estimator.min_duration_secs,
            estimator,
        }
    }
}

/// Per-request filter options.
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    pub gender: GenderFilter,
    pub genre: GenreFilter,
    pub years: YearRange,
}

/// Joined output of the two parallel analyses.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Unit-normalized voice embedding.
    pub embedding: Vec<f32>,
    /// `None` when pitch estimation failed (degraded mode).
    pub vocal_range: Option<VocalRange>,
}

/// The engine: catalog, index, and extractor assembled once at startup.
pub struct Engine {
    catalog: Arc<Catalog>,
    extractor: Arc<dyn EmbeddingExtractor>,
    index: SimilarityIndex,
    cfg: EngineConfig,
}

impl Engine {
    /// Builds the engine, including the similarity index over all singer
    /// centroids. Fails on an empty or dimensionally inconsistent catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        extractor: Arc<dyn EmbeddingExtractor>,
        cfg: EngineConfig,
    ) -> Result<Self, EngineError> {
        let entries = catalog
            .singers()
            .iter()
            .map(|s| (s.id.clone(), s.embedding.clone()))
            .collect();
        let index = SimilarityIndex::build(catalog.embedding_dim(), entries)?;
        Ok(Self {
            catalog,
            extractor,
            index,
            cfg,
        })
    }

    /// Runs embedding extraction and pitch estimation concurrently over the
    /// same waveform and joins both under one time budget.
    ///
    /// Embedding failure aborts the request. Pitch failure is absorbed: the
    /// reason is logged and the range comes back unavailable.
    pub async fn analyze(&self, waveform: &Waveform) -> Result<Analysis, EngineError> {
        if waveform.duration_secs() < self.cfg.min_duration_secs {
            return Err(EngineError::TooShort);
        }
        tracing::debug!(
            duration_secs = waveform.duration_secs(),
            sample_rate = waveform.sample_rate(),
            "dispatching embedding and pitch analyses"
        );

        let wave = waveform.clone();
        let estimator_cfg = self.cfg.estimator.clone();
        let pitch_task = tokio::task::spawn_blocking(move || {
            PitchTrackEstimator::with_config(estimator_cfg).estimate(&wave)
        });
        let embed_fut = self.extractor.extract(waveform);

        let (embedding, pitch) = tokio::time::timeout(self.cfg.analysis_timeout, async {
            tokio::join!(embed_fut, pitch_task)
        })
        .await
        .map_err(|_| EngineError::Timeout)?;

        let mut embedding = embedding?;
        l2_normalize(&mut embedding);

        let vocal_range = match pitch.map_err(|e| EngineError::Task(e.to_string()))? {
            Ok(analysis) => Some(analysis.range),
            Err(err) => {
                tracing::warn!(error = %err, "pitch estimation failed, continuing without range");
                None
            }
        };

        tracing::debug!(range = ?vocal_range, "analyses joined");
        Ok(Analysis {
            embedding,
            vocal_range,
        })
    }

    /// Full request path: analyze, rank singers, recommend songs.
    pub async fn recommend(
        &self,
        waveform: &Waveform,
        options: &RecommendOptions,
    ) -> Result<Recommendation, EngineError> {
        let analysis = self.analyze(waveform).await?;
        let hits = self.index.search(&analysis.embedding, self.cfg.top_k)?;

        let request = RecommendRequest {
            vocal_range: analysis.vocal_range,
            gender: options.gender,
            genre: options.genre.clone(),
            years: options.years,
            tolerance: self.cfg.range_tolerance,
        };
        let rec = singfit_recommend::recommend(&self.catalog, &hits, &request);
        tracing::info!(
            best_match = rec.best_match.as_ref().map(|b| b.singer_id.as_str()),
            songs = rec.songs.len(),
            degraded = rec.vocal_range.is_none(),
            "recommendation complete"
        );
        Ok(rec)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }
}
