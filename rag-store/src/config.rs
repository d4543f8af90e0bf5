//! Runtime and collection configuration.

use crate::chunking::ChunkingConfig;
use crate::errors::RagError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
    /// Manhattan distance (L1).
    Manhattan,
}

impl std::str::FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(DistanceKind::Cosine),
            "dot" => Ok(DistanceKind::Dot),
            "euclid" | "euclidean" => Ok(DistanceKind::Euclid),
            "manhattan" => Ok(DistanceKind::Manhattan),
            other => Err(RagError::Config(format!("unknown QDRANT_DISTANCE `{other}`"))),
        }
    }
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for indexing and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Qdrant API key. Required.
    pub qdrant_api_key: String,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Expected embedding width; `None` takes it from the first vector.
    pub embedding_dim: Option<usize>,
    /// Points per Qdrant upsert request (typical range: 128..512).
    pub upsert_batch: usize,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    /// Chunk window for project indexing.
    pub chunking: ChunkingConfig,
}

impl RagConfig {
    /// Reads the config from process environment.
    ///
    /// `QDRANT_URL` and `QDRANT_API_KEY` are required; everything else has a default.
    ///
    /// # Errors
    /// [`RagError::ConfigMissing`] for an absent required variable,
    /// [`RagError::Config`] for an unparsable or inconsistent value.
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`RagConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, RagError> {
        let value = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |k: &'static str| value(k).ok_or(RagError::ConfigMissing(k));

        let qdrant_url = required("QDRANT_URL")?;
        let qdrant_api_key = required("QDRANT_API_KEY")?;

        let defaults = ChunkingConfig::default();
        let cfg = Self {
            qdrant_url,
            qdrant_api_key,
            collection: value("QDRANT_COLLECTION").unwrap_or_else(|| "documents".into()),
            distance: match value("QDRANT_DISTANCE") {
                Some(d) => d.parse()?,
                None => DistanceKind::Cosine,
            },
            embedding_dim: parse_opt(value("EMBEDDING_DIM"), "EMBEDDING_DIM")?,
            upsert_batch: parse_opt(value("QDRANT_UPSERT_BATCH"), "QDRANT_UPSERT_BATCH")?.unwrap_or(256),
            exact_search: parse_opt(value("QDRANT_EXACT"), "QDRANT_EXACT")?.unwrap_or(false),
            chunking: ChunkingConfig {
                chunk_size: parse_opt(value("CHUNK_SIZE"), "CHUNK_SIZE")?.unwrap_or(defaults.chunk_size),
                overlap: parse_opt(value("CHUNK_OVERLAP"), "CHUNK_OVERLAP")?.unwrap_or(defaults.overlap),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::ConfigMissing("QDRANT_URL"));
        }
        if self.qdrant_api_key.trim().is_empty() {
            return Err(RagError::ConfigMissing("QDRANT_API_KEY"));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(RagError::Config("upsert_batch must be > 0".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(RagError::Config("embedding_dim must be > 0".into()));
        }
        self.chunking.validate()
    }
}

fn parse_opt<T: std::str::FromStr>(raw: Option<String>, var: &str) -> Result<Option<T>, RagError> {
    raw.map(|v| {
        v.parse::<T>()
            .map_err(|_| RagError::Config(format!("invalid value for {var}: `{v}`")))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn url_and_key_are_required() {
        let err = RagConfig::from_lookup(lookup(&[("QDRANT_API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, RagError::ConfigMissing("QDRANT_URL")));

        let err = RagConfig::from_lookup(lookup(&[("QDRANT_URL", "http://q:6334"), ("QDRANT_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, RagError::ConfigMissing("QDRANT_API_KEY")));
    }

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let cfg = RagConfig::from_lookup(lookup(&[("QDRANT_URL", "http://q:6334"), ("QDRANT_API_KEY", "k")])).unwrap();

        assert_eq!(cfg.collection, "documents");
        assert_eq!(cfg.distance, DistanceKind::Cosine);
        assert_eq!(cfg.embedding_dim, None);
        assert_eq!(cfg.chunking, ChunkingConfig::default());
    }

    #[test]
    fn overlap_must_stay_below_chunk_size() {
        let err = RagConfig::from_lookup(lookup(&[
            ("QDRANT_URL", "http://q:6334"),
            ("QDRANT_API_KEY", "k"),
            ("CHUNK_SIZE", "900"),
            ("CHUNK_OVERLAP", "900"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let err = RagConfig::from_lookup(lookup(&[
            ("QDRANT_URL", "http://q:6334"),
            ("QDRANT_API_KEY", "k"),
            ("QDRANT_UPSERT_BATCH", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }
}
