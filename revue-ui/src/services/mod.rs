//! Core services: loading, cleaning, scoring, aggregation

pub mod aggregation;
pub mod annotation_pipeline;
pub mod review_loader;
pub mod score_client;
pub mod text_normalizer;

pub use aggregation::{
    filter_by, group_mean, histogram, score_counts, HistogramBin, ProductFilter, ScoreColumn,
};
pub use annotation_pipeline::AnnotationPipeline;
pub use review_loader::{load_reviews, LoadError};
pub use score_client::{OpenAiScoreClient, ScoreClient, ScoreClientError};
pub use text_normalizer::{clean_table, normalize};
