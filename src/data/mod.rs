pub mod demo_tracks;
pub mod recommendations;

pub use demo_tracks::{demo_tracks, is_demo_track};
pub use recommendations::{
    filter_candidates, PipelineSettings, RecommendationBatch, RecommendationPipeline, SeedSource,
};
