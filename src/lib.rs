pub mod edge_pipeline;
pub mod logger;
