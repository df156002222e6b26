pub mod analysis_repo;

pub use analysis_repo::AnalysisRepo;
