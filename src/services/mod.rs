pub mod language_model;
pub mod model_registry;

pub use language_model::TriageService;
pub use model_registry::ModelRegistryService;
