//! PM-Pro Assist
//!
//! Optional text generation for product documents.
//!
//! # Core Concepts
//!
//! - [`TextGenerator`]: backend trait, chosen at construction time
//! - [`OllamaGenerator`]: local inference server client
//! - [`SimulatedGenerator`]: canned response with artificial latency
//! - [`FallbackGenerator`]: primary backend with a fallback on error
//! - [`PrdGenerator`], [`StoryGenerator`], [`AnalysisGenerator`]: document
//!   generators that use templated output when the backend is simulated
//!
//! # Example
//!
//! ```rust,ignore
//! use pmpro_assist::{build_generator, AssistConfig, PrdGenerator, ProductBrief};
//!
//! # async fn example() -> Result<(), pmpro_assist::AssistError> {
//! let generator = build_generator(&AssistConfig::new())?;
//! let prd = PrdGenerator::new(generator)
//!     .generate(&ProductBrief::named("Task Pilot"))
//!     .await?;
//! println!("{}", prd.to_markdown());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod competition;
pub mod config;
pub mod error;
pub mod generator;
pub mod ollama;
pub mod prd;
pub mod stories;

// Re-exports
pub use competition::{AnalysisGenerator, CompetitiveAnalysis, Competitor, Ratings};
pub use config::AssistConfig;
pub use error::AssistError;
pub use generator::{
    build_generator, is_simulated, FallbackGenerator, GenerationOptions, SimulatedGenerator,
    TextGenerator,
};
pub use ollama::OllamaGenerator;
pub use prd::{PrdDocument, PrdGenerator, PrdSection, ProductBrief};
pub use stories::{Persona, Priority, StoryBoard, StoryGenerator, StoryId, StoryStatus, UserStory};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
