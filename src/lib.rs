//! Logo Spark: turn a short business description into logo concepts.
//!
//! ```no_run
//! use logospark::{LogoStyle, OpenAiConfig, SynthesisClient};
//!
//! # async fn run() -> logospark::Result<()> {
//! let spark = SynthesisClient::new(&OpenAiConfig::from_env())?.into_spark();
//! let submission = spark
//!     .submit("coffee shop", LogoStyle::Minimalist, "brown and beige")
//!     .await;
//! for concept in submission.concepts() {
//!     println!("{} -> {}", concept.caption, concept.image_reference);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod presenter;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod synthesis;

pub use config::{Config, OpenAiConfig};
pub use error::{LogoError, Result};
pub use generator::ConceptGenerator;
pub use models::*;
pub use presenter::{save_downloads, ResultPresenter};
pub use prompt::build_logo_prompt;
pub use session::{FlowState, LogoSpark, Submission, SubmissionOutcome};
pub use synthesis::{HttpImageFetcher, ImageFetcher, ImageService, OpenAiImageClient, SynthesisClient};
