pub mod browserless;
pub mod error;
pub mod pacing;
pub mod parse;
pub mod pipeline;
pub mod source;

pub use browserless::BrowserlessPageSource;
pub use error::PageError;
pub use pacing::{CancelToken, Pacing};
pub use pipeline::{PostStage, ProfileOutcome, ProfilePipeline};
pub use source::{PageSource, PostRef};
