pub mod error;
pub mod message;
pub mod protocol;
pub mod traits;

pub use error::ReviewError;
pub use message::{Conversation, FileInfo, Message, Sender};
pub use protocol::{HealthReport, ReviewRequest, ReviewResponse};
pub use traits::{LlmProvider, LlmRequest, LlmResponse};
