//! Session output: player feedback and outbound messages.

mod feedback;
mod message;
mod sinks;

pub use feedback::{Feedback, FeedbackSink};
pub use message::OutboundMessage;
pub use sinks::{CollectingFeedback, TracingFeedback};
