//! Chat-completion transport
//!
//! One request per agent round: the whole conversation plus the tool schema
//! goes out, the next assistant turn comes back. No retries at this layer.

mod transport;
mod http;
mod mock;

pub use transport::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatTransport, TransportError,
    TransportResult,
};
pub use http::HttpChatTransport;
pub use mock::{MockChatTransport, MockReply, RecordedRequest};
