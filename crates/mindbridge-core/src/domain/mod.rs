//! Domain types.
//!
//! Every value here lives for a single request/response cycle and is never
//! mutated after construction.

mod chat;
mod completion;
mod generation;
mod model_id;

pub use chat::{ChatMessage, FunctionCall, FunctionDefinition, Role, ToolCall, ToolDefinition, ToolKind};
pub use completion::{ChatCompletion, CompletionChoice, FinishReason, Usage};
pub use generation::{GenerationParams, GenerationRequest, ReasoningEffort};
pub use model_id::{MODEL_NAMESPACE, MODEL_PREFIX, ModelRef};
