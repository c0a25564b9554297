pub mod gemini;
pub mod mcp;

pub use mcp::{CallToolResult, ContentItem, RpcError, RpcRequest, RpcResponse, Tool};
