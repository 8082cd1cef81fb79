//! 图核心模块
//!
//! 定义节点、弧、请求以及校验后的图模型

mod arc;
mod model;
mod node;
mod request;

pub use arc::{ArcId, FlowArc};
pub use model::GraphModel;
pub use node::NodeId;
pub use request::{MaxFlowRequest, RawArc};
