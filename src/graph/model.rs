//! 图模型
//!
//! 请求在边界处校验一次，得到节点稠密编号后的强类型图

use super::arc::{ArcId, FlowArc};
use super::node::NodeId;
use super::request::MaxFlowRequest;
use crate::error::ValidationError;
use indexmap::IndexSet;
use serde_json::Value;

/// 经过校验的有向带容量图
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// 节点名称，下标即 NodeId
    nodes: IndexSet<String>,
    /// 弧，下标即 ArcId
    arcs: Vec<FlowArc>,
    source: NodeId,
    sink: NodeId,
}

impl GraphModel {
    /// 校验请求并构造图模型
    pub fn build(request: &MaxFlowRequest) -> Result<Self, ValidationError> {
        let mut nodes = IndexSet::with_capacity(request.nodes.len());
        for (i, name) in request.nodes.iter().enumerate() {
            if name.is_empty() {
                return Err(ValidationError::EmptyNodeName(i));
            }
            if !nodes.insert(name.clone()) {
                return Err(ValidationError::DuplicateNode(name.clone()));
            }
        }

        let source = resolve_terminal(&nodes, request.source.as_deref(), "源")?;
        let sink = resolve_terminal(&nodes, request.sink.as_deref(), "汇")?;
        if source == sink {
            return Err(ValidationError::SourceEqualsSink(
                nodes[source.index()].clone(),
            ));
        }

        let mut arcs = Vec::with_capacity(request.edges.len());
        let mut source_out: u64 = 0;
        for (i, raw) in request.edges.iter().enumerate() {
            let src = resolve_endpoint(&nodes, i, &raw.source)?;
            let dst = resolve_endpoint(&nodes, i, &raw.target)?;
            let capacity = parse_capacity(i, &raw.capacity)?;

            // 总流量不超过源点出边容量之和，这里保证累加不会溢出
            if src == source && dst != source {
                source_out = source_out
                    .checked_add(capacity)
                    .ok_or_else(|| ValidationError::CapacityOverflow(nodes[source.index()].clone()))?;
            }

            arcs.push(FlowArc::new(ArcId::new(i), src, dst, capacity));
        }

        Ok(Self {
            nodes,
            arcs,
            source,
            sink,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arcs(&self) -> &[FlowArc] {
        &self.arcs
    }

    pub fn arc(&self, id: ArcId) -> Option<&FlowArc> {
        self.arcs.get(id.index())
    }

    /// 节点名称
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get_index(id.index()).map(String::as_str)
    }

    /// 按名称查找节点
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name).map(NodeId::new)
    }

    /// 按声明顺序遍历节点名称
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }
}

fn resolve_terminal(
    nodes: &IndexSet<String>,
    name: Option<&str>,
    role: &'static str,
) -> Result<NodeId, ValidationError> {
    let name = name.ok_or(ValidationError::MissingTerminal(role))?;
    nodes
        .get_index_of(name)
        .map(NodeId::new)
        .ok_or_else(|| ValidationError::UnknownTerminal {
            role,
            name: name.to_string(),
        })
}

fn resolve_endpoint(
    nodes: &IndexSet<String>,
    index: usize,
    name: &str,
) -> Result<NodeId, ValidationError> {
    nodes
        .get_index_of(name)
        .map(NodeId::new)
        .ok_or_else(|| ValidationError::UnknownArcEndpoint {
            index,
            name: name.to_string(),
        })
}

/// `u64::MAX as f64` 会向上取整到 2^64，上界必须用严格小于
const U64_UPPER_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// 解析容量：接受非负整数（包括 `3.0` 这样的整值浮点），拒绝负数、小数、越界值和非数字
fn parse_capacity(index: usize, value: &Value) -> Result<u64, ValidationError> {
    let non_integer = || ValidationError::NonIntegerCapacity {
        index,
        value: value.to_string(),
    };
    let negative = || ValidationError::NegativeCapacity {
        index,
        value: value.to_string(),
    };

    let Value::Number(n) = value else {
        return Err(non_integer());
    };

    if let Some(c) = n.as_u64() {
        return Ok(c);
    }
    if n.as_i64().is_some() {
        // as_u64 失败而 as_i64 成功，只能是负整数
        return Err(negative());
    }

    match n.as_f64() {
        Some(f) if f < 0.0 => Err(negative()),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f < U64_UPPER_BOUND => Ok(f as u64),
        Some(f) if f.is_finite() && f.fract() == 0.0 => Err(ValidationError::CapacityOutOfRange {
            index,
            value: value.to_string(),
        }),
        _ => Err(non_integer()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_request() -> MaxFlowRequest {
        MaxFlowRequest::new(["S", "A", "T"], "S", "T")
            .with_arc("S", "A", 3)
            .with_arc("A", "T", 2)
    }

    #[test]
    fn test_build_dense_indices() {
        let graph = GraphModel::build(&simple_request()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.arc_count(), 2);
        assert_eq!(graph.source(), NodeId::new(0));
        assert_eq!(graph.sink(), NodeId::new(2));
        assert_eq!(graph.node_id("A"), Some(NodeId::new(1)));
        assert_eq!(graph.node_name(NodeId::new(2)), Some("T"));
        assert_eq!(graph.node_names().collect::<Vec<_>>(), vec!["S", "A", "T"]);

        let arc = graph.arc(ArcId::new(1)).unwrap();
        assert_eq!(arc.src(), NodeId::new(1));
        assert_eq!(arc.dst(), NodeId::new(2));
        assert_eq!(arc.capacity(), 2);
    }

    #[test]
    fn test_source_equals_sink() {
        let req = MaxFlowRequest::new(["A", "B"], "A", "A");
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::SourceEqualsSink("A".into())
        );
    }

    #[test]
    fn test_unknown_terminal() {
        let req = MaxFlowRequest::new(["A", "B"], "A", "Z");
        assert!(matches!(
            GraphModel::build(&req),
            Err(ValidationError::UnknownTerminal { role: "汇", .. })
        ));

        let mut req = MaxFlowRequest::new(["A", "B"], "A", "B");
        req.source = None;
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::MissingTerminal("源")
        );
    }

    #[test]
    fn test_unknown_arc_endpoint() {
        let req = MaxFlowRequest::new(["A", "B"], "A", "B")
            .with_arc("A", "B", 1)
            .with_arc("A", "C", 1);
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::UnknownArcEndpoint {
                index: 1,
                name: "C".into()
            }
        );
    }

    #[test]
    fn test_duplicate_and_empty_nodes() {
        let req = MaxFlowRequest::new(["A", "B", "A"], "A", "B");
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::DuplicateNode("A".into())
        );

        let req = MaxFlowRequest::new(["A", ""], "A", "B");
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::EmptyNodeName(1)
        );
    }

    #[test]
    fn test_capacity_parsing() {
        let with_cap = |cap: Value| MaxFlowRequest::new(["A", "B"], "A", "B").with_arc("A", "B", cap);

        assert!(matches!(
            GraphModel::build(&with_cap(Value::from(-1))),
            Err(ValidationError::NegativeCapacity { index: 0, .. })
        ));
        assert!(matches!(
            GraphModel::build(&with_cap(Value::from(-2.5))),
            Err(ValidationError::NegativeCapacity { .. })
        ));
        assert!(matches!(
            GraphModel::build(&with_cap(Value::from(1.5))),
            Err(ValidationError::NonIntegerCapacity { .. })
        ));
        assert!(matches!(
            GraphModel::build(&with_cap(Value::from("3"))),
            Err(ValidationError::NonIntegerCapacity { .. })
        ));
        assert!(matches!(
            GraphModel::build(&with_cap(Value::Null)),
            Err(ValidationError::NonIntegerCapacity { .. })
        ));

        let graph = GraphModel::build(&with_cap(Value::from(4.0))).unwrap();
        assert_eq!(graph.arcs()[0].capacity(), 4);

        // 2^64 解析为浮点后不能被截断成 u64::MAX
        let too_large: Value = serde_json::from_str("18446744073709551616").unwrap();
        assert!(matches!(
            GraphModel::build(&with_cap(too_large)),
            Err(ValidationError::CapacityOutOfRange { index: 0, .. })
        ));
        let largest_float: Value = serde_json::from_str("18446744073709549568.0").unwrap();
        assert_eq!(
            GraphModel::build(&with_cap(largest_float)).unwrap().arcs()[0].capacity(),
            18_446_744_073_709_549_568
        );

        // 零容量是合法的空操作弧
        let graph = GraphModel::build(&with_cap(Value::from(0))).unwrap();
        assert_eq!(graph.arcs()[0].capacity(), 0);
    }

    #[test]
    fn test_capacity_overflow() {
        let req = MaxFlowRequest::new(["A", "B"], "A", "B")
            .with_arc("A", "B", u64::MAX)
            .with_arc("A", "B", 1);
        assert_eq!(
            GraphModel::build(&req).unwrap_err(),
            ValidationError::CapacityOverflow("A".into())
        );
    }

    #[test]
    fn test_parallel_arcs_kept() {
        let req = MaxFlowRequest::new(["S", "T"], "S", "T")
            .with_arc("S", "T", 2)
            .with_arc("S", "T", 3);
        let graph = GraphModel::build(&req).unwrap();
        assert_eq!(graph.arc_count(), 2);
        assert_eq!(graph.arcs()[0].capacity(), 2);
        assert_eq!(graph.arcs()[1].capacity(), 3);
    }
}
