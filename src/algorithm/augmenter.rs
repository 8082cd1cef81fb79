//! 流量增广

use super::path_finder::AugmentingPath;
use super::residual::ResidualNetwork;
use crate::error::{Error, Result};

/// 路径瓶颈：路径上残量的最小值
pub fn bottleneck(network: &ResidualNetwork, path: &AugmentingPath) -> Result<u64> {
    let amount = path
        .edges()
        .iter()
        .map(|&e| network.edge_residual(e))
        .min()
        .ok_or_else(|| Error::InvariantViolation("增广路径为空".into()))?;

    if amount == 0 {
        return Err(Error::InvariantViolation(
            "增广路径包含残量为零的边".into(),
        ));
    }
    Ok(amount)
}

/// 沿路径推送瓶颈流量，返回推送量
pub fn push_flow(network: &mut ResidualNetwork, path: &AugmentingPath) -> Result<u64> {
    let amount = bottleneck(network, path)?;
    network.augment(path.edges(), amount)?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::path_finder::AugmentingPathFinder;
    use crate::graph::{ArcId, GraphModel, MaxFlowRequest};

    #[test]
    fn test_push_bottleneck() {
        let req = MaxFlowRequest::new(["S", "A", "T"], "S", "T")
            .with_arc("S", "A", 3)
            .with_arc("A", "T", 2);
        let graph = GraphModel::build(&req).unwrap();
        let mut net = ResidualNetwork::from_graph(&graph);
        let mut finder = AugmentingPathFinder::new(net.node_count());

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        assert_eq!(bottleneck(&net, &path).unwrap(), 2);
        assert_eq!(push_flow(&mut net, &path).unwrap(), 2);

        assert_eq!(net.arc(ArcId::new(0)).unwrap().flow(), 2);
        assert_eq!(net.arc(ArcId::new(1)).unwrap().flow(), 2);
        assert!(finder.find(&net, graph.source(), graph.sink()).is_none());
    }

    #[test]
    fn test_stale_path_is_invariant_violation() {
        let req = MaxFlowRequest::new(["S", "T"], "S", "T").with_arc("S", "T", 1);
        let graph = GraphModel::build(&req).unwrap();
        let mut net = ResidualNetwork::from_graph(&graph);
        let mut finder = AugmentingPathFinder::new(net.node_count());

        let path = finder.find(&net, graph.source(), graph.sink()).unwrap();
        push_flow(&mut net, &path).unwrap();

        // 同一路径已被耗尽，再推送说明调用方有缺陷
        assert!(matches!(
            push_flow(&mut net, &path),
            Err(Error::InvariantViolation(_))
        ));
    }
}
