//! Background monitor integration tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{NodeFactory, RecordingSink};
    use crate::wait_until;
    use nodewarden::{
        HealthStatus, ManagerSettings, MemoryNodeStore, MonitorSettings, NodeManager, NodeStatus,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const INTERVAL: Duration = Duration::from_millis(150);

    fn settings() -> ManagerSettings {
        ManagerSettings {
            monitor: MonitorSettings {
                interval: INTERVAL,
                max_concurrent_checks: 8,
            },
            probe_timeout: Duration::from_millis(500),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_monitor_reports_up_and_down_nodes() {
        let up = NodeFactory::local(10);
        let mut down = NodeFactory::local(11);
        down.status = NodeStatus::Running;
        let idle = NodeFactory::local(12);

        let store = Arc::new(MemoryNodeStore::with_nodes([
            up.clone(),
            down.clone(),
            idle.clone(),
        ]));
        let sink = RecordingSink::new();
        let manager = NodeManager::new(settings(), store.clone(), Arc::new(sink.clone()));
        assert_ok!(manager.start_node(&up).await);

        let monitor = manager.spawn_monitor(CancellationToken::new());

        let reported = wait_until!(Duration::from_secs(5), sink.statuses_for(11).len() >= 2);
        assert!(reported, "monitor should keep evaluating after a failed probe");
        assert!(monitor.is_running());

        assert_eq!(sink.statuses_for(10)[0], HealthStatus::Healthy);
        assert!(sink.statuses_for(11).iter().all(|s| *s == HealthStatus::Unhealthy));
        assert!(sink.statuses_for(12).is_empty());

        assert_eq!(store.get(up.id).unwrap().health, HealthStatus::Healthy);
        assert_eq!(store.get(down.id).unwrap().health, HealthStatus::Unhealthy);

        monitor.shutdown().await;
        manager.stop_all().await;
    }

    #[tokio::test]
    async fn test_stopped_node_leaves_the_monitor_cycle() {
        let node = NodeFactory::local(13);
        let store = Arc::new(MemoryNodeStore::with_nodes([node.clone()]));
        let sink = RecordingSink::new();
        let manager = NodeManager::new(settings(), store, Arc::new(sink.clone()));
        assert_ok!(manager.start_node(&node).await);

        let monitor = manager.spawn_monitor(CancellationToken::new());
        assert!(wait_until!(Duration::from_secs(5), !sink.statuses_for(13).is_empty()));

        assert_ok!(manager.stop_node(&node).await);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let seen = sink.statuses_for(13).len();

        tokio::time::sleep(INTERVAL * 3).await;
        assert_eq!(sink.statuses_for(13).len(), seen);

        monitor.shutdown().await;
    }

    #[tokio::test]
    async fn test_cancelled_monitor_goes_quiet() {
        let mut node = NodeFactory::local(14);
        node.status = NodeStatus::Running;
        let store = Arc::new(MemoryNodeStore::with_nodes([node]));
        let sink = RecordingSink::new();
        let manager = NodeManager::new(settings(), store, Arc::new(sink.clone()));

        let cancel = CancellationToken::new();
        let monitor = manager.spawn_monitor(cancel.clone());
        assert!(wait_until!(Duration::from_secs(5), sink.len() >= 1));

        cancel.cancel();
        let stopped = tokio::time::timeout(INTERVAL * 2, monitor.shutdown()).await;
        assert!(stopped.is_ok(), "monitor should exit within one interval");

        tokio::time::sleep(Duration::from_millis(50)).await;
        let seen = sink.len();
        tokio::time::sleep(INTERVAL * 3).await;
        assert_eq!(sink.len(), seen);
    }
}
