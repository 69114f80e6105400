//! Node lifecycle integration tests
//!
//! Start, stop and health-check nodes through `NodeManager` with real
//! listeners bound on loopback.

#[cfg(test)]
mod tests {
    use crate::common::{NodeFactory, RecordingSink, free_port};
    use crate::{assert_err, assert_ok};
    use nodewarden::{
        HealthStatus, ManagerSettings, MemoryNodeStore, Node, NodeManager, NodeStatus,
        WardenError,
    };
    use std::sync::Arc;

    fn setup(nodes: &[Node]) -> (NodeManager, Arc<MemoryNodeStore>, RecordingSink) {
        let store = Arc::new(MemoryNodeStore::with_nodes(nodes.iter().cloned()));
        let sink = RecordingSink::new();
        let manager = NodeManager::new(
            ManagerSettings::default(),
            store.clone(),
            Arc::new(sink.clone()),
        );
        (manager, store, sink)
    }

    #[tokio::test]
    async fn test_two_nodes_one_address_end_to_end() {
        let port = free_port();
        let a = NodeFactory::on_port(1, port);
        let b = NodeFactory::on_port(2, port);
        let (manager, store, sink) = setup(&[a.clone(), b.clone()]);

        let started = assert_ok!(manager.start_node(&a).await);
        assert_eq!(started.status, NodeStatus::Running);

        let err = assert_err!(manager.start_node(&b).await);
        assert!(matches!(err, WardenError::AddressInUse { .. }));
        assert_eq!(store.get(b.id).unwrap().status, NodeStatus::Stopped);

        let report = assert_ok!(manager.check_health(&a).await);
        assert_eq!(report.health, HealthStatus::Healthy);

        assert_ok!(manager.stop_node(&a).await);

        let report = assert_ok!(manager.check_health(&a).await);
        assert_eq!(report.health, HealthStatus::Unhealthy);

        assert_eq!(
            sink.statuses_for(1),
            vec![HealthStatus::Healthy, HealthStatus::Unhealthy]
        );
        let stored = store.get(a.id).unwrap();
        assert_eq!(stored.status, NodeStatus::Stopped);
        assert_eq!(stored.health, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_start_stop_start_on_same_address() {
        let node = NodeFactory::local(3);
        let (manager, _store, _sink) = setup(&[node.clone()]);

        assert_ok!(manager.start_node(&node).await);
        assert_ok!(manager.stop_node(&node).await);
        assert_ok!(manager.start_node(&node).await);
        assert!(manager.is_running(node.id));

        assert_eq!(manager.stop_all().await, 1);
    }

    #[tokio::test]
    async fn test_stop_never_started_is_not_running() {
        let node = NodeFactory::local(4);
        let (manager, store, _sink) = setup(&[node.clone()]);

        let err = assert_err!(manager.stop_node(&node).await);
        assert!(matches!(err, WardenError::NotRunning(id) if id == node.id));
        assert_eq!(store.get(node.id).unwrap(), node);
    }

    #[tokio::test]
    async fn test_start_twice_is_already_running() {
        let node = NodeFactory::local(5);
        let (manager, _store, _sink) = setup(&[node.clone()]);

        assert_ok!(manager.start_node(&node).await);
        let err = assert_err!(manager.start_node(&node).await);
        assert!(matches!(err, WardenError::AlreadyRunning(_)));

        manager.stop_all().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_starts_on_one_address_have_one_winner() {
        let port = free_port();
        let nodes: Vec<Node> = (10..16).map(|id| NodeFactory::on_port(id, port)).collect();
        let (manager, _store, _sink) = setup(&nodes);
        let manager = Arc::new(manager);

        let handles: Vec<_> = nodes
            .iter()
            .cloned()
            .map(|node| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.start_node(&node).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(matches!(e, WardenError::AddressInUse { .. }), "{:?}", e),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(manager.supervisor().running_count(), 1);
        manager.stop_all().await;
    }

    #[tokio::test]
    async fn test_listener_serves_banner_and_health() {
        let node = NodeFactory::owned(6, 42, "fra1");
        let (manager, _store, _sink) = setup(&[node.clone()]);
        assert_ok!(manager.start_node(&node).await);

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap();
        let base = format!("http://{}", node.address);

        let response = client
            .get(format!("{}/anything", base))
            .header("connection", "close")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers()["server"], "nodewarden");
        assert_eq!(
            response.text().await.unwrap(),
            format!("Node node-6 is running at {}", node.address)
        );

        let health: serde_json::Value = client
            .get(format!("{}/health", base))
            .header("connection", "close")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["node_id"], 6);
        assert_eq!(health["name"], "node-6");
        assert_eq!(health["status"], "ok");

        drop(client);
        assert_ok!(manager.stop_node(&node).await);
    }

    #[tokio::test]
    async fn test_check_health_of_unknown_node_still_notifies() {
        let node = NodeFactory::local(7);
        let (manager, _store, sink) = setup(&[]);

        let err = assert_err!(manager.check_health(&node).await);
        assert!(matches!(err, WardenError::NotFound(_)));
        assert_eq!(sink.statuses_for(7), vec![HealthStatus::Unhealthy]);
    }

    #[tokio::test]
    async fn test_stop_all_releases_every_address() {
        let nodes: Vec<Node> = (20..23).map(NodeFactory::local).collect();
        let (manager, _store, _sink) = setup(&nodes);
        for node in &nodes {
            assert_ok!(manager.start_node(node).await);
        }

        assert_eq!(manager.stop_all().await, 3);
        assert_eq!(manager.supervisor().running_count(), 0);
        for node in &nodes {
            assert!(std::net::TcpListener::bind(node.address.socket_addr()).is_ok());
        }
    }
}
