//! Error handling integration tests
//!
//! Verify that each lifecycle failure surfaces with the right variant and
//! category, and leaves the system consistent.

#[cfg(test)]
mod tests {
    use crate::common::{NodeFactory, RecordingSink};
    use nodewarden::{
        ErrorCategory, ManagerSettings, MemoryNodeStore, NodeManager, NodeStatus, WardenError,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_contention_errors_are_recoverable() {
        let node = NodeFactory::local(1);
        let store = Arc::new(MemoryNodeStore::with_nodes([node.clone()]));
        let manager = NodeManager::new(
            ManagerSettings::default(),
            store,
            Arc::new(RecordingSink::new()),
        );

        let err = manager.stop_node(&node).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Contention);
        assert!(err.is_recoverable());

        manager.start_node(&node).await.unwrap();
        let err = manager.start_node(&node).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Contention);

        manager.stop_all().await;
    }

    #[tokio::test]
    async fn test_occupied_address_reports_address() {
        let occupant = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = occupant.local_addr().unwrap().port();
        let node = NodeFactory::on_port(2, port);
        let store = Arc::new(MemoryNodeStore::with_nodes([node.clone()]));
        let manager = NodeManager::new(
            ManagerSettings::default(),
            store.clone(),
            Arc::new(RecordingSink::new()),
        );

        let err = manager.start_node(&node).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Address 127.0.0.1:{} is already in use", port)
        );
        assert_eq!(store.get(node.id).unwrap().status, NodeStatus::Stopped);
        assert!(!manager.is_running(node.id));
    }

    #[test]
    fn test_validation_errors_are_not_fatal() {
        let err = nodewarden::NodeAddress::parse("999.1.1.1", 80).unwrap_err();
        assert!(matches!(err, WardenError::Validation(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
