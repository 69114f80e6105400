//! Configuration-driven startup tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{RecordingSink, free_port};
    use nodewarden::{Config, MemoryNodeStore, NodeId, NodeManager, NodeStatus, NodeStore};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_seeded_nodes_autostart() {
        let (port_a, port_b) = (free_port(), free_port());
        let yaml = format!(
            r#"
lifecycle:
  shutdown_timeout_secs: 2
monitor:
  enabled: false
nodes:
  - id: 1
    name: "edge-a"
    ip: "127.0.0.1"
    port: {port_a}
    autostart: true
  - id: 2
    name: "edge-b"
    ip: "127.0.0.1"
    port: {port_b}
"#
        );
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert!(!config.monitor().enabled);

        let store = Arc::new(MemoryNodeStore::with_nodes(assert_ok!(config.seed_nodes())));
        let manager = NodeManager::new(
            config.manager_settings(),
            store.clone(),
            Arc::new(RecordingSink::new()),
        );
        assert_eq!(
            manager.supervisor().settings().shutdown_timeout,
            std::time::Duration::from_secs(2)
        );

        for seed in config.nodes().iter().filter(|s| s.autostart) {
            let node = store.find_by_id(NodeId(seed.id)).await.unwrap().unwrap();
            assert_ok!(manager.start_node(&node).await);
        }

        let running = assert_ok!(store.find_by_status(NodeStatus::Running).await);
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].name, "edge-a");
        assert!(!manager.is_running(NodeId(2)));

        manager.stop_all().await;
    }

    #[tokio::test]
    async fn test_duplicate_seed_ids_fail_to_load() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
nodes:
  - { id: 1, name: "a", ip: "127.0.0.1", port: 9001 }
  - { id: 1, name: "b", ip: "127.0.0.1", port: 9002 }
"#,
        )
        .unwrap();

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Duplicate node id: 1"));
    }
}
