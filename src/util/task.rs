use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Keyed background tasks. Spawning under a key that is still running aborts
/// the older task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: &str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key.to_string(), task) {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn abort(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn respawning_a_key_aborts_the_previous_task() {
        let mut tasks = TaskManager::new();
        let (tx, rx) = flume::unbounded::<u8>();

        let slow_tx = tx.clone();
        tasks.spawn(
            "fetch",
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                let _ = slow_tx.send(1);
            }),
        );
        tasks.spawn(
            "fetch",
            tokio::spawn(async move {
                let _ = tx.send(2);
            }),
        );

        assert_eq!(rx.recv_async().await.unwrap(), 2);
        tasks.abort_all();
        assert!(!tasks.is_running("fetch"));
    }

    #[tokio::test]
    async fn abort_only_touches_its_key() {
        let mut tasks = TaskManager::new();
        tasks.spawn("media", tokio::spawn(std::future::pending::<()>()));
        tasks.spawn("submit", tokio::spawn(std::future::pending::<()>()));

        tasks.abort("media");
        tasks.abort("missing");

        assert!(!tasks.is_running("media"));
        assert!(tasks.is_running("submit"));
        tasks.abort_all();
    }
}
