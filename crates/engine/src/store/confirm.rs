use super::Store;
use rewards_admin_core::{Error, Result};
use rewards_admin_networking::{Resource, ResourceApi};
use tracing::info;

/// State of a delete confirmation prompt.
///
/// Closes only when the delete succeeds. A rejected delete keeps the prompt
/// open with the server's message so the user can retry or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    target: Option<String>,
    error: Option<String>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: impl Into<String>) {
        self.target = Some(id.into());
        self.error = None;
    }

    pub fn cancel(&mut self) {
        self.target = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn confirm<R, A>(&mut self, store: &mut Store<R>, api: &A) -> Result<()>
    where
        R: Resource,
        A: ResourceApi<R> + ?Sized,
    {
        let id = match &self.target {
            Some(id) => id.clone(),
            None => return Err(Error::InvalidData("Nothing selected for deletion".into())),
        };

        match store.delete(api, &id).await {
            Ok(()) => {
                info!("Confirmed delete of {} {}", R::LABEL, id);
                self.cancel();
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::FakeApi;
    use rewards_admin_core::{Task, TaskType};

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: String::new(),
            task_type: TaskType::Daily,
            target_count: 1,
            coin_reward: 5,
            xp_reward: 0,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_rejected_delete_keeps_prompt_open() {
        let api = FakeApi::new(vec![task("t1"), task("t2")], |t, id| t.id = id);
        let mut store: Store<Task> = Store::new();
        store.refresh(&api).await.unwrap();

        let mut prompt = DeleteConfirmation::new();
        prompt.open("t1");
        api.fail_with(409, "Task t1 is referenced by an active challenge");

        assert!(prompt.confirm(&mut store, &api).await.is_err());
        assert!(prompt.is_open());
        assert_eq!(prompt.target(), Some("t1"));
        assert_eq!(
            prompt.error(),
            Some("Task t1 is referenced by an active challenge")
        );
        assert_eq!(store.items().len(), 2);

        api.recover();
        prompt.confirm(&mut store, &api).await.unwrap();
        assert!(!prompt.is_open());
        assert!(prompt.error().is_none());
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_without_target() {
        let api = FakeApi::new(vec![task("t1")], |t, id| t.id = id);
        let mut store = Store::with_items(vec![task("t1")]);
        let mut prompt = DeleteConfirmation::new();
        assert!(prompt.confirm(&mut store, &api).await.is_err());
        assert_eq!(api.calls(), 0);
    }
}
