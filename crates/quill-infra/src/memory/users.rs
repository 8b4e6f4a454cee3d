use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, UserRepository};

/// In-memory user store. Usernames and emails are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(store: &[User], user: &User) -> Option<RepoError> {
    store
        .iter()
        .filter(|u| u.id != user.id)
        .find(|u| u.email == user.email || u.username == user.username)
        .map(|u| {
            let field = if u.email == user.email { "email" } else { "username" };
            RepoError::Constraint(format!("duplicate user {field}"))
        })
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if let Some(err) = conflict(&store, &user) {
            return Err(err);
        }
        store.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if let Some(err) = conflict(&store, &user) {
            return Err(err);
        }
        let slot = store
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|u| u.id != id);
        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User::new(username.into(), email.into(), "hash".into(), None, None)
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("ada", "ada@example.com")).await.unwrap();

        let found = repo.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_or_username_lookup() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("ada", "ada@example.com")).await.unwrap();

        assert!(
            repo.find_by_email_or_username("other@example.com", "ada")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_by_email_or_username("ada@example.com", "someone")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_duplicates_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("ada", "ada@example.com")).await.unwrap();

        let same_email = repo.create(user("other", "ada@example.com")).await;
        assert!(matches!(same_email, Err(RepoError::Constraint(_))));

        let same_name = repo.create(user("ada", "new@example.com")).await;
        assert!(matches!(same_name, Err(RepoError::Constraint(_))));
    }
}
