use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, PageRequest, Post, PostFilter};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post store. Insertion order breaks `created_at` ties.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `change` to one post under the write lock.
    async fn modify<F>(&self, id: Uuid, change: F) -> Result<Option<Post>, RepoError>
    where
        F: FnOnce(&mut Post) + Send,
    {
        let mut store = self.store.write().await;
        let Some(post) = store.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        change(post);
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn matches_text(post: &Post, terms: &[String]) -> bool {
    let tags = post.tags.iter().map(String::as_str);
    let mut fields = [post.title.as_str(), post.content.as_str()]
        .into_iter()
        .chain(tags)
        .flat_map(words);

    fields.any(|word| terms.contains(&word))
}

fn matches(post: &Post, filter: &PostFilter, terms: &[String]) -> bool {
    if filter.user_id.as_ref().is_some_and(|u| &post.user_id != u) {
        return false;
    }
    if filter.category.is_some_and(|c| !post.categories.contains(&c)) {
        return false;
    }
    if filter.status.is_some_and(|s| post.status != s) {
        return false;
    }
    if filter.search.is_some() && !terms.is_empty() && !matches_text(post, terms) {
        return false;
    }
    true
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("duplicate post id {}", post.id)));
        }
        store.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|p| p.id != id);
        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let terms = filter.search_terms();
        let store = self.store.read().await;

        let mut found: Vec<&Post> = store
            .iter()
            .rev()
            .filter(|p| matches(p, filter, &terms))
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(found.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let terms = filter.search_terms();
        let store = self.store.read().await;
        Ok(store.iter().filter(|p| matches(p, filter, &terms)).count() as u64)
    }

    async fn save_edits(&self, edited: Post) -> Result<Option<Post>, RepoError> {
        self.modify(edited.id, move |p| p.take_edits(edited)).await
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.modify(id, |p| p.views += 1).await
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.modify(id, |p| p.likes += 1).await
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, RepoError> {
        self.modify(id, move |p| p.comments.push(comment)).await
    }

    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<Option<Post>, RepoError> {
        self.modify(id, |p| p.comments.retain(|c| c.id != comment_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quill_core::domain::{NewPost, PostChanges, PostStatus};

    use super::*;

    fn post(title: &str, content: &str) -> Post {
        Post::new(NewPost {
            user_id: "user_1".into(),
            user_name: "Ada".into(),
            title: title.into(),
            content: content.into(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(post("First post", "Hello there world")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_page_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        for i in 0..15 {
            repo.create(post(&format!("Post number {i}"), "Some body text"))
                .await
                .unwrap();
        }

        let filter = PostFilter::default();
        let first = repo.find_page(&filter, PageRequest::new(Some(1), Some(10))).await.unwrap();
        let second = repo.find_page(&filter, PageRequest::new(Some(2), Some(10))).await.unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 5);
        assert_eq!(first[0].title, "Post number 14");
        assert_eq!(second[4].title, "Post number 0");
        assert_eq!(repo.count(&filter).await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_filters() {
        let repo = InMemoryPostRepository::new();
        let category = Uuid::new_v4();

        let mut tagged = post("Learning Rust", "Ownership and borrowing explained");
        tagged.categories = vec![category];
        tagged.tags = vec!["systems".into()];
        repo.create(tagged).await.unwrap();

        let mut draft = post("Gardening notes", "Tomatoes need sun");
        draft.status = PostStatus::Draft;
        draft.user_id = "user_2".into();
        repo.create(draft).await.unwrap();

        let by_category = PostFilter {
            category: Some(category),
            ..Default::default()
        };
        assert_eq!(repo.count(&by_category).await.unwrap(), 1);

        let drafts = PostFilter {
            status: Some(PostStatus::Draft),
            ..Default::default()
        };
        assert_eq!(repo.count(&drafts).await.unwrap(), 1);

        let by_user = PostFilter {
            user_id: Some("user_2".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&by_user).await.unwrap(), 1);

        let search = PostFilter {
            search: Some("tomatoes SYSTEMS".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&search).await.unwrap(), 2);

        let miss = PostFilter {
            search: Some("kubernetes".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&miss).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let id = repo.create(post("Popular post", "Everyone likes this")).await.unwrap().id;

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_likes(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let post = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.likes, 50);
    }

    #[tokio::test]
    async fn test_comments_push_and_pull() {
        let repo = InMemoryPostRepository::new();
        let id = repo.create(post("Discussed post", "Talk about it")).await.unwrap().id;

        let first = Comment::new("u1".into(), "One".into(), "first");
        let second = Comment::new("u2".into(), "Two".into(), "second");
        let first_id = first.id;

        repo.push_comment(id, first).await.unwrap();
        let post = repo.push_comment(id, second).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[1].content, "second");

        let post = repo.pull_comment(id, first_id).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].content, "second");

        // Pulling an unknown comment leaves the list unchanged.
        let post = repo.pull_comment(id, Uuid::new_v4()).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_owner_edit_keeps_interleaved_comment_and_likes() {
        let repo = InMemoryPostRepository::new();
        let id = repo.create(post("Busy post title", "Lots going on here")).await.unwrap().id;

        let mut edited = repo.find_by_id(id).await.unwrap().unwrap();

        repo.push_comment(id, Comment::new("u2".into(), "Two".into(), "nice"))
            .await
            .unwrap();
        repo.increment_likes(id).await.unwrap();
        repo.increment_views(id).await.unwrap();

        edited.apply(PostChanges {
            title: Some("Edited post title".into()),
            ..Default::default()
        });
        let saved = repo.save_edits(edited).await.unwrap().unwrap();

        assert_eq!(saved.title, "Edited post title");
        assert_eq!(saved.comments.len(), 1);
        assert_eq!(saved.likes, 1);
        assert_eq!(saved.views, 1);
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap(), saved);
    }

    #[tokio::test]
    async fn test_mutations_on_missing_post() {
        let repo = InMemoryPostRepository::new();
        let missing = Uuid::new_v4();

        assert!(repo.increment_views(missing).await.unwrap().is_none());
        assert!(repo.save_edits(post("Ghost post", "Nobody home")).await.unwrap().is_none());
        assert!(matches!(repo.delete(missing).await, Err(RepoError::NotFound)));
        assert!(matches!(
            repo.update(post("Ghost post", "Nobody home")).await,
            Err(RepoError::NotFound)
        ));
    }
}
