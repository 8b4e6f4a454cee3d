#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use uuid::Uuid;

    use crate::database::entity::post::{self, CategoryIds, Comments, Tags};
    use crate::database::entity::{category, user};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use quill_core::domain::{Category, Comment, PageRequest, Post, PostFilter, PostStatus, User};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository, UserRepository};

    fn post_model(id: Uuid, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            user_id: "user_1".to_owned(),
            user_email: Some("ada@example.com".to_owned()),
            user_name: "Ada".to_owned(),
            title: title.to_owned(),
            content: "Content long enough".to_owned(),
            excerpt: "Content long enough...".to_owned(),
            featured_image: String::new(),
            categories: CategoryIds(vec![]),
            tags: Tags(vec!["rust".to_owned()]),
            status: post::Status::Published,
            comments: Comments(vec![]),
            likes: 0,
            views: 0,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn category_model(name: &str, slug: &str) -> category::Model {
        let now = chrono::Utc::now();
        category::Model {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: None,
            color: Some("#336699".to_owned()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::from(total))])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(post_id, "Test Post")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_find_page_and_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                post_model(Uuid::new_v4(), "Newest post"),
                post_model(Uuid::new_v4(), "Older post"),
            ]])
            .append_query_results([vec![count_row(12)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let filter = PostFilter {
            status: Some(PostStatus::Published),
            search: Some("rust".to_string()),
            ..Default::default()
        };

        let page = repo
            .find_page(&filter, PageRequest::new(Some(2), Some(2)))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "Newest post");

        let total = repo.count(&filter).await.unwrap();
        assert_eq!(total, 12);

        let log = repo.db.into_transaction_log();
        let select = &log[0].statements()[0].sql;
        assert!(select.contains("ORDER BY \"posts\".\"created_at\" DESC"));
        assert!(select.contains("to_tsvector"));
        assert!(select.contains("LIMIT"));
    }

    #[tokio::test]
    async fn test_increment_likes_is_single_update() {
        let post_id = Uuid::new_v4();
        let mut liked = post_model(post_id, "Liked post");
        liked.likes = 1;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![liked]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.increment_likes(post_id).await.unwrap().unwrap();
        assert_eq!(post.likes, 1);

        let log = repo.db.into_transaction_log();
        let update = &log[0].statements()[0].sql;
        assert!(update.starts_with("UPDATE \"posts\""));
        assert!(update.contains("\"likes\" + "));
    }

    #[tokio::test]
    async fn test_increment_views_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = repo.increment_views(Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_push_and_pull_comment() {
        let post_id = Uuid::new_v4();
        let comment = Comment::new("user_2".into(), "Grace".into(), "Great read");
        let comment_id = comment.id;

        let mut with_comment = post_model(post_id, "Commented post");
        with_comment.comments = Comments(vec![comment.clone()]);
        let without_comment = post_model(post_id, "Commented post");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .append_query_results([vec![with_comment], vec![without_comment]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo.push_comment(post_id, comment).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].id, comment_id);

        let post = repo.pull_comment(post_id, comment_id).await.unwrap().unwrap();
        assert!(post.comments.is_empty());

        let log = repo.db.into_transaction_log();
        assert!(log[0].statements()[0].sql.contains("comments || "));
        assert!(log[2].statements()[0].sql.contains("jsonb_array_elements"));
    }

    #[tokio::test]
    async fn test_save_edits_leaves_comments_and_counters_alone() {
        let post_id = Uuid::new_v4();
        let mut stored = post_model(post_id, "Edited title");
        stored.comments = Comments(vec![Comment::new("user_2".into(), "Grace".into(), "hi")]);
        stored.likes = 3;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![stored]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let mut edited: Post = post_model(post_id, "Edited title").into();
        edited.tags = vec!["edited".to_string()];

        let post = repo.save_edits(edited).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.likes, 3);

        let log = repo.db.into_transaction_log();
        let update = &log[0].statements()[0].sql;
        assert!(update.starts_with("UPDATE \"posts\""));
        assert!(update.contains("\"title\" = "));
        assert!(!update.contains("\"comments\""));
        assert!(!update.contains("\"likes\""));
        assert!(!update.contains("\"views\""));
    }

    #[tokio::test]
    async fn test_save_edits_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let ghost: Post = post_model(Uuid::new_v4(), "Ghost post").into();
        assert!(repo.save_edits(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_categories_listed_and_looked_up() {
        let rust = category_model("Rust", "rust");
        let web = category_model("Web Development", "web-development");
        let rust_id = rust.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rust.clone(), web], vec![rust]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let all: Vec<Category> = repo.list_by_name().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].slug, "web-development");

        let found = repo.find_many(&[rust_id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, rust_id);

        // No ids, no query.
        assert!(repo.find_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_user_by_email_or_username() {
        let now = chrono::Utc::now();
        let model = user::Model {
            id: Uuid::new_v4(),
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "$argon2id$hash".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let found: Option<User> = repo
            .find_by_email_or_username("someone@example.com", "ada")
            .await
            .unwrap();

        let user = found.expect("user should be found");
        assert_eq!(user.username, "ada");
        assert_eq!(user.password_hash, "$argon2id$hash");

        let log = repo.db.into_transaction_log();
        assert!(log[0].statements()[0].sql.contains(" OR "));
    }
}
