//! Rule sets for every validated endpoint.

use std::sync::LazyLock;

use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::{
    COMMENT_MAX, COMMENT_MIN, CONTENT_MIN, PostStatus, TITLE_MAX, TITLE_MIN,
};
use quill_core::validation::{FieldRules, HEX_COLOR, RuleSet, USERNAME};
use quill_shared::dto::{
    CreateCategoryRequest, CreateCommentRequest, CreatePostRequest, ListPostsQuery, LoginRequest,
    RegisterUserRequest, UpdateCategoryRequest, UpdatePostRequest,
};

use crate::middleware::{Empty, Schema};

const TITLE_LENGTH: &str = "Title must be between 5 and 200 characters";
const CONTENT_LENGTH: &str = "Content must be at least 10 characters";
const NAME_LENGTH: &str = "Name must be between 2 and 50 characters";
const HEX_COLOR_MESSAGE: &str = "Color must be a valid hex color";
const INVALID_STATUS: &str = "Invalid status";
const INVALID_POST_ID: &str = "Invalid post ID";

/// `:id` path segment, already checked to be a UUID.
#[derive(Debug, Deserialize)]
pub struct PostPath {
    pub id: Uuid,
}

/// `:id` path segment as sent; unparsable ids resolve to "not found".
#[derive(Debug, Deserialize)]
pub struct RawPath {
    pub id: String,
}

static POST_CREATE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::body("title")
            .trim()
            .not_empty("Title is required")
            .length(TITLE_MIN, Some(TITLE_MAX), TITLE_LENGTH),
        FieldRules::body("content")
            .trim()
            .not_empty("Content is required")
            .length(CONTENT_MIN, None, CONTENT_LENGTH),
        FieldRules::body("categories")
            .optional()
            .is_array("Categories must be an array"),
        FieldRules::body("tags")
            .optional()
            .is_array("Tags must be an array"),
        FieldRules::body("status")
            .optional()
            .one_of(PostStatus::NAMES, INVALID_STATUS),
    ])
});

static POST_UPDATE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::param("id").uuid(INVALID_POST_ID),
        FieldRules::body("title")
            .optional()
            .trim()
            .length(TITLE_MIN, Some(TITLE_MAX), TITLE_LENGTH),
        FieldRules::body("content")
            .optional()
            .trim()
            .length(CONTENT_MIN, None, CONTENT_LENGTH),
        FieldRules::body("categories")
            .optional()
            .is_array("Categories must be an array"),
        FieldRules::body("tags")
            .optional()
            .is_array("Tags must be an array"),
        FieldRules::body("status")
            .optional()
            .one_of(PostStatus::NAMES, INVALID_STATUS),
    ])
});

static POST_LIST: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::query("category")
            .optional()
            .uuid("Invalid category ID"),
        FieldRules::query("status")
            .optional()
            .one_of(PostStatus::NAMES, INVALID_STATUS),
    ])
});

static COMMENT_CREATE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::param("id").uuid(INVALID_POST_ID),
        FieldRules::body("content")
            .trim()
            .not_empty("Comment content is required")
            .length(
                COMMENT_MIN,
                Some(COMMENT_MAX),
                "Comment must be between 1 and 500 characters",
            ),
    ])
});

static CATEGORY_CREATE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::body("name")
            .trim()
            .not_empty("Category name is required")
            .length(2, Some(50), NAME_LENGTH),
        FieldRules::body("description").optional().trim(),
        FieldRules::body("color")
            .optional()
            .matches(&HEX_COLOR, HEX_COLOR_MESSAGE),
    ])
});

static CATEGORY_UPDATE: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::body("name")
            .optional()
            .trim()
            .length(2, Some(50), NAME_LENGTH),
        FieldRules::body("description").optional().trim(),
        FieldRules::body("color")
            .optional()
            .matches(&HEX_COLOR, HEX_COLOR_MESSAGE),
    ])
});

static AUTH_REGISTER: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::body("username")
            .trim()
            .not_empty("Username is required")
            .length(3, Some(30), "Username must be between 3 and 30 characters")
            .matches(
                &USERNAME,
                "Username can only contain letters, numbers, and underscores",
            ),
        FieldRules::body("email")
            .trim()
            .not_empty("Email is required")
            .email("Must be a valid email address"),
        FieldRules::body("password")
            .not_empty("Password is required")
            .length(6, None, "Password must be at least 6 characters"),
    ])
});

static AUTH_LOGIN: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new([
        FieldRules::body("email")
            .trim()
            .not_empty("Email is required")
            .email("Must be a valid email address"),
        FieldRules::body("password").not_empty("Password is required"),
    ])
});

macro_rules! schema {
    ($name:ident, $rules:ident, params = $params:ty, query = $query:ty, body = $body:ty) => {
        pub struct $name;

        impl Schema for $name {
            type Params = $params;
            type Query = $query;
            type Body = $body;

            fn rules() -> &'static RuleSet {
                &$rules
            }
        }
    };
}

schema!(PostCreate, POST_CREATE, params = Empty, query = Empty, body = CreatePostRequest);
schema!(PostUpdate, POST_UPDATE, params = PostPath, query = Empty, body = UpdatePostRequest);
schema!(PostList, POST_LIST, params = Empty, query = ListPostsQuery, body = Empty);
schema!(CommentCreate, COMMENT_CREATE, params = PostPath, query = Empty, body = CreateCommentRequest);
schema!(CategoryCreate, CATEGORY_CREATE, params = Empty, query = Empty, body = CreateCategoryRequest);
schema!(CategoryUpdate, CATEGORY_UPDATE, params = RawPath, query = Empty, body = UpdateCategoryRequest);
schema!(AuthRegister, AUTH_REGISTER, params = Empty, query = Empty, body = RegisterUserRequest);
schema!(AuthLogin, AUTH_LOGIN, params = Empty, query = Empty, body = LoginRequest);
