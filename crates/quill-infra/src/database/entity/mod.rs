//! SeaORM entities. Posts keep their categories, tags and comments as JSONB
//! documents so a post is read and written as one row.

pub mod category;
pub mod post;
pub mod user;
