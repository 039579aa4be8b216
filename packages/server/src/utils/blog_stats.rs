//! Aggregates over an in-memory list of blogs.
//!
//! Every function makes a single left-to-right pass and leaves its input
//! untouched. Author groups are visited in order of first appearance, and a
//! group only replaces the current leader when it is strictly greater, so the
//! first group to reach the maximum wins ties.
//!
//! Like totals saturate at `i64::MAX` instead of overflowing.

use std::collections::HashMap;

use serde::Serialize;

use crate::entity::blog;

/// Read-only view of the fields the aggregates need.
pub trait BlogRecord {
    fn title(&self) -> &str;
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> i64;
}

impl BlogRecord for blog::Model {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct AuthorBlogs {
    pub author: Option<String>,
    pub blogs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: i64,
}

/// All aggregates for one list of blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct BlogStats {
    pub total_likes: i64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    pub fn from_blogs<B: BlogRecord>(blogs: &[B]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

pub fn total_likes<B: BlogRecord>(blogs: &[B]) -> i64 {
    blogs
        .iter()
        .map(BlogRecord::likes)
        .fold(0, i64::saturating_add)
}

/// The most-liked blog. The earliest one wins a tie.
pub fn favorite_blog<B: BlogRecord>(blogs: &[B]) -> Option<FavoriteBlog> {
    let favorite = blogs.iter().reduce(|max, blog| {
        if blog.likes() > max.likes() {
            blog
        } else {
            max
        }
    })?;

    Some(FavoriteBlog {
        title: favorite.title().to_owned(),
        author: favorite.author().map(str::to_owned),
        likes: favorite.likes(),
    })
}

pub fn most_blogs<B: BlogRecord>(blogs: &[B]) -> Option<AuthorBlogs> {
    if blogs.is_empty() {
        return None;
    }

    let (author, blogs) = leader(group_by_author(blogs, |_| 1));
    Some(AuthorBlogs { author, blogs })
}

/// Author with the highest like total across their posts.
///
/// When no author has any likes the result is `{ author: None, likes: 0 }`.
pub fn most_likes<B: BlogRecord>(blogs: &[B]) -> Option<AuthorLikes> {
    if blogs.is_empty() {
        return None;
    }

    let (author, likes) = leader(group_by_author(blogs, BlogRecord::likes));
    Some(AuthorLikes { author, likes })
}

/// Sum `value` per author, keeping groups in first-appearance order.
fn group_by_author<'a, B, F>(blogs: &'a [B], value: F) -> Vec<(Option<&'a str>, i64)>
where
    B: BlogRecord,
    F: Fn(&B) -> i64,
{
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<&str>, i64)> = Vec::new();

    for blog in blogs {
        let author = blog.author();
        match index.get(&author) {
            Some(&i) => groups[i].1 = groups[i].1.saturating_add(value(blog)),
            None => {
                index.insert(author, groups.len());
                groups.push((author, value(blog)));
            }
        }
    }

    groups
}

fn leader(groups: Vec<(Option<&str>, i64)>) -> (Option<String>, i64) {
    let mut author = None;
    let mut max = 0;

    for (name, total) in groups {
        if total > max {
            max = total;
            author = name;
        }
    }

    (author.map(str::to_owned), max)
}
