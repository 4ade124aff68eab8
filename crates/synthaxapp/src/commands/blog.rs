use super::helpers::{position_by_id, Author};
use super::Outcome;
use crate::error::Result;
use crate::model::{new_id, BlogArticle, Comment};
use crate::store::DataStore;
use chrono::Utc;

pub fn list<S: DataStore>(store: &mut S) -> Result<Vec<BlogArticle>> {
    store.blog_articles()
}

pub fn get<S: DataStore>(store: &mut S, article_id: &str) -> Result<Option<BlogArticle>> {
    Ok(store.blog_articles()?.into_iter().find(|a| a.id == article_id))
}

/// Bump a reaction counter, creating it at one when the name is new.
/// Anyone may react; returns the new count.
pub fn react<S: DataStore>(store: &mut S, article_id: &str, reaction: &str) -> Result<Outcome<u32>> {
    let mut articles = store.blog_articles()?;
    let Some(index) = position_by_id(&articles, article_id, |a| a.id.as_str()) else {
        return Ok(Outcome::fail("Article not found"));
    };

    let count = articles[index]
        .reactions
        .entry(reaction.to_string())
        .or_insert(0);
    *count = count.saturating_add(1);
    let count = *count;
    store.save_blog_articles(&articles)?;
    tracing::info!(article = article_id, reaction, count, "reaction added");

    Ok(Outcome::ok_with(count, "Reaction added"))
}

pub fn add_comment<S: DataStore>(
    store: &mut S,
    article_id: &str,
    content: &str,
) -> Result<Outcome<Comment>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("You must be logged in to comment"));
    };

    let mut articles = store.blog_articles()?;
    let Some(index) = position_by_id(&articles, article_id, |a| a.id.as_str()) else {
        return Ok(Outcome::fail("Article not found"));
    };

    let author = Author::from(&user);
    let comment = Comment {
        id: new_id("comment"),
        author_id: author.id,
        author_name: author.name,
        author_avatar: author.avatar,
        content: content.to_string(),
        created_at: Utc::now(),
    };
    articles[index].comments.push(comment.clone());
    store.save_blog_articles(&articles)?;
    tracing::info!(article = article_id, comment = %comment.id, "comment added");

    Ok(Outcome::ok_with(comment, "Comment added successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_react_existing_counter() {
        let mut store = InMemoryStore::new();
        let outcome = react(&mut store, "article-1", "👍").unwrap();
        assert_eq!(outcome, Outcome::ok_with(43, "Reaction added"));

        let article = get(&mut store, "article-1").unwrap().unwrap();
        assert_eq!(article.reactions["👍"], 43);
        assert_eq!(article.reactions["🔥"], 17);
    }

    #[test]
    fn test_react_new_name_starts_at_one() {
        let mut store = InMemoryStore::new();
        let outcome = react(&mut store, "article-2", "🚀").unwrap();
        assert_eq!(outcome.data, Some(1));
        assert_eq!(get(&mut store, "article-2").unwrap().unwrap().reactions.len(), 2);
    }

    #[test]
    fn test_react_counter_saturates() {
        let mut store = InMemoryStore::new();
        let mut articles = store.blog_articles().unwrap();
        articles[0].reactions.insert("🔥".to_string(), u32::MAX);
        store.save_blog_articles(&articles).unwrap();
        let id = articles[0].id.clone();

        let outcome = react(&mut store, &id, "🔥").unwrap();
        assert_eq!(outcome.data, Some(u32::MAX));
    }

    #[test]
    fn test_react_unknown_article() {
        let mut store = InMemoryStore::new();
        let outcome = react(&mut store, "article-9", "👍").unwrap();
        assert_eq!(outcome, Outcome::fail("Article not found"));
    }

    #[test]
    fn test_comment_requires_sign_in() {
        let mut store = InMemoryStore::new();
        let outcome = add_comment(&mut store, "article-1", "Nice").unwrap();
        assert_eq!(outcome.message(), Some("You must be logged in to comment"));
        assert_eq!(get(&mut store, "article-1").unwrap().unwrap().comments.len(), 1);
    }

    #[test]
    fn test_comment_appended_with_author() {
        let mut fixture = StoreFixture::new().as_mentor();
        let comment = add_comment(&mut fixture.store, "article-2", "Great tips")
            .unwrap()
            .data
            .unwrap();

        assert_eq!(comment.author_name, "Priya Singh");
        let article = get(&mut fixture.store, "article-2").unwrap().unwrap();
        assert_eq!(article.comments.last(), Some(&comment));
    }

    #[test]
    fn test_comment_unknown_article() {
        let mut fixture = StoreFixture::new().as_learner();
        let outcome = add_comment(&mut fixture.store, "nope", "hi").unwrap();
        assert_eq!(outcome.message(), Some("Article not found"));
    }
}
