use super::helpers::{matches_query, position_by_id, Author};
use super::Outcome;
use crate::error::Result;
use crate::model::{new_id, ForumPost, Reply, Vote};
use crate::store::DataStore;
use chrono::Utc;

pub fn list<S: DataStore>(store: &mut S) -> Result<Vec<ForumPost>> {
    store.forum_posts()
}

pub fn get<S: DataStore>(store: &mut S, post_id: &str) -> Result<Option<ForumPost>> {
    Ok(store.forum_posts()?.into_iter().find(|p| p.id == post_id))
}

/// New posts go to the head of the collection.
pub fn create_post<S: DataStore>(
    store: &mut S,
    title: &str,
    content: &str,
    tags: Vec<String>,
) -> Result<Outcome<ForumPost>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("You must be logged in to create a post"));
    };

    let author = Author::from(&user);
    let now = Utc::now();
    let post = ForumPost {
        id: new_id("post"),
        author_id: author.id,
        author_name: author.name,
        author_avatar: author.avatar,
        title: title.to_string(),
        content: content.to_string(),
        tags,
        upvotes: 0,
        downvotes: 0,
        replies: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let mut posts = store.forum_posts()?;
    posts.insert(0, post.clone());
    store.save_forum_posts(&posts)?;
    tracing::info!(post = %post.id, "forum post created");

    Ok(Outcome::ok_with(post, "Post created successfully"))
}

pub fn add_reply<S: DataStore>(
    store: &mut S,
    post_id: &str,
    content: &str,
) -> Result<Outcome<Reply>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("You must be logged in to reply"));
    };

    let mut posts = store.forum_posts()?;
    let Some(index) = position_by_id(&posts, post_id, |p| p.id.as_str()) else {
        return Ok(Outcome::fail("Post not found"));
    };

    let author = Author::from(&user);
    let now = Utc::now();
    let reply = Reply {
        id: new_id("reply"),
        author_id: author.id,
        author_name: author.name,
        author_avatar: author.avatar,
        content: content.to_string(),
        upvotes: 0,
        created_at: now,
    };

    let post = &mut posts[index];
    post.replies.push(reply.clone());
    post.updated_at = now;
    store.save_forum_posts(&posts)?;
    tracing::info!(post = post_id, reply = %reply.id, "reply added");

    Ok(Outcome::ok_with(reply, "Reply added successfully"))
}

/// One vote moves exactly one counter by one.
pub fn vote<S: DataStore>(store: &mut S, post_id: &str, vote: Vote) -> Result<Outcome<ForumPost>> {
    let mut posts = store.forum_posts()?;
    let Some(index) = position_by_id(&posts, post_id, |p| p.id.as_str()) else {
        return Ok(Outcome::fail("Post not found"));
    };

    let post = &mut posts[index];
    match vote {
        Vote::Up => post.upvotes = post.upvotes.saturating_add(1),
        Vote::Down => post.downvotes = post.downvotes.saturating_add(1),
    }
    let updated = post.clone();
    store.save_forum_posts(&posts)?;
    tracing::info!(post = post_id, vote = %vote, "vote recorded");

    Ok(Outcome::ok_with(updated, "Vote recorded"))
}

/// Title, content or tag containment; an empty query returns everything.
pub fn search<S: DataStore>(store: &mut S, query: &str) -> Result<Vec<ForumPost>> {
    let posts = store.forum_posts()?;
    if query.is_empty() {
        return Ok(posts);
    }
    Ok(posts
        .into_iter()
        .filter(|p| {
            matches_query(
                [p.title.as_str(), p.content.as_str()]
                    .into_iter()
                    .chain(p.tags.iter().map(String::as_str)),
                query,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_create_post_prepends() {
        let mut fixture = StoreFixture::new().as_learner();
        let before = list(&mut fixture.store).unwrap().len();

        let outcome = create_post(
            &mut fixture.store,
            "Borrow checker woes",
            "Why does this not compile?",
            vec!["Rust".to_string()],
        )
        .unwrap();
        let post = outcome.data.unwrap();

        let posts = list(&mut fixture.store).unwrap();
        assert_eq!(posts.len(), before + 1);
        assert_eq!(posts[0].id, post.id);
        assert_eq!(posts[0].author_name, "Sahil Kumar");
        assert_eq!(posts[0].upvotes, 0);
    }

    #[test]
    fn test_create_post_requires_sign_in() {
        let mut store = InMemoryStore::new();
        let outcome = create_post(&mut store, "t", "c", Vec::new()).unwrap();
        assert_eq!(outcome.message(), Some("You must be logged in to create a post"));
        assert_eq!(list(&mut store).unwrap().len(), 3);
    }

    #[test]
    fn test_reply_appends_and_touches_post() {
        let mut fixture = StoreFixture::new().as_mentor();
        let before = get(&mut fixture.store, "post-3").unwrap().unwrap();

        let reply = add_reply(&mut fixture.store, "post-3", "Try grid-template-areas.")
            .unwrap()
            .data
            .unwrap();

        let after = get(&mut fixture.store, "post-3").unwrap().unwrap();
        assert_eq!(after.replies.len(), before.replies.len() + 1);
        assert_eq!(after.replies.last().unwrap().id, reply.id);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn test_reply_to_unknown_post() {
        let mut fixture = StoreFixture::new().as_learner();
        let outcome = add_reply(&mut fixture.store, "post-404", "hi").unwrap();
        assert_eq!(outcome, Outcome::fail("Post not found"));
    }

    #[test]
    fn test_reply_requires_sign_in() {
        let mut store = InMemoryStore::new();
        let outcome = add_reply(&mut store, "post-1", "hi").unwrap();
        assert_eq!(outcome.message(), Some("You must be logged in to reply"));
    }

    #[test]
    fn test_upvote_touches_only_upvotes() {
        let mut store = InMemoryStore::new();
        let before = get(&mut store, "post-1").unwrap().unwrap();

        vote(&mut store, "post-1", Vote::Up).unwrap();

        let after = get(&mut store, "post-1").unwrap().unwrap();
        assert_eq!(after.upvotes, before.upvotes + 1);
        assert_eq!(after.downvotes, before.downvotes);
    }

    #[test]
    fn test_downvote() {
        let mut store = InMemoryStore::new();
        let post = vote(&mut store, "post-2", Vote::Down).unwrap().data.unwrap();
        assert_eq!(post.downvotes, 1);
        assert_eq!(post.upvotes, 18);
    }

    #[test]
    fn test_vote_counter_saturates() {
        let mut store = InMemoryStore::new();
        let mut posts = store.forum_posts().unwrap();
        posts[0].upvotes = u32::MAX;
        store.save_forum_posts(&posts).unwrap();
        let id = posts[0].id.clone();

        let post = vote(&mut store, &id, Vote::Up).unwrap().data.unwrap();
        assert_eq!(post.upvotes, u32::MAX);
    }

    #[test]
    fn test_vote_unknown_post() {
        let mut store = InMemoryStore::new();
        assert!(!vote(&mut store, "nope", Vote::Up).unwrap().success);
    }

    #[test]
    fn test_search_posts() {
        let mut store = InMemoryStore::new();
        let hits = search(&mut store, "python").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "post-2");
        assert_eq!(search(&mut store, "").unwrap().len(), 3);
    }
}
