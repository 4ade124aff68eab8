use crate::model::User;

/// Case-insensitive containment over any number of text fields.
pub fn matches_query<'a, I>(fields: I, query: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = query.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Position of the record whose id matches.
pub fn position_by_id<T, F>(records: &[T], id: &str, id_of: F) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    records.iter().position(|r| id_of(r) == id)
}

/// Author fields copied onto posts, replies and comments.
#[derive(Debug, Clone)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query_ignores_case() {
        assert!(matches_query(["CSS Grid vs Flexbox"], "flexbox"));
        assert!(matches_query(["a", "Python"], "PYTH"));
        assert!(!matches_query(["a", "b"], "c"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches_query(["anything"], ""));
    }

    #[test]
    fn test_position_by_id() {
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(position_by_id(&ids, "b", |s| s.as_str()), Some(1));
        assert_eq!(position_by_id(&ids, "z", |s| s.as_str()), None);
    }
}
