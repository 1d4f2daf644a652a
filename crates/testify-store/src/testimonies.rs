use anyhow::Result;
use chrono::Utc;
use rand::Rng;

use testify_types::models::{Category, Comment, Testimony};

use crate::Store;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Validated input for a new testimony.
#[derive(Debug, Clone)]
pub struct NewTestimony {
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeToggle {
    /// true when the address was added, false when it was removed
    pub liked: bool,
    pub likes: usize,
    pub author: String,
}

impl Store {
    pub fn create_testimony(&self, new: NewTestimony) -> Result<Testimony> {
        self.with_testimonies(|records| {
            let mut id = generate_id();
            while records.iter().any(|t| t.id == id) {
                id = generate_id();
            }

            let testimony = Testimony {
                id,
                author: new.author,
                title: new.title,
                content: new.content,
                category: new.category,
                tags: new.tags,
                likes: Vec::new(),
                comments: Vec::new(),
                created_at: Utc::now(),
            };
            records.push(testimony.clone());
            Ok(testimony)
        })
    }

    /// All testimonies, newest first. Records created in the same instant
    /// keep reverse insertion order.
    pub fn list_testimonies(&self) -> Result<Vec<Testimony>> {
        self.with_testimonies(|records| {
            let mut out: Vec<Testimony> = records.iter().rev().cloned().collect();
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(out)
        })
    }

    pub fn get_testimony(&self, id: &str) -> Result<Option<Testimony>> {
        self.with_testimonies(|records| Ok(records.iter().find(|t| t.id == id).cloned()))
    }

    pub fn testimony_count(&self) -> Result<usize> {
        self.with_testimonies(|records| Ok(records.len()))
    }

    /// Toggle `address` in the like list: removes it if present, adds it if
    /// not. Returns `None` when no testimony has this id.
    pub fn toggle_like(&self, id: &str, address: &str) -> Result<Option<LikeToggle>> {
        self.with_testimonies(|records| {
            let Some(testimony) = records.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };

            let existing = testimony
                .likes
                .iter()
                .position(|a| a.eq_ignore_ascii_case(address));

            let liked = match existing {
                Some(index) => {
                    testimony.likes.remove(index);
                    false
                }
                None => {
                    testimony.likes.push(address.to_string());
                    true
                }
            };

            Ok(Some(LikeToggle {
                liked,
                likes: testimony.likes.len(),
                author: testimony.author.clone(),
            }))
        })
    }

    /// Append a comment. Returns `None` when no testimony has this id.
    pub fn add_comment(&self, id: &str, author: &str, content: &str) -> Result<Option<Comment>> {
        self.with_testimonies(|records| {
            let Some(testimony) = records.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };

            let mut comment_id = generate_id();
            while testimony.comments.iter().any(|c| c.id == comment_id) {
                comment_id = generate_id();
            }

            let comment = Comment {
                id: comment_id,
                author: author.to_string(),
                content: content.to_string(),
                created_at: Utc::now(),
            };
            testimony.comments.push(comment.clone());
            Ok(Some(comment))
        })
    }
}

/// `<unix-millis>-<random base36 suffix>`
fn generate_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str) -> NewTestimony {
        NewTestimony {
            author: "0xabc".into(),
            title: title.into(),
            content: "C".into(),
            category: Category::Healing,
            tags: vec!["grace".into()],
        }
    }

    #[test]
    fn create_starts_with_no_likes() {
        let store = Store::new();
        let t = store.create_testimony(sample("T")).unwrap();
        assert!(t.likes.is_empty());
        assert!(t.comments.is_empty());
        assert_eq!(t.category, Category::Healing);
        assert_eq!(store.testimony_count().unwrap(), 1);

        let (millis, suffix) = t.id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
    }

    #[test]
    fn ids_are_unique() {
        let store = Store::new();
        let ids: std::collections::HashSet<String> = (0..200)
            .map(|i| store.create_testimony(sample(&i.to_string())).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn list_is_newest_first() {
        let store = Store::new();
        store.create_testimony(sample("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        store.create_testimony(sample("second")).unwrap();
        store.create_testimony(sample("third")).unwrap();

        let titles: Vec<String> = store
            .list_testimonies()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[test]
    fn toggle_like_twice_restores_state() {
        let store = Store::new();
        let t = store.create_testimony(sample("T")).unwrap();

        let first = store.toggle_like(&t.id, "0xfan").unwrap().unwrap();
        assert!(first.liked);
        assert_eq!(first.likes, 1);
        assert_eq!(first.author, "0xabc");

        let second = store.toggle_like(&t.id, "0xFAN").unwrap().unwrap();
        assert!(!second.liked);
        assert_eq!(second.likes, 0);

        let stored = store.get_testimony(&t.id).unwrap().unwrap();
        assert!(stored.likes.is_empty());
    }

    #[test]
    fn likes_never_duplicate() {
        let store = Store::new();
        let t = store.create_testimony(sample("T")).unwrap();
        store.toggle_like(&t.id, "0x1").unwrap();
        store.toggle_like(&t.id, "0x2").unwrap();
        store.toggle_like(&t.id, "0x1").unwrap();
        store.toggle_like(&t.id, "0x1").unwrap();

        let stored = store.get_testimony(&t.id).unwrap().unwrap();
        assert_eq!(stored.likes, vec!["0x2".to_string(), "0x1".to_string()]);
    }

    #[test]
    fn toggle_unknown_id_is_none() {
        let store = Store::new();
        assert!(store.toggle_like("missing", "0x1").unwrap().is_none());
        assert!(store.add_comment("missing", "0x1", "hi").unwrap().is_none());
    }

    #[test]
    fn comments_are_appended() {
        let store = Store::new();
        let t = store.create_testimony(sample("T")).unwrap();
        let c = store.add_comment(&t.id, "0xfan", "Amen").unwrap().unwrap();
        assert_eq!(c.content, "Amen");

        let stored = store.get_testimony(&t.id).unwrap().unwrap();
        assert_eq!(stored.comments, vec![c]);
    }
}
