use anyhow::Result;
use chrono::Utc;
use tracing::debug;

use testify_types::models::User;

use crate::Store;

impl Store {
    /// Find a user by id or (case-insensitively) by address, creating a
    /// default profile on first lookup.
    pub fn get_or_create_user(&self, key: &str) -> Result<User> {
        self.with_users(|users| {
            if let Some(user) = users
                .iter()
                .find(|u| u.id == key || u.address.eq_ignore_ascii_case(key))
            {
                return Ok(user.clone());
            }

            let user = default_user(key);
            debug!("Created default profile for {}", key);
            users.push(user.clone());
            Ok(user)
        })
    }

    pub fn user_count(&self) -> Result<usize> {
        self.with_users(|users| Ok(users.len()))
    }
}

fn default_user(key: &str) -> User {
    let tail: String = key
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    User {
        id: key.to_string(),
        address: key.to_string(),
        username: format!("user_{}", tail.to_lowercase()),
        display_name: shorten_address(key),
        bio: String::new(),
        followers: Vec::new(),
        following: Vec::new(),
        created_at: Utc::now(),
    }
}

/// `0x1234...abcd` for anything long enough to shorten.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
