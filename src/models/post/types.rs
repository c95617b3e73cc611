use serde::{Deserialize, Serialize};

use crate::models::scoring::Points;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Post,
    Hangout,
    Announcement,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Post => "post",
            PostType::Hangout => "hangout",
            PostType::Announcement => "announcement",
        }
    }

    pub fn parse(value: &str) -> Option<PostType> {
        match value {
            "post" => Some(PostType::Post),
            "hangout" => Some(PostType::Hangout),
            "announcement" => Some(PostType::Announcement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub family_id: i64,
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub point_value: Points,
    pub base_points: Option<i16>,
    pub members_present: Option<i32>,
    pub bonus_tags: Vec<String>,
    pub activity: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Post {
    pub fn is_hangout(&self) -> bool {
        self.post_type == PostType::Hangout.as_str()
    }
}

/// Scored hangout details as stored on a post.
#[derive(Debug, Clone, PartialEq)]
pub struct HangoutRecord {
    pub activity: String,
    pub base_points: u8,
    pub members_present: u32,
    pub bonus_tags: Vec<String>,
    pub point_value: Points,
}

pub struct NewPost {
    pub author_id: i64,
    pub family_id: i64,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub hangout: Option<HangoutRecord>,
}

impl NewPost {
    pub fn point_value(&self) -> Points {
        self.hangout.as_ref().map(|h| h.point_value).unwrap_or(0.0)
    }
}

/// Replacement values for an edit. `hangout: None` keeps the stored details.
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub hangout: Option<HangoutRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangout_without_details_is_worth_nothing() {
        let new = NewPost {
            author_id: 1,
            family_id: 1,
            post_type: PostType::Hangout,
            title: "Lawns/Steps hangout".to_string(),
            content: String::new(),
            hangout: None,
        };
        assert_eq!(new.point_value(), 0.0);
    }
}
