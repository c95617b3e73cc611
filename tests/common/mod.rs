//! Shared fixtures for the Postgres-backed tests.
//!
//! These tests run against a real database through `#[sqlx::test]`, which
//! creates a fresh database per test from `DATABASE_URL` and applies
//! `migrations/`. They are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/vsa_test cargo test -- --ignored
//! ```

#![allow(dead_code)]

use sqlx::PgPool;

use vsa_points::models::family::{self, Family, NewFamily};
use vsa_points::models::post::{self, HangoutRecord, NewPost, Post, PostType};

pub const FOUNDER_ID: i64 = 100;

/// Create a family founded by `founder_id` plus `extra_members` more members
/// (ids `founder_id * 100 + 1..`). A user belongs to one family only, so each
/// family in a test needs its own founder.
pub async fn family_with_members(pool: &PgPool, name: &str, founder_id: i64, extra_members: i64) -> Family {
    let created = family::create(
        pool,
        &NewFamily { name: name.to_string(), description: String::new() },
        founder_id,
    )
    .await
    .expect("create family");

    for i in 1..=extra_members {
        family::add_member(pool, created.id, founder_id * 100 + i)
            .await
            .expect("add member");
    }

    family::find_by_id(pool, created.id)
        .await
        .expect("query")
        .expect("family exists")
}

pub fn hangout(points: f64) -> HangoutRecord {
    HangoutRecord {
        activity: "Game night (Hex & Co)".to_string(),
        base_points: 5,
        members_present: 4,
        bonus_tags: vec![],
        point_value: points,
    }
}

pub async fn hangout_post(pool: &PgPool, family_id: i64, author_id: i64, points: f64) -> Post {
    post::create(
        pool,
        &NewPost {
            author_id,
            family_id,
            post_type: PostType::Hangout,
            title: "Game night".to_string(),
            content: "Board games at Hex & Co".to_string(),
            hangout: Some(hangout(points)),
        },
    )
    .await
    .expect("create hangout post")
}

pub async fn totals(pool: &PgPool, family_id: i64) -> (f64, f64) {
    let f = family::find_by_id(pool, family_id)
        .await
        .expect("query")
        .expect("family exists");
    (f.total_points, f.semester_points)
}
