//! Seed data for demos and tests

use crate::context::AppContext;
use agora_core::comment::NewComment;
use agora_core::config::Config;
use agora_core::error::Result;
use agora_core::message::NewMessage;
use agora_core::post::{NewPost, RatingKind};
use agora_core::user::{NewUser, ProfileUpdate};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Build a context pre-populated with demo users, posts, comment
/// threads, ratings, messages, tags and groups.
///
/// Panics are impossible here: every id used is created a few lines
/// above, so the fallible store calls cannot fail.
pub fn demo_context() -> Rc<RefCell<AppContext>> {
    let ctx = seed(AppContext::new(Config::default())).expect("seed data is self-consistent");
    Rc::new(RefCell::new(ctx))
}

fn seed(mut ctx: AppContext) -> Result<AppContext> {
    let alice = ctx.register_user(NewUser {
        username: "alice".to_string(),
        email: "alice@agora.example".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1994, 3, 14).expect("valid date"),
    })?;
    let bob = ctx.register_user(NewUser {
        username: "bob".to_string(),
        email: "bob@agora.example".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 7, 2).expect("valid date"),
    })?;
    let carol = ctx.register_user(NewUser {
        username: "carol".to_string(),
        email: "carol@agora.example".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1998, 11, 30).expect("valid date"),
    })?;
    let dave = ctx.register_user(NewUser {
        username: "dave".to_string(),
        email: "dave@agora.example".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1988, 1, 21).expect("valid date"),
    })?;

    ctx.update_profile(
        alice.id,
        ProfileUpdate {
            bio: Some("Street photographer and coffee enthusiast".to_string()),
            location: Some("Lisbon".to_string()),
            profile_photo: Some("https://agora.example/photos/alice.jpg".to_string()),
            ..Default::default()
        },
    )?;
    ctx.update_profile(
        bob.id,
        ProfileUpdate {
            bio: Some("Backend developer, mostly lurking".to_string()),
            location: Some("Berlin".to_string()),
            ..Default::default()
        },
    )?;
    ctx.users.set_verified(alice.id, true)?;

    ctx.follow(bob.id, alice.id)?;
    ctx.follow(carol.id, alice.id)?;
    ctx.follow(dave.id, alice.id)?;
    ctx.follow(alice.id, bob.id)?;
    ctx.follow(carol.id, bob.id)?;

    let sunrise = ctx.create_post(
        alice.id,
        NewPost::text("Caught the sunrise over the river this morning. Worth the 5am alarm."),
    )?;
    let rustpost = ctx.create_post(
        bob.id,
        NewPost::text("Finally moved our ingestion pipeline to Rust. Half the memory, none of the crashes."),
    )?;
    ctx.create_post(
        carol.id,
        NewPost::text("Looking for book recommendations, preferably something uplifting."),
    )?;

    let root = ctx.create_comment(
        bob.id,
        NewComment::on_post(sunrise.id, "Gorgeous light. Which bridge is this?"),
    )?;
    let reply = ctx.create_comment(
        alice.id,
        NewComment::reply_to(sunrise.id, root.id, "Ponte 25 de Abril, from the Almada side."),
    )?;
    ctx.create_comment(
        carol.id,
        NewComment::reply_to(sunrise.id, reply.id, "Adding this spot to my list!"),
    )?;
    ctx.create_comment(
        dave.id,
        NewComment::on_post(sunrise.id, "5am alarms are never worth it. Almost never."),
    )?;
    ctx.create_comment(
        alice.id,
        NewComment::on_post(rustpost.id, "What did you migrate from?"),
    )?;

    ctx.rate_post(bob.id, sunrise.id, RatingKind::Like)?;
    ctx.rate_post(carol.id, sunrise.id, RatingKind::Like)?;
    ctx.rate_post(dave.id, sunrise.id, RatingKind::Like)?;
    ctx.rate_post(alice.id, rustpost.id, RatingKind::Like)?;
    ctx.rate_comment(alice.id, root.id, RatingKind::Like)?;

    ctx.send_message(
        bob.id,
        NewMessage {
            receiver_id: alice.id,
            content: "Would you be up for shooting the harbor next weekend?".to_string(),
        },
    )?;
    ctx.send_message(
        alice.id,
        NewMessage {
            receiver_id: bob.id,
            content: "Sure, Saturday morning works for me.".to_string(),
        },
    )?;

    let photography = ctx.tags.create("photography")?;
    let rust = ctx.tags.create("rust")?;
    ctx.tags.create("books")?;
    ctx.follow_tag(bob.id, photography.id)?;
    ctx.follow_tag(carol.id, photography.id)?;
    ctx.follow_tag(alice.id, rust.id)?;

    let shutterbugs = ctx
        .groups
        .create(alice.id, "Shutterbugs", "Weekly photo walks and critique")?;
    ctx.groups
        .create(bob.id, "Systems Corner", "Low-level programming talk")?;
    ctx.join_group(bob.id, shutterbugs.id)?;
    ctx.join_group(carol.id, shutterbugs.id)?;

    debug!(
        users = ctx.users.count(),
        posts = ctx.posts.count(),
        comments = ctx.comments.count(),
        "seeded demo context"
    );
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_context_is_populated() {
        let ctx = demo_context();
        let ctx = ctx.borrow();

        assert_eq!(ctx.users.count(), 4);
        assert_eq!(ctx.posts.count(), 3);
        assert!(ctx.comments.count() >= 5);
        assert!(ctx.tags.count() >= 3);
        assert!(ctx.groups.count() >= 2);
    }

    #[test]
    fn test_demo_threads_are_nested() {
        let ctx = demo_context();
        let ctx = ctx.borrow();

        let post = ctx
            .posts
            .recent()
            .into_iter()
            .max_by_key(|p| ctx.comments.count_for_post(p.id))
            .expect("seeded posts")
            .id;
        let forest = ctx.comment_forest(post).expect("post exists");

        assert_eq!(forest.len(), 2);
        // first root holds a two-level reply chain
        assert_eq!(forest[0].replies.len(), 1);
        assert_eq!(forest[0].replies[0].replies.len(), 1);
    }
}
