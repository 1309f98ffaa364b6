//! Demo content for a fresh data file.

use time::{Duration, UtcDateTime};
use vivamente_common::{
    model::{
        Id, VivamenteSnowflakeGenerator,
        comment::{Comment, CreateComment},
        community::{Audience, Community, Condition},
        content::Content,
        post::{CreatePost, Post},
        user::{Author, UserHandle},
    },
    util,
};

pub const CALM_MINDS: u64 = 1;
pub const ADHD_FOCUS: u64 = 2;
pub const SPECTRUM_FRIENDS: u64 = 3;
pub const LIGHT_AHEAD: u64 = 4;

#[must_use]
pub fn seed_communities() -> Vec<Community> {
    vec![
        Community {
            id: Id::from(CALM_MINDS),
            name: "Calm Minds".to_owned(),
            description: "Breathing techniques and day-to-day support.".to_owned(),
            condition: Condition::Anxiety,
            creator: Id::from(1),
            members_count: 1240,
            tags: vec!["Calm".to_owned(), "Support".to_owned()],
        },
        Community {
            id: Id::from(ADHD_FOCUS),
            name: "ADHD Focus".to_owned(),
            description: "Organisation and productivity strategies.".to_owned(),
            condition: Condition::Adhd,
            creator: Id::from(2),
            members_count: 850,
            tags: vec!["Productivity".to_owned(), "Tips".to_owned()],
        },
        Community {
            id: Id::from(SPECTRUM_FRIENDS),
            name: "Spectrum Friends".to_owned(),
            description: "For adults and teenagers on the autism spectrum.".to_owned(),
            condition: Condition::Asd,
            creator: Id::from(3),
            members_count: 420,
            tags: vec!["Inclusion".to_owned(), "Dialogue".to_owned()],
        },
        Community {
            id: Id::from(LIGHT_AHEAD),
            name: "Light Ahead".to_owned(),
            description: "Mutual support for living with depression.".to_owned(),
            condition: Condition::Depression,
            creator: Id::from(4),
            members_count: 2100,
            tags: vec!["Hope".to_owned(), "Listening".to_owned()],
        },
    ]
}

/// Two posts, one with a comment, backdated by a few hours.
pub fn seed_posts(generator: &mut VivamenteSnowflakeGenerator) -> Vec<Post> {
    let now = util::whole_seconds(UtcDateTime::now());
    let ana = Author {
        id: Id::from(1),
        handle: UserHandle::new_unchecked("Ana Souza"),
    };
    let marcos = Author {
        id: Id::from(2),
        handle: UserHandle::new_unchecked("Marcos Lima"),
    };

    let mut meditation = Post::new(
        generator.generate_at(now - Duration::hours(2)).into(),
        CreatePost {
            audience: Audience::Community(Id::from(CALM_MINDS)),
            author: ana,
            content: Content::new_unchecked(
                "Rough day with anxiety, but ten minutes of meditation really calmed my \
                 thoughts. Does anyone else use this?",
            ),
        },
        now - Duration::hours(2),
    );
    meditation.likes.toggle(marcos.id);
    meditation.comments.push(Comment::new(
        generator.generate_at(now - Duration::hours(1)).into(),
        CreateComment {
            author: marcos.clone(),
            content: Content::new_unchecked("I do! It helps a lot at work."),
        },
        now - Duration::hours(1),
    ));

    let desk = Post::new(
        generator.generate_at(now - Duration::hours(5)).into(),
        CreatePost {
            audience: Audience::Community(Id::from(ADHD_FOCUS)),
            author: marcos,
            content: Content::new_unchecked(
                "Just reorganised my desk and feel much more able to focus today!",
            ),
        },
        now - Duration::hours(5),
    );

    vec![meditation, desk]
}
