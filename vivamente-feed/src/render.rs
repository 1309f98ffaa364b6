//! Plain-text rendering of a feed.

use std::fmt::{self, Display, Formatter};
use time::UtcDateTime;
use vivamente_common::{
    forest,
    model::{comment::Comment, community::Community, post::Post},
    util::format_age,
};

const INDENT: &str = "    ";

fn counted(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}

pub struct RenderedFeed<'a> {
    posts: Vec<&'a Post>,
    communities: &'a [Community],
    now: UtcDateTime,
}

impl<'a> RenderedFeed<'a> {
    #[must_use]
    pub fn new(posts: Vec<&'a Post>, communities: &'a [Community], now: UtcDateTime) -> Self {
        Self {
            posts,
            communities,
            now,
        }
    }

    fn write_comments(
        &self,
        f: &mut Formatter<'_>,
        comments: &[Comment],
        depth: usize,
    ) -> fmt::Result {
        for comment in comments {
            writeln!(
                f,
                "{}- {} ({}, {}): {}",
                INDENT.repeat(depth),
                comment.author.handle.get(),
                format_age(comment.created_at, self.now),
                counted(comment.likes.count(), "like", "likes"),
                comment.content.get(),
            )?;
            self.write_comments(f, &comment.replies, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for RenderedFeed<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.posts.is_empty() {
            return writeln!(f, "No posts in your groups yet.");
        }

        for post in &self.posts {
            writeln!(
                f,
                "[{}] {} ({}, {}, {})",
                post.audience.display_name(self.communities),
                post.author.handle.get(),
                format_age(post.created_at, self.now),
                counted(post.likes.count(), "like", "likes"),
                counted(forest::count(&post.comments), "comment", "comments"),
            )?;
            for line in post.content.get().lines() {
                writeln!(f, "{INDENT}{line}")?;
            }
            self.write_comments(f, &post.comments, 1)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::render::RenderedFeed;
    use time::{Duration, macros::utc_datetime};
    use vivamente_common::{
        forest,
        model::{
            Id,
            comment::{Comment, CreateComment},
            community::{Audience, Community, Condition},
            content::Content,
            post::{CreatePost, Post},
            user::{Author, UserHandle},
        },
    };

    #[test]
    fn empty_feed() {
        let feed = RenderedFeed::new(Vec::new(), &[], utc_datetime!(2025-10-24 12:00));
        assert_eq!(feed.to_string(), "No posts in your groups yet.\n");
    }

    #[test]
    fn nested_comments_are_indented() {
        let now = utc_datetime!(2025-10-24 12:00);
        let ana = Author {
            id: Id::from(1),
            handle: UserHandle::new_unchecked("Ana"),
        };
        let marcos = Author {
            id: Id::from(2),
            handle: UserHandle::new_unchecked("Marcos"),
        };
        let communities = [Community {
            id: Id::from(5),
            name: "Calm Minds".to_owned(),
            description: String::new(),
            condition: Condition::Anxiety,
            creator: Id::from(1),
            members_count: 2,
            tags: Vec::new(),
        }];

        let mut post = Post::new(
            Id::from(10),
            CreatePost {
                audience: Audience::Community(Id::from(5)),
                author: ana.clone(),
                content: Content::new_unchecked("Breathing helps.\nTry it."),
            },
            now - Duration::hours(2),
        );
        post.likes.toggle(marcos.id);
        post.comments.push(Comment::new(
            Id::from(11),
            CreateComment {
                author: marcos,
                content: Content::new_unchecked("Agreed"),
            },
            now - Duration::hours(1),
        ));
        post.comments = forest::add_reply(
            post.comments,
            Id::from(11),
            Comment::new(
                Id::from(12),
                CreateComment {
                    author: ana,
                    content: Content::new_unchecked("Thanks!"),
                },
                now,
            ),
        );

        let feed = RenderedFeed::new(vec![&post], &communities, now);
        assert_eq!(
            feed.to_string(),
            "[Calm Minds] Ana (2h ago, 1 like, 2 comments)\n\
             \x20   Breathing helps.\n\
             \x20   Try it.\n\
             \x20   - Marcos (1h ago, 0 likes): Agreed\n\
             \x20       - Ana (just now, 0 likes): Thanks!\n\
             \n"
        );
    }

    #[test]
    fn single_counts_are_singular() {
        let now = utc_datetime!(2025-10-24 12:00);
        let ana = Author {
            id: Id::from(1),
            handle: UserHandle::new_unchecked("Ana"),
        };
        let mut post = Post::new(
            Id::from(10),
            CreatePost {
                audience: Audience::General,
                author: ana.clone(),
                content: Content::new_unchecked("Hello"),
            },
            now,
        );
        let mut comment = Comment::new(
            Id::from(11),
            CreateComment {
                author: ana,
                content: Content::new_unchecked("Hi"),
            },
            now,
        );
        comment.likes.toggle(Id::from(2));
        post.comments.push(comment);

        let feed = RenderedFeed::new(vec![&post], &[], now);
        assert_eq!(
            feed.to_string(),
            "[General] Ana (just now, 0 likes, 1 comment)\n\
             \x20   Hello\n\
             \x20   - Ana (just now, 1 like): Hi\n\
             \n"
        );
    }
}
