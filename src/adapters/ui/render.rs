//! Plain-text rendering of each screen's content. Styling is applied by the caller.

use crate::domain::{BlogPost, Contribution, ForumPost, Loadable, Profile};
use crate::usecases::ProfilePage;
use std::fmt::Write;

pub const LOADING: &str = "Loading...";

pub fn profile_card(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.name);
    let _ = writeln!(out, "  {}", profile.tenure_label());
    if !profile.one_liner.is_empty() {
        let _ = writeln!(out, "  \"{}\"", profile.one_liner);
    }
    if !profile.image_url.is_empty() {
        let _ = writeln!(out, "  [image] {}", profile.image_url);
    }
    out
}

/// Directory body. A list that has not arrived yet renders as an empty grid.
pub fn directory(profiles: &Loadable<Vec<Profile>>) -> String {
    let mut out = String::from("Legacy Leaders\n\n");
    if let Some(list) = profiles.as_loaded() {
        for p in list {
            out.push_str(&profile_card(p));
            out.push('\n');
        }
    }
    out
}

pub fn profile_page(page: &Loadable<ProfilePage>, can_contribute: bool) -> String {
    let Some(page) = page.as_loaded() else {
        return LOADING.to_string();
    };
    let p = &page.profile;
    let mut out = String::new();
    if !p.image_url.is_empty() {
        let _ = writeln!(out, "[image] {}", p.image_url);
    }
    let _ = writeln!(out, "{}", p.name);
    let _ = writeln!(out, "Tenure: {}", p.tenure_label());
    let _ = writeln!(out, "\"{}\"", p.one_liner);
    let _ = writeln!(out, "\n{}\n", p.description);

    let _ = writeln!(out, "Blog Posts");
    for blog in &page.blogs {
        let _ = writeln!(out, "  {} (Posted on {})", blog.title, blog.posted_on());
    }
    let _ = writeln!(out, "\nForum Posts");
    for post in &page.forum_posts {
        let _ = writeln!(out, "  {}\n    {}", post.title, post.content);
        let _ = writeln!(out, "    Posted on {}", post.posted_on());
    }
    let _ = writeln!(out, "\nContributions");
    for c in &page.contributions {
        out.push_str(&contribution(c));
    }
    if can_contribute {
        let _ = writeln!(out, "\nAdd New Contribution is available from the menu.");
    }
    out
}

pub fn contribution(c: &Contribution) -> String {
    format!(
        "  {} <{}>\n    {}\n    Added on {}\n",
        c.title,
        c.resource_url,
        c.description,
        c.added_on()
    )
}

pub fn forum(posts: &Loadable<Vec<ForumPost>>) -> String {
    let mut out = String::from("Forum\n\n");
    if let Some(list) = posts.as_loaded() {
        for post in list {
            let _ = writeln!(out, "{}\n  {}", post.title, post.content);
            let _ = writeln!(
                out,
                "  Posted by {} on {}\n",
                post.owner_name(),
                post.posted_on()
            );
        }
    }
    out
}

pub fn blog_index(blogs: &Loadable<Vec<BlogPost>>) -> String {
    let mut out = String::from("Blog\n\n");
    if let Some(list) = blogs.as_loaded() {
        for blog in list {
            let _ = writeln!(out, "{}", blog.title);
            let _ = writeln!(
                out,
                "  Posted by {} on {}\n",
                blog.owner_name(),
                blog.posted_on()
            );
        }
    }
    out
}

/// Full post. Line breaks in the body are kept as written.
pub fn blog_post(blog: &Loadable<BlogPost>) -> String {
    match blog.as_loaded() {
        Some(b) => format!(
            "{}\nPosted by {} on {}\n\n{}\n",
            b.title,
            b.owner_name(),
            b.posted_on(),
            b.content
        ),
        None => LOADING.to_string(),
    }
}
