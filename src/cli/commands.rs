use std::path::Path;

use crate::app::{AppContext, GazetteError, Result};
use crate::domain::{Credentials, PostSummary, Registration};
use crate::feed::FeedLoader;

pub async fn list_posts(ctx: &AppContext, page: u32, all: bool) -> Result<()> {
    if all {
        let mut loader = FeedLoader::new();
        while loader.has_more() {
            if !loader.fetch_next(ctx.api.as_ref()).await {
                if let Some(message) = loader.error() {
                    return Err(GazetteError::Api(message.to_string()));
                }
                break;
            }
        }
        print_posts(loader.items());
        println!("\n{} articles", loader.items().len());
        return Ok(());
    }

    let response = ctx.api.posts_page(page).await?;
    print_posts(&response.data);
    println!(
        "\nPage {}/{}{}",
        response.current_page,
        response.last_page,
        if response.has_more() {
            " (more available)"
        } else {
            ""
        }
    );
    Ok(())
}

pub async fn show_post(ctx: &AppContext, slug: &str) -> Result<()> {
    let view = ctx.api.post_by_slug(slug).await?;
    let post = &view.post;

    println!("{}", post.title);
    println!(
        "by {} | {} | {} min read | {} comments",
        post.author_name(),
        post.created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string()),
        post.reading_minutes.unwrap_or(0),
        post.comment_total()
    );

    if let Some(intro) = &post.introduction {
        println!("\n{}", intro);
    }

    for section in &post.sections {
        println!("\n## {}\n", section.title);
        println!("{}", crate::tui::layout::strip_html(&section.body));
    }

    if !post.comments.is_empty() {
        println!("\nComments:");
        for comment in &post.comments {
            println!("  {}: {}", comment.author_name(), comment.body);
        }
    }

    if !view.related.data.is_empty() {
        println!("\nIn the same category:");
        for related in &view.related.data {
            println!("  {}", related.title);
        }
    }

    Ok(())
}

pub async fn list_category(ctx: &AppContext, slug: &str, filter: Option<&str>) -> Result<()> {
    // Posts and category metadata come from separate endpoints; fetch both
    // at once.
    let (posts, category) =
        tokio::try_join!(ctx.api.category_posts(slug), ctx.api.category(slug))?;

    let shown: Vec<&PostSummary> = match filter {
        Some(query) => filter_posts(&posts, query),
        None => posts.iter().collect(),
    };

    println!("{}: {} articles", category.name, shown.len());
    for post in shown {
        print_post_line(post);
    }
    Ok(())
}

pub async fn search_posts(ctx: &AppContext, query: &str) -> Result<()> {
    let posts = ctx.api.search(query).await?;

    if posts.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }

    print_posts(&posts);
    Ok(())
}

pub async fn list_featured(ctx: &AppContext) -> Result<()> {
    let posts = ctx.api.featured().await?;

    if posts.is_empty() {
        println!("No featured articles");
        return Ok(());
    }

    for post in &posts {
        println!(
            "[{}] {} (+{} / -{}, {} comments)",
            post.category_name(),
            post.title,
            post.upvotes.unwrap_or(0),
            post.downvotes.unwrap_or(0),
            post.comment_count.unwrap_or(0)
        );
    }
    Ok(())
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    let auth = ctx.api.login(&credentials).await?;
    ctx.session.store(auth.token, auth.user.clone())?;

    match auth.user {
        Some(user) => println!("Signed in as {}", user.name),
        None => println!("Signed in"),
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let registration = Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password_confirmation: password.to_string(),
        terms: true,
    };
    let auth = ctx.api.register(&registration).await?;
    ctx.session.store(auth.token, auth.user)?;
    println!("Account created, signed in");
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_signed_in() {
        println!("Not signed in");
        return Ok(());
    }

    // Clear the local session even when the server-side revoke fails.
    let result = ctx.api.logout().await;
    ctx.session.clear()?;

    match result {
        // A 401 clears the session inside the API layer already.
        Ok(()) | Err(GazetteError::Unauthorized) => {
            println!("Signed out");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let cached = ctx.session.user().ok_or(GazetteError::NotSignedIn)?;

    // Refresh from the server so the cached record stays current.
    let user = ctx.api.user(cached.id).await?;
    ctx.session.update_user(user.clone())?;

    println!("{} <{}>", user.name, user.email.as_deref().unwrap_or("-"));
    Ok(())
}

pub async fn set_photo(ctx: &AppContext, path: &Path) -> Result<()> {
    let user = ctx.session.user().ok_or(GazetteError::NotSignedIn)?;

    ctx.api.update_photo(user.id, path).await?;

    // Re-fetch so the cached user carries the new image URL.
    let refreshed = ctx.api.user(user.id).await?;
    ctx.session.update_user(refreshed)?;

    println!("Profile photo updated");
    Ok(())
}

/// Case-insensitive title/intro filter, applied locally the way the
/// category page filters its already-loaded posts.
pub fn filter_posts<'a>(posts: &'a [PostSummary], query: &str) -> Vec<&'a PostSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post
                    .introduction
                    .as_ref()
                    .is_some_and(|intro| intro.to_lowercase().contains(&needle))
        })
        .collect()
}

fn print_posts(posts: &[PostSummary]) {
    if posts.is_empty() {
        println!("No articles");
        return;
    }
    for post in posts {
        print_post_line(post);
    }
}

fn print_post_line(post: &PostSummary) {
    let date = post
        .created_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    println!(
        "{} [{}] {} ({})",
        date,
        post.category_name(),
        post.title,
        post.slug.as_deref().unwrap_or("-")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, intro: Option<&str>) -> PostSummary {
        PostSummary {
            id,
            slug: None,
            title: title.to_string(),
            introduction: intro.map(String::from),
            image: None,
            reading_minutes: None,
            category: None,
            upvotes: None,
            downvotes: None,
            comment_count: None,
            created_at: None,
        }
    }

    #[test]
    fn test_filter_matches_title_case_insensitive() {
        let posts = vec![
            post(1, "Rust en production", None),
            post(2, "Guide Python", None),
        ];
        let found = filter_posts(&posts, "RUST");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_filter_matches_introduction() {
        let posts = vec![
            post(1, "Titre neutre", Some("un retour sur Rust")),
            post(2, "Autre titre", None),
        ];
        let found = filter_posts(&posts, "rust");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let posts = vec![post(1, "A", None), post(2, "B", None)];
        assert_eq!(filter_posts(&posts, "   ").len(), 2);
    }
}
