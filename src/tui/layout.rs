use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActivePane, TuiApp};

const BANNER_HEIGHT: u16 = 6;
const STATUS_HEIGHT: u16 = 1;

/// Rows available for feed items given the full terminal height. The run
/// loop uses this to decide whether the tail marker is on screen; it must
/// match the constraints in [`render`].
pub fn feed_list_height(total_rows: u16) -> usize {
    total_rows
        .saturating_sub(BANNER_HEIGHT + STATUS_HEIGHT + 2) // borders
        as usize
}

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BANNER_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    render_banner(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Min(30)])
        .split(chunks[1]);

    render_feed_pane(frame, app, panes[0]);
    render_preview_pane(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_banner(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .title(" Featured ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let content = if let Some(post) = app.carousel.current() {
        let (slide, total) = app.carousel.position();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", post.category_name()),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    post.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(post.display_intro().to_string()),
        ];
        lines.push(Line::from(Span::styled(
            format!(
                "+{} / -{}  {} comments    {}/{}  ([ and ] to rotate)",
                post.upvotes.unwrap_or(0),
                post.downvotes.unwrap_or(0),
                post.comment_count.unwrap_or(0),
                slide,
                total
            ),
            Style::default().fg(Color::DarkGray),
        )));
        Text::from(lines)
    } else {
        Text::from("No featured articles")
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_feed_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.active_pane == ActivePane::Feed;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let height = area.height.saturating_sub(2) as usize;
    let window = app.visible_range(height);

    let items: Vec<ListItem> = app.loader.items()[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, post)| {
            let index = window.start + offset;
            let date = post
                .created_at
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let content = format!("{} {}", date, post.title);

            let style = if index == app.selected && is_active {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if index == app.selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = if app.loader.is_end_of_list() {
        format!(" Articles ({}, end) ", app.loader.items().len())
    } else {
        format!(" Articles ({}) ", app.loader.items().len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_preview_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.active_pane == ActivePane::Preview;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (title, content) = if let Some(view) = &app.article {
        (
            format!(" {} ", view.post.title),
            article_text(view, area.width),
        )
    } else if let Some(post) = app.selected_post() {
        let mut lines = vec![
            Line::from(Span::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(post.display_intro().to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to load the full article",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if let Some(minutes) = post.reading_minutes {
            lines.insert(
                1,
                Line::from(Span::styled(
                    format!("{} min read", minutes),
                    Style::default().fg(Color::Yellow),
                )),
            );
        }
        (" Preview ".to_string(), Text::from(lines))
    } else {
        (" Preview ".to_string(), Text::from("No article selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn article_text(view: &crate::api::ArticleView, width: u16) -> Text<'static> {
    let post = &view.post;
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        post.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let mut meta = format!("By: {}", post.author_name());
    if let Some(date) = post.created_at {
        meta.push_str(&format!("  {}", date.format("%Y-%m-%d")));
    }
    if let Some(minutes) = post.reading_minutes {
        meta.push_str(&format!("  {} min", minutes));
    }
    lines.push(Line::from(Span::styled(
        meta,
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from("─".repeat(width.saturating_sub(2) as usize)));

    if let Some(intro) = &post.introduction {
        lines.push(Line::from(intro.clone()));
        lines.push(Line::from(""));
    }

    for section in &post.sections {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for line in strip_html(&section.body).lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("Comments ({})", post.comment_total()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if post.comments.is_empty() {
        lines.push(Line::from("No comments yet"));
    }
    for comment in &post.comments {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", comment.author_name()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(comment.body.clone()),
        ]));
    }

    if !view.related.data.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "In the same category",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for related in view.related.data.iter().take(3) {
            lines.push(Line::from(format!("  {}", related.title)));
        }
    }

    Text::from(lines)
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.loader.is_loading() {
        "Loading articles...".to_string()
    } else if let Some(error) = app.loader.error() {
        format!("Error: {} (r to retry)", error)
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.loader.is_empty_state() {
        "No articles available".to_string()
    } else if app.loader.is_end_of_list() {
        "You have reached the end of the articles".to_string()
    } else {
        "j/k:Navigate  Tab:Pane  Enter:Read  o:Browser  [/]:Slide  R:Refresh  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Flatten an HTML fragment to plain text: drop tags, collapse whitespace,
/// decode entities.
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    html_escape::decode_html_entities(result.trim()).to_string()
}
