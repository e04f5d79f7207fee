use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode;

use super::helpers::spans_width;

/// Rows per recipe: title line, preview line
const ENTRY_ROWS: usize = 2;

/// Render the recipe list: loading/error lines, then one entry per recipe.
/// Adjusts `app.scroll_offset` so the cursor stays visible.
pub fn render_recipe_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::List;
    let border = if focused { app.theme.highlight } else { app.theme.dim };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .title(Span::styled(
            " Recipes ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    if app.store.is_loading() {
        lines.push(Line::from(Span::styled(
            " Loading recipes...",
            Style::default()
                .fg(app.theme.cyan)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(err) = app.store.error() {
        lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if app.store.is_empty() {
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                " No recipes yet. Add one above or ask the AI.",
                Style::default().fg(app.theme.dim).bg(bg),
            )));
        }
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
        return;
    }

    let visible = (inner.height as usize).saturating_sub(lines.len()) / ENTRY_ROWS;
    let visible = visible.max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }

    let loading_detail = app.detail.loading();
    for (i, recipe) in app
        .store
        .recipes()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let is_cursor = i == app.cursor;
        let row_bg = if is_cursor && focused {
            app.theme.selection_bg
        } else {
            bg
        };
        let marker = if is_cursor { "\u{25B8} " } else { "  " };

        let tag = if loading_detail == Some(recipe.id) && is_cursor {
            Span::styled("Loading...", Style::default().fg(app.theme.cyan).bg(row_bg))
        } else if recipe.from_api {
            Span::styled("TheMealDB", Style::default().fg(app.theme.dim).bg(row_bg))
        } else {
            Span::styled("", Style::default().bg(row_bg))
        };
        let tag_w = unicode::display_width(&tag.content);

        let title_style = Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD);
        let title_budget = width.saturating_sub(marker.chars().count() + tag_w + 2);
        let mut title_spans = vec![
            Span::styled(
                marker,
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
            Span::styled(unicode::truncate_to_width(&recipe.title, title_budget), title_style),
        ];
        let used = spans_width(&title_spans);
        title_spans.push(Span::styled(
            " ".repeat(width.saturating_sub(used + tag_w + 1)),
            Style::default().bg(row_bg),
        ));
        title_spans.push(tag);
        lines.push(Line::from(title_spans));

        let preview = recipe.preview().replace(['\r', '\n'], " ");
        let preview_w = width.saturating_sub(4);
        lines.push(Line::from(vec![
            Span::styled("    ", Style::default().bg(row_bg)),
            Span::styled(
                unicode::truncate_to_width(&preview, preview_w),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| {
            render_recipe_list(frame, app, area);
        })
    }

    #[test]
    fn entries_show_title_source_and_preview() {
        let mut app = seeded_app();
        let output = render(&mut app, 8);
        let rows: Vec<&str> = output.lines().collect();

        assert!(rows[1].contains("\u{25B8} Chicken Handi"));
        assert!(rows[1].contains("TheMealDB"));
        assert!(rows[2].contains("Chicken Handi instructions..."));
        assert!(rows[3].contains("  Chicken Alfredo Primavera"));
    }

    #[test]
    fn local_recipes_have_no_source_tag() {
        let mut app = app_with(vec![manual_recipe(1, "Masala Chai", "Boil milk with tea.")]);
        let output = render(&mut app, 6);
        assert!(output.contains("Masala Chai"));
        assert!(!output.contains("TheMealDB"));
        assert!(output.contains("Boil milk with tea...."));
    }

    #[test]
    fn loading_line_while_bootstrapping() {
        let mut app = app_with(vec![]);
        assert!(app.store.begin_bootstrap());
        let output = render(&mut app, 6);
        assert!(output.contains("Loading recipes..."));
    }

    #[test]
    fn error_line_after_failed_bootstrap() {
        let mut app = failing_app(vec![]);
        app.start();
        let done = app.worker().wait();
        app.apply(done);
        let output = render(&mut app, 6);
        assert!(output.contains("Failed to load recipes"));
        assert!(!output.contains("No recipes yet"));
    }

    #[test]
    fn empty_list_hint() {
        let mut app = app_with(vec![]);
        let output = render(&mut app, 6);
        assert!(output.contains("No recipes yet"));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let recipes = (1..=10)
            .map(|i| manual_recipe(i, &format!("Recipe {i:02}"), "desc"))
            .collect();
        let mut app = app_with(recipes);
        app.cursor = 7;
        // 6 inner rows hold three entries
        let output = render(&mut app, 8);
        assert_eq!(app.scroll_offset, 5);
        assert!(output.contains("Recipe 08"));
        assert!(!output.contains("Recipe 05"));

        app.cursor = 2;
        render(&mut app, 8);
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn selected_seeded_recipe_shows_detail_loading() {
        let mut app = seeded_app();
        app.open_selected_detail();
        let output = render(&mut app, 8);
        assert!(output.lines().nth(1).unwrap().contains("Loading..."));
    }
}
