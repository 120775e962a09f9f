use std::io::{self, Write};

use recipes_core::{NutritionFacts, Recipe, Stars, TableBody, ViewState};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::args::OutputFormat;

const TITLE_WIDTH: usize = 40;
const CUISINE_WIDTH: usize = 16;
const TIME_WIDTH: usize = 10;
const DASH: &str = "-";

/// Renders the recipe table, pagination bar, detail panel and error banner
pub struct ViewFormatter {
    output: OutputFormat,
}

impl ViewFormatter {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    pub fn print_view(&self, out: &mut impl WriteColor, state: &ViewState) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => self.print_json(out, state),
            OutputFormat::Pretty | OutputFormat::Plain => {
                self.print_table(out, state)?;
                self.print_pagination(out, state)?;
                if let Some(recipe) = state.selected() {
                    self.print_details(out, recipe)?;
                }
                self.print_error(out, state)
            }
        }
    }

    fn print_json(&self, out: &mut impl WriteColor, state: &ViewState) -> io::Result<()> {
        let value = serde_json::json!({
            "page": state.page(),
            "pageSize": state.page_size(),
            "totalPages": state.total_pages(),
            "envelope": state.envelope(),
            "selected": state.selected(),
            "error": state.error(),
        });
        let text = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
        writeln!(out, "{}", text)
    }

    fn print_table(&self, out: &mut impl WriteColor, state: &ViewState) -> io::Result<()> {
        self.with_color(out, ColorSpec::new().set_bold(true), |out| {
            writeln!(
                out,
                "  # {:<tw$} {:<cw$} {:<6} {:>mw$} {}",
                "Title",
                "Cuisine",
                "Rating",
                "Total Time",
                "Serves",
                tw = TITLE_WIDTH,
                cw = CUISINE_WIDTH,
                mw = TIME_WIDTH,
            )
        })?;

        let muted = ColorSpec::new().set_dimmed(true).clone();
        match state.table_body() {
            TableBody::Loading => self.with_color(out, &muted, |out| writeln!(out, "Loading…")),
            TableBody::NoResults => self.with_color(out, &muted, |out| {
                writeln!(out, "No results found. Try different filters.")
            }),
            TableBody::NoData => {
                self.with_color(out, &muted, |out| writeln!(out, "No data available."))
            }
            TableBody::Rows(rows) => {
                for (index, recipe) in rows.iter().enumerate() {
                    self.print_row(out, index + 1, recipe)?;
                }
                Ok(())
            }
        }
    }

    fn print_row(&self, out: &mut impl WriteColor, row: usize, recipe: &Recipe) -> io::Result<()> {
        self.with_color(out, ColorSpec::new().set_fg(Some(Color::Cyan)), |out| {
            write!(out, "{:>3} ", row)
        })?;

        write!(
            out,
            "{:<tw$} {:<cw$} ",
            truncate(&recipe.title, TITLE_WIDTH),
            truncate(recipe.cuisine.as_deref().unwrap_or(DASH), CUISINE_WIDTH),
            tw = TITLE_WIDTH,
            cw = CUISINE_WIDTH,
        )?;

        self.with_color(out, ColorSpec::new().set_fg(Some(Color::Yellow)), |out| {
            write!(out, "{}", Stars::from_rating(recipe.rating).render())
        })?;

        writeln!(
            out,
            "  {:>mw$} {}",
            minutes(recipe.total_time),
            recipe.serves.as_deref().unwrap_or(DASH),
            mw = TIME_WIDTH,
        )
    }

    fn print_pagination(&self, out: &mut impl WriteColor, state: &ViewState) -> io::Result<()> {
        let enabled = ColorSpec::new();
        let disabled = ColorSpec::new().set_dimmed(true).clone();

        writeln!(out)?;
        self.with_color(out, if state.has_prev() { &enabled } else { &disabled }, |out| {
            write!(out, "[Prev]")
        })?;
        write!(out, " Page {} of {} ", state.page(), state.total_pages())?;
        self.with_color(out, if state.has_next() { &enabled } else { &disabled }, |out| {
            write!(out, "[Next]")
        })?;
        writeln!(
            out,
            "  Total: {}  Results per page: {}",
            state.total_elements(),
            state.page_size()
        )
    }

    pub fn print_details(&self, out: &mut impl WriteColor, recipe: &Recipe) -> io::Result<()> {
        writeln!(out)?;
        self.with_color(out, ColorSpec::new().set_bold(true), |out| {
            writeln!(out, "== {} ==", recipe.title)
        })?;
        if let Some(cuisine) = &recipe.cuisine {
            self.with_color(out, ColorSpec::new().set_dimmed(true), |out| {
                writeln!(out, "{}", cuisine)
            })?;
        }

        writeln!(
            out,
            "Description: {}",
            recipe.description.as_deref().unwrap_or(DASH)
        )?;
        writeln!(out, "Total Time:  {}", minutes(recipe.total_time))?;
        writeln!(out, "  Cook Time: {}", minutes(recipe.cook_time))?;
        writeln!(out, "  Prep Time: {}", minutes(recipe.prep_time))?;
        writeln!(out, "Serves:      {}", recipe.serves.as_deref().unwrap_or(DASH))?;

        writeln!(out, "Nutrition")?;
        match NutritionFacts::from_recipe(recipe) {
            NutritionFacts::Unavailable => {
                self.with_color(out, ColorSpec::new().set_dimmed(true), |out| {
                    writeln!(out, "  No nutrition data")
                })
            }
            NutritionFacts::Available(rows) => {
                for row in rows {
                    writeln!(out, "  {:<22} {}", row.label, row.display_value())?;
                }
                Ok(())
            }
        }
    }

    fn print_error(&self, out: &mut impl WriteColor, state: &ViewState) -> io::Result<()> {
        if let Some(error) = state.error() {
            writeln!(out)?;
            self.with_color(out, ColorSpec::new().set_fg(Some(Color::Red)), |out| {
                writeln!(out, "Error: {}", error)
            })?;
        }
        Ok(())
    }

    fn with_color<W: WriteColor>(
        &self,
        out: &mut W,
        spec: &ColorSpec,
        f: impl FnOnce(&mut W) -> io::Result<()>,
    ) -> io::Result<()> {
        if self.output == OutputFormat::Pretty {
            out.set_color(spec)?;
        }
        let result = f(out);
        if self.output == OutputFormat::Pretty {
            out.reset()?;
        }
        result
    }
}

fn minutes(value: Option<i64>) -> String {
    value
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| DASH.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use recipes_core::{FetchError, PageEnvelope, PageSize};
    use termcolor::NoColor;

    fn render(state: &ViewState) -> String {
        let mut out = NoColor::new(Vec::new());
        ViewFormatter::new(OutputFormat::Plain)
            .print_view(&mut out, state)
            .unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    fn loaded(json: serde_json::Value) -> ViewState {
        let mut state = ViewState::new(PageSize::default());
        let ticket = state.refresh();
        state.complete(ticket.generation, Ok(PageEnvelope::from_value(json)));
        state
    }

    #[test]
    fn test_rows_and_pagination() {
        let state = loaded(serde_json::json!({
            "content": [{"id": 1, "title": "Shakshuka", "cuisine": "Middle Eastern", "rating": 3.5, "totalTime": 30, "serves": "4"}],
            "totalElements": 31
        }));
        let text = render(&state);

        assert!(text.contains("Shakshuka"));
        assert!(text.contains("★★★⯪☆"));
        assert!(text.contains("30 min"));
        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("Total: 31"));
    }

    #[test]
    fn test_no_results_and_no_data_messages() {
        let empty = loaded(serde_json::json!({"content": [], "totalElements": 0}));
        assert!(render(&empty).contains("No results found. Try different filters."));

        let mut failed = ViewState::new(PageSize::default());
        let ticket = failed.refresh();
        failed.complete(ticket.generation, Err(FetchError::Transport("refused".into())));
        let text = render(&failed);
        assert!(text.contains("No data available."));
        assert!(text.contains("Error: Network error: refused"));
    }

    #[test]
    fn test_loading_indicator() {
        let mut state = ViewState::new(PageSize::default());
        state.refresh();
        assert!(render(&state).contains("Loading…"));
    }

    #[test]
    fn test_details_panel_with_nutrition() {
        let mut state = loaded(serde_json::json!({
            "content": [{"id": 9, "title": "Tacos", "nutrients": "{\"calories\": 200}"}],
            "totalElements": 1
        }));
        state.select_row(0);
        let text = render(&state);

        assert!(text.contains("== Tacos =="));
        assert!(text.contains("Description: -"));
        assert!(text.contains("Calories"));
        assert!(text.contains("200"));
        assert!(text.contains("fatContent"));
    }

    #[test]
    fn test_details_without_nutrition() {
        let mut state = loaded(serde_json::json!({
            "content": [{"id": 9, "title": "Water", "nutrients": null}],
            "totalElements": 1
        }));
        state.select_row(0);

        assert!(render(&state).contains("No nutrition data"));
    }

    #[test]
    fn test_truncate_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 6), "a ver…");
    }
}
