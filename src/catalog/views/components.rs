//! # Presentational Components
//!
//! Stateless renderers that turn data into styled lines. They never look at
//! controller state directly and never write to the terminal; the renderer
//! decides where the lines go. Display fallbacks for missing fields live here.

use crate::catalog::models::{Nutriments, NutritionGrade, Product, ProductDetails, SortKey};
use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown for any missing value on the detail screen
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown on a card whose product has no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// How many ingredients a card previews
pub const CARD_INGREDIENT_PREVIEW: usize = 3;

const SELECTED_MARKER: &str = "▶ ";
const UNSELECTED_MARKER: &str = "  ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl SpanStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

/// One terminal row made of styled spans
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanStyle::default())
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        let mut line = Self::default();
        line.push(text, style);
        line
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, style: SpanStyle) -> &mut Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    /// Text without styling
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.width()).sum()
    }

    /// Cut the line to `width` columns, marking the cut with an ellipsis
    pub fn truncated(mut self, width: usize) -> Self {
        if self.width() <= width {
            return self;
        }
        let mut remaining = width.saturating_sub(1);
        let mut spans = Vec::new();
        for span in self.spans.drain(..) {
            if remaining == 0 {
                break;
            }
            let text = take_columns(&span.text, remaining);
            remaining -= text.width();
            spans.push(Span {
                text,
                style: span.style,
            });
        }
        let style = spans.last().map(|span| span.style).unwrap_or_default();
        if width > 0 {
            spans.push(Span {
                text: "…".to_string(),
                style,
            });
        }
        Self { spans }
    }
}

fn take_columns(text: &str, columns: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= columns
        })
        .collect()
}

/// Fit `text` in `width` columns, ending with an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut = take_columns(text, width - 1);
    cut.push('…');
    cut
}

pub fn grade_label(grade: Option<NutritionGrade>) -> String {
    grade.map_or_else(|| NOT_AVAILABLE.to_string(), |g| g.to_string())
}

/// Badge color, from green for `A` to red for `E`
pub fn grade_color(grade: Option<NutritionGrade>) -> Color {
    match grade {
        Some(NutritionGrade::A) => Color::AnsiValue(34),
        Some(NutritionGrade::B) => Color::AnsiValue(148),
        Some(NutritionGrade::C) => Color::AnsiValue(220),
        Some(NutritionGrade::D) => Color::AnsiValue(208),
        Some(NutritionGrade::E) => Color::AnsiValue(196),
        None => Color::DarkGrey,
    }
}

/// `12.5 g`, `100 kcal`, or `N/A`
pub fn nutrient_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) if value.is_finite() => {
            let rounded = (value * 100.0).round() / 100.0;
            format!("{rounded} {unit}")
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Card lines for one product; always `CARD_HEIGHT - 1` rows
pub fn product_card(product: &Product, width: usize, selected: bool) -> Vec<Line> {
    let marker = if selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    };
    let name_style = if selected {
        SpanStyle::default().bold().reverse()
    } else {
        SpanStyle::default().bold()
    };

    let mut title = Line::plain(marker);
    title.push(product.name.as_str(), name_style);

    let mut meta = Line::plain(UNSELECTED_MARKER);
    meta.push(
        format!(
            "Category: {}  ",
            product.category.as_deref().unwrap_or(UNCATEGORIZED)
        ),
        SpanStyle::default().dim(),
    );
    meta.push("Nutrition Grade: ", SpanStyle::default());
    meta.push(
        format!(" {} ", grade_label(product.nutrition_grade)),
        SpanStyle::fg(grade_color(product.nutrition_grade)).bold(),
    );

    let ingredients = if product.ingredients.is_empty() {
        Line::blank()
    } else {
        let preview = product
            .ingredients
            .iter()
            .take(CARD_INGREDIENT_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let mut line = Line::plain(UNSELECTED_MARKER);
        line.push("Ingredients: ", SpanStyle::default().bold());
        line.push(format!("{preview}..."), SpanStyle::default());
        line
    };

    vec![title, meta, ingredients]
        .into_iter()
        .map(|line| line.truncated(width))
        .collect()
}

/// Search box; shows a placeholder while empty and unfocused
pub fn search_input(text: &str, focused: bool) -> Line {
    let mut line = Line::styled("Search: ", SpanStyle::default().bold());
    if text.is_empty() && !focused {
        line.push("press / to search", SpanStyle::default().dim());
    } else {
        let style = if focused {
            SpanStyle::default().reverse()
        } else {
            SpanStyle::default()
        };
        let cursor = if focused { "_" } else { "" };
        line.push(format!("{text}{cursor}"), style);
    }
    line
}

/// Current category selection
pub fn category_filter(selected: Option<&str>, all_label: &str) -> Line {
    let mut line = Line::styled("Category: ", SpanStyle::default().bold());
    line.push(selected.unwrap_or(all_label), SpanStyle::default());
    line.push(" (c)", SpanStyle::default().dim());
    line
}

/// Current sort selection
pub fn sort_select(sort: SortKey) -> Line {
    let mut line = Line::styled("Sort: ", SpanStyle::default().bold());
    line.push(sort.label(), SpanStyle::default());
    line.push(" (s)", SpanStyle::default().dim());
    line
}

/// Filter bar: search, category and sort side by side
pub fn filter_bar(search: Line, category: Line, sort: Line, width: usize) -> Line {
    let mut bar = Line::default();
    for (index, part) in [search, category, sort].into_iter().enumerate() {
        if index > 0 {
            bar.push(" │ ", SpanStyle::default().dim());
        }
        bar.spans.extend(part.spans);
    }
    bar.truncated(width)
}

/// Picker box listing `options` with the highlighted one reversed
pub fn picker_lines(title: &str, options: &[String], cursor: usize, height: usize) -> Vec<Line> {
    let mut lines = vec![Line::styled(
        format!("{title} (Enter to apply, Esc to cancel)"),
        SpanStyle::default().bold(),
    )];

    let rows = height.saturating_sub(1).max(1);
    let first = cursor.saturating_sub(rows - 1).min(options.len().saturating_sub(rows));
    for (index, option) in options.iter().enumerate().skip(first).take(rows) {
        if index == cursor {
            let mut line = Line::plain(SELECTED_MARKER);
            line.push(option.as_str(), SpanStyle::default().reverse());
            lines.push(line);
        } else {
            lines.push(Line::plain(format!("{UNSELECTED_MARKER}{option}")));
        }
    }
    lines
}

pub fn landing_lines() -> Vec<Line> {
    vec![
        Line::styled("Food Product Explorer", SpanStyle::default().bold()),
        Line::blank(),
        Line::plain("Explore delicious food items from around the world"),
        Line::blank(),
        Line::styled("[ Get Started ]", SpanStyle::fg(Color::AnsiValue(208)).bold()),
        Line::styled("press Enter to browse, q to quit", SpanStyle::default().dim()),
    ]
}

/// Row shown under the cards: loading, error, empty list or end of list
pub fn list_footer(is_loading: bool, error: Option<&str>, is_empty: bool, has_more: bool) -> Line {
    if let Some(error) = error {
        return Line::styled(error, SpanStyle::fg(Color::Red).bold());
    }
    if is_loading {
        return Line::styled("Loading...", SpanStyle::default().dim());
    }
    if is_empty {
        return Line::styled("No products found.", SpanStyle::default().dim());
    }
    if !has_more {
        return Line::styled("No more products.", SpanStyle::default().dim());
    }
    Line::blank()
}

pub fn detail_loading_lines() -> Vec<Line> {
    vec![Line::styled(
        "Loading product details...",
        SpanStyle::default().dim(),
    )]
}

pub fn not_found_lines() -> Vec<Line> {
    vec![
        Line::styled("Product Not Found", SpanStyle::default().bold()),
        Line::blank(),
        Line::styled("press Esc to go back", SpanStyle::default().dim()),
    ]
}

/// Full detail page for one product
pub fn detail_lines(details: &ProductDetails, width: usize) -> Vec<Line> {
    let product = &details.product;
    let heading = SpanStyle::default().bold();
    let muted = SpanStyle::default().dim();

    let mut lines = vec![
        Line::styled(product.name.as_str(), heading),
        Line::styled("Detailed nutritional and ingredient info", muted),
        Line::blank(),
        Line::styled("Product Overview", heading),
        Line::plain(format!(
            "  Category: {}",
            product.category.as_deref().unwrap_or(NOT_AVAILABLE)
        )),
    ];

    let mut grade = Line::plain("  Nutrition Grade: ");
    grade.push(
        format!(" {} ", grade_label(product.nutrition_grade)),
        SpanStyle::fg(grade_color(product.nutrition_grade)).bold(),
    );
    lines.push(grade);
    lines.push(Line::plain(format!(
        "  Image: {}",
        product.image_url.as_deref().unwrap_or(NOT_AVAILABLE)
    )));

    lines.push(Line::blank());
    lines.push(Line::styled("Ingredients", heading));
    if product.ingredients.is_empty() {
        lines.push(Line::styled("  Ingredients not available.", muted));
    } else {
        lines.extend(
            product
                .ingredients
                .iter()
                .map(|ingredient| Line::plain(format!("  • {ingredient}"))),
        );
    }

    lines.push(Line::blank());
    lines.push(Line::styled("Nutritional Values (per 100g)", heading));
    lines.extend(nutrient_lines(&details.nutriments));

    lines.push(Line::blank());
    lines.push(Line::styled("Labels", heading));
    if details.labels.is_empty() {
        lines.push(Line::styled("  No special labels.", muted));
    } else {
        lines.push(Line::plain(format!("  {}", details.labels.join(", "))));
    }

    lines.push(Line::blank());
    lines.push(Line::styled("← Back (Esc)", muted));

    lines.into_iter().map(|line| line.truncated(width)).collect()
}

fn nutrient_lines(nutriments: &Nutriments) -> Vec<Line> {
    [
        ("Energy", nutriments.energy_100g, "kcal"),
        ("Fat", nutriments.fat_100g, "g"),
        ("Carbs", nutriments.carbohydrates_100g, "g"),
        ("Proteins", nutriments.proteins_100g, "g"),
    ]
    .into_iter()
    .map(|(name, value, unit)| Line::plain(format!("  {name}: {}", nutrient_value(value, unit))))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::services::sample_product;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn truncate_should_respect_wide_characters() {
        assert_eq!(truncate("Chips", 10), "Chips");
        assert_eq!(truncate("Chocolate", 5), "Choc…");
        // Each CJK character takes two columns
        assert_eq!(truncate("抹茶ラテ", 5), "抹茶…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn card_should_fall_back_for_missing_fields() {
        let product = sample_product("1", "Mystery", None, None).product;

        let lines = texts(&product_card(&product, 80, false));

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Category: Uncategorized"));
        assert!(lines[1].contains("N/A"));
        assert_eq!(lines[2], "");
    }

    #[test]
    fn card_should_preview_three_ingredients() {
        let mut product = sample_product("1", "Granola", Some("cereals"), Some(NutritionGrade::B)).product;
        product.ingredients = ["oats", "honey", "almonds", "salt"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let lines = texts(&product_card(&product, 80, true));

        assert!(lines[0].starts_with("▶ Granola"));
        assert!(lines[1].contains(" B "));
        assert_eq!(lines[2], "  Ingredients: oats, honey, almonds...");
    }

    #[test]
    fn card_lines_should_fit_width() {
        let product = sample_product("1", "A very long product name indeed", None, None).product;
        for line in product_card(&product, 12, false) {
            assert!(line.width() <= 12, "{:?} is too wide", line.text());
        }
    }

    #[test]
    fn nutrient_value_should_format_or_fall_back() {
        assert_eq!(nutrient_value(Some(12.5), "g"), "12.5 g");
        assert_eq!(nutrient_value(Some(250.0), "kcal"), "250 kcal");
        assert_eq!(nutrient_value(Some(0.0), "g"), "0 g");
        assert_eq!(nutrient_value(None, "g"), "N/A");
    }

    #[test]
    fn detail_should_show_fallbacks() {
        let details = sample_product("9", "Plain Water", None, None);

        let lines = texts(&detail_lines(&details, 80));

        assert_eq!(lines[0], "Plain Water");
        assert!(lines.contains(&"  Category: N/A".to_string()));
        assert!(lines.contains(&"  Nutrition Grade:  N/A ".to_string()));
        assert!(lines.contains(&"  Ingredients not available.".to_string()));
        assert!(lines.contains(&"  Energy: N/A".to_string()));
        assert!(lines.contains(&"  No special labels.".to_string()));
    }

    #[test]
    fn picker_should_keep_cursor_visible() {
        let options: Vec<String> = (0..10).map(|i| format!("option {i}")).collect();

        let lines = texts(&picker_lines("Category", &options, 8, 4));

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "▶ option 8");
    }

    #[test]
    fn footer_should_prefer_error_over_loading() {
        let line = list_footer(true, Some("boom"), false, true);
        assert_eq!(line.text(), "boom");
        assert_eq!(list_footer(false, None, true, false).text(), "No products found.");
        assert_eq!(list_footer(false, None, false, false).text(), "No more products.");
    }

    #[test]
    fn search_input_should_show_placeholder_when_idle() {
        assert_eq!(search_input("", false).text(), "Search: press / to search");
        assert_eq!(search_input("tea", true).text(), "Search: tea_");
    }
}
