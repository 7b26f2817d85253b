//! Contextual keybinding help with a short one-line hint and a full
//! multi-column legend.
//!
//! [`HelpView`] holds only the `expanded` flag and presentation settings.
//! Everything it shows is projected from the binding table passed to
//! [`render`](HelpView::render), so disabling a binding hides it on the next
//! frame without touching the view.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::dispatch::Dispatcher;
use crate::keymap::{Action, Binding, FullHelpSource, Matchable, ShortHelpSource};

/// Visual style configuration for the [`HelpView`].
#[derive(Debug, Clone)]
pub struct HelpStyle {
    /// Style applied to key labels.
    pub key: Style,
    /// Style applied to binding descriptions.
    pub description: Style,
    /// Style applied to separators and the ellipsis.
    pub separator: Style,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            key: Style::default().fg(Color::Gray),
            description: Style::default().fg(Color::DarkGray),
            separator: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Two-level help display toggled by a table's help action.
#[derive(Debug, Clone)]
pub struct HelpView {
    expanded: bool,
    style: HelpStyle,
    separator: String,
    column_gap: String,
    ellipsis: String,
    max_width: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Key,
    Desc,
    Sep,
    Pad,
}

type Row = Vec<(Part, String)>;

impl HelpView {
    /// Create a collapsed help view with default settings.
    pub fn new() -> Self {
        Self {
            expanded: false,
            style: HelpStyle::default(),
            separator: " \u{2022} ".to_string(), // " • "
            column_gap: "    ".to_string(),
            ellipsis: "\u{2026}".to_string(), // "…"
            max_width: None,
        }
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: HelpStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the separator between short help entries.
    pub fn with_separator(mut self, s: impl Into<String>) -> Self {
        self.separator = s.into();
        self
    }

    /// Truncate the short help line to `width` columns, ending it with the
    /// ellipsis when entries had to be dropped.
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set the ellipsis used when truncating.
    pub fn with_ellipsis(mut self, s: impl Into<String>) -> Self {
        self.ellipsis = s.into();
        self
    }

    pub fn set_max_width(&mut self, width: Option<usize>) {
        self.max_width = width;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip between short and full help.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Toggle if `key` dispatches to the table's help action.
    ///
    /// Returns whether the key was consumed. Any other key, matched or not,
    /// leaves the view untouched.
    pub fn handle<A, T>(&mut self, table: &T, key: &str) -> bool
    where
        A: Action,
        T: Matchable<A>,
    {
        match Dispatcher::dispatch(table, key) {
            Some(action) if action.is_help() => {
                self.toggle();
                tracing::debug!(expanded = self.expanded, "help toggled");
                true
            }
            _ => false,
        }
    }

    /// Render the current projection as plain text.
    ///
    /// Collapsed: one line of `key desc` entries joined by the separator.
    /// Expanded: one column per non-empty help group, rows joined by `\n`.
    /// Trailing whitespace is trimmed from every row.
    pub fn render<A, S>(&self, source: &S) -> String
    where
        A: Action,
        S: ShortHelpSource<A> + FullHelpSource<A>,
    {
        self.rows(source)
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|(_, text)| text.as_str()).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the current projection as styled text for a frame.
    pub fn render_text<A, S>(&self, source: &S) -> Text<'static>
    where
        A: Action,
        S: ShortHelpSource<A> + FullHelpSource<A>,
    {
        let lines: Vec<Line<'static>> = self
            .rows(source)
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(part, text)| Span::styled(text, self.part_style(part)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Text::from(lines)
    }

    /// Number of rows [`render`](HelpView::render) produces for `source`.
    pub fn height<A, S>(&self, source: &S) -> u16
    where
        A: Action,
        S: ShortHelpSource<A> + FullHelpSource<A>,
    {
        u16::try_from(self.rows(source).len()).unwrap_or(u16::MAX)
    }

    fn part_style(&self, part: Part) -> Style {
        match part {
            Part::Key => self.style.key,
            Part::Desc => self.style.description,
            Part::Sep | Part::Pad => self.style.separator,
        }
    }

    fn rows<A, S>(&self, source: &S) -> Vec<Row>
    where
        A: Action,
        S: ShortHelpSource<A> + FullHelpSource<A>,
    {
        if self.expanded {
            self.full_rows(source.full_help())
        } else {
            vec![self.short_row(source.short_help())]
        }
    }

    fn short_row<'a, A: Action>(&self, bindings: impl Iterator<Item = &'a Binding<A>>) -> Row {
        let mut row = Row::new();
        let mut width = 0;

        for binding in bindings.filter(|b| b.has_help()) {
            let sep = if row.is_empty() { "" } else { self.separator.as_str() };
            let entry = entry_parts(binding);
            let entry_width: usize = entry.iter().map(|(_, t)| t.width()).sum();

            if let Some(max) = self.max_width {
                if width + sep.width() + entry_width > max {
                    let tail = if row.is_empty() {
                        self.ellipsis.clone()
                    } else {
                        format!(" {}", self.ellipsis)
                    };
                    if width + tail.width() <= max {
                        row.push((Part::Sep, tail));
                    }
                    break;
                }
            }

            if !sep.is_empty() {
                row.push((Part::Sep, sep.to_string()));
            }
            row.extend(entry);
            width += sep.width() + entry_width;
        }
        row
    }

    fn full_rows<A: Action>(&self, groups: Vec<Vec<&Binding<A>>>) -> Vec<Row> {
        let columns: Vec<Column<'_>> = groups
            .iter()
            .map(|group| Column::new(group.iter().copied().filter(|b| b.has_help()).collect()))
            .filter(|column| !column.entries.is_empty())
            .collect();
        let height = columns.iter().map(|c| c.entries.len()).max().unwrap_or(0);

        (0..height)
            .map(|index| {
                let mut row = Row::new();
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        row.push((Part::Pad, self.column_gap.clone()));
                    }
                    column.push_cell(&mut row, index);
                }
                while matches!(row.last(), Some((Part::Pad, _))) {
                    row.pop();
                }
                row
            })
            .collect()
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

/// One full-help column with its key and description widths.
struct Column<'a> {
    entries: Vec<(&'a str, &'a str)>,
    key_width: usize,
    desc_width: usize,
}

impl<'a> Column<'a> {
    fn new<A: Action>(bindings: Vec<&'a Binding<A>>) -> Self {
        let entries: Vec<(&str, &str)> = bindings
            .into_iter()
            .map(|b| (b.help_key(), b.help_desc()))
            .collect();
        let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
        let desc_width = entries.iter().map(|(_, d)| d.width()).max().unwrap_or(0);
        Self {
            entries,
            key_width,
            desc_width,
        }
    }

    fn push_cell(&self, row: &mut Row, index: usize) {
        match self.entries.get(index) {
            Some((key, desc)) => {
                row.push((Part::Key, pad(key, self.key_width)));
                row.push((Part::Pad, " ".to_string()));
                row.push((Part::Desc, desc.to_string()));
                let fill = self.desc_width - desc.width();
                if fill > 0 {
                    row.push((Part::Pad, " ".repeat(fill)));
                }
            }
            None => row.push((Part::Pad, " ".repeat(self.key_width + 1 + self.desc_width))),
        }
    }
}

fn entry_parts<A: Action>(binding: &Binding<A>) -> Row {
    match (binding.help_key(), binding.help_desc()) {
        (key, "") => vec![(Part::Key, key.to_string())],
        ("", desc) => vec![(Part::Desc, desc.to_string())],
        (key, desc) => vec![
            (Part::Key, key.to_string()),
            (Part::Pad, " ".to_string()),
            (Part::Desc, desc.to_string()),
        ],
    }
}

fn pad(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(s.width())));
    out
}
