//! Columnar rendering of role names.

/// Names per column in a role listing.
pub const DEFAULT_COLUMN_SIZE: usize = 3;

/// Inline fields a single embed can carry.
pub const MAX_COLUMNS_PER_PAGE: usize = 25;

/// Embeds a single message can carry.
pub const MAX_PAGES: usize = 10;

/// Partition `names` into consecutive groups of `group_size`.
///
/// Order is preserved and the last group may be shorter. A `group_size` of
/// zero is treated as one.
///
/// # Examples
///
/// ```
/// use rolecall_core::chunk_names;
///
/// let names: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
/// let groups = chunk_names(&names, 3);
/// assert_eq!(groups, vec![vec!["a", "b", "c"], vec!["d"]]);
/// ```
pub fn chunk_names(names: &[String], group_size: usize) -> Vec<Vec<String>> {
    names
        .chunks(group_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}

/// Render each group as one newline-joined column.
pub fn render_columns(names: &[String], group_size: usize) -> Vec<String> {
    chunk_names(names, group_size)
        .into_iter()
        .map(|group| group.join("\n"))
        .collect()
}

/// Characters all embeds of one message may hold together, counting titles,
/// field names, and field values.
pub const MAX_EMBED_CHARS: usize = 6000;

/// Characters each field name takes (a single zero-width space).
pub const FIELD_NAME_CHARS: usize = 1;

/// Lays out columns page by page while tracking the message-wide budget.
struct PageLayout {
    per_page: usize,
    title_chars: usize,
    pages: Vec<Vec<String>>,
    columns: usize,
    chars: usize,
}

impl PageLayout {
    fn new(per_page: usize, title: &str) -> Self {
        Self {
            per_page,
            title_chars: title.chars().count(),
            pages: Vec::new(),
            columns: 0,
            chars: 0,
        }
    }

    fn slots_left(&self) -> usize {
        (self.per_page * MAX_PAGES).saturating_sub(self.columns)
    }

    fn opens_page(&self) -> bool {
        self.pages.last().is_none_or(|page| page.len() >= self.per_page)
    }

    /// Characters `column` adds, including the title of a page it opens.
    fn cost(&self, column: &str) -> usize {
        let field = FIELD_NAME_CHARS + column.chars().count();
        if self.opens_page() {
            field + self.title_chars
        } else {
            field
        }
    }

    /// Whether `column` fits while keeping `spare_slots` and `spare_chars` free.
    fn fits(&self, column: &str, spare_slots: usize, spare_chars: usize) -> bool {
        self.slots_left() > spare_slots
            && self.chars + self.cost(column) + spare_chars <= MAX_EMBED_CHARS
    }

    fn push(&mut self, column: String) {
        self.chars += self.cost(&column);
        self.columns += 1;
        if self.opens_page() {
            self.pages.push(vec![column]);
        } else if let Some(page) = self.pages.last_mut() {
            page.push(column);
        }
    }
}

/// Line appended when a listing is cut short.
fn overflow_note(omitted: usize) -> String {
    format!("\u{2026}and {} more", omitted)
}

/// Split rendered columns into pages of at most `per_page` columns, each page
/// headed by `title`.
///
/// The result respects [`MAX_PAGES`] and [`MAX_EMBED_CHARS`]. When the
/// columns do not all fit, trailing columns are dropped and a final
/// `…and N more` column counts the names left out.
///
/// # Examples
///
/// ```
/// use rolecall_core::paginate;
///
/// let columns = vec!["Blue\nRed".to_string(), "Teal".to_string()];
/// let pages = paginate(columns, 25, "Available Roles");
/// assert_eq!(pages, vec![vec!["Blue\nRed", "Teal"]]);
/// ```
pub fn paginate(columns: Vec<String>, per_page: usize, title: &str) -> Vec<Vec<String>> {
    let per_page = per_page.max(1);

    let mut layout = PageLayout::new(per_page, title);
    for column in &columns {
        if !layout.fits(column, 0, 0) {
            break;
        }
        layout.push(column.clone());
    }
    if layout.columns == columns.len() {
        return layout.pages;
    }

    // Reserve room for the note as if it opened a page of its own.
    let total_names: usize = columns.iter().map(|column| column.lines().count()).sum();
    let note_reserve =
        layout.title_chars + FIELD_NAME_CHARS + overflow_note(total_names).chars().count();

    let mut layout = PageLayout::new(per_page, title);
    let mut remaining = columns.into_iter().peekable();
    while let Some(column) = remaining.next_if(|column| layout.fits(column, 1, note_reserve)) {
        layout.push(column);
    }

    let omitted: usize = remaining.map(|column| column.lines().count()).sum();
    layout.push(overflow_note(omitted));
    layout.pages
}
