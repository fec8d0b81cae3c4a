use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::storage::Storage;
use crate::utils::{cmp_ignore_case, contains_ignore_case};

use super::measure;

/// Default column width in px when nothing is stored.
pub const DEFAULT_COLUMN_WIDTH: u16 = 150;

/// Resize clamp bounds in px.
pub const MIN_COLUMN_WIDTH: u16 = 50;
pub const MAX_COLUMN_WIDTH: u16 = 600;

/// Horizontal cell padding added on top of measured text, in px.
const CELL_PADDING: f32 = 32.0;

/// Storage key prefix for persisted width maps. Scoped per table id so
/// two tables never clobber each other's layout.
const WIDTHS_KEY_PREFIX: &str = "table-column-widths";

/// A single cell's value. Numbers sort numerically; everything else
/// sorts by its string form.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0"
            CellValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Capability a dataset row must provide: a cell value for each
/// declared column key.
pub trait TableRow {
    fn cell(&self, column: &str) -> CellValue;
}

/// Declared column. A fixed width pins the column and disables its
/// resize handling.
#[derive(Debug, Clone)]
pub struct Column {
    pub key: &'static str,
    pub fixed_width: Option<u16>,
}

impl Column {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            fixed_width: None,
        }
    }

    pub fn fixed(key: &'static str, width: u16) -> Self {
        Self {
            key,
            fixed_width: Some(width),
        }
    }
}

#[derive(Debug)]
struct DragState {
    column: &'static str,
    start_width: u16,
}

/// Interaction state for one table instance: sort order, filter text,
/// and per-column width overrides with optional persistence.
pub struct TableController {
    columns: Vec<Column>,
    sort_column: Option<&'static str>,
    sort_ascending: bool,
    filter: String,
    widths: HashMap<String, u16>,
    drag: Option<DragState>,
    persistence: Option<(Storage, String)>,
}

impl TableController {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            sort_column: None,
            sort_ascending: true,
            filter: String::new(),
            widths: HashMap::new(),
            drag: None,
            persistence: None,
        }
    }

    /// Build a controller whose width overrides are seeded from and
    /// written back to storage under a per-table key.
    pub fn with_persistence(columns: Vec<Column>, storage: Storage, table_id: &str) -> Self {
        let key = format!("{}.{}", WIDTHS_KEY_PREFIX, table_id);
        let mut controller = Self::new(columns);
        controller.widths = Self::load_widths(&storage, &key, &controller.columns);
        controller.persistence = Some((storage, key));
        controller
    }

    fn load_widths(storage: &Storage, key: &str, columns: &[Column]) -> HashMap<String, u16> {
        let Some(raw) = storage.get(key) else {
            return HashMap::new();
        };
        match serde_json::from_str::<HashMap<String, u16>>(&raw) {
            Ok(mut widths) => {
                // Keep the invariant: stored keys are a subset of the
                // declared columns, clamped to the resize bounds.
                widths.retain(|k, _| columns.iter().any(|c| c.key == k));
                for width in widths.values_mut() {
                    *width = (*width).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
                }
                widths
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding unparseable stored column widths");
                HashMap::new()
            }
        }
    }

    fn persist_widths(&self) {
        if let Some((storage, key)) = &self.persistence {
            match serde_json::to_string(&self.widths) {
                Ok(raw) => {
                    if let Err(e) = storage.set(key, &raw) {
                        warn!(key = %key, error = %e, "Failed to persist column widths");
                    }
                }
                Err(e) => warn!(error = %e, "Failed to serialize column widths"),
            }
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    // ===== Sorting =====

    /// Select a sort column. Re-selecting the current column flips the
    /// direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        let Some(column) = self.column(column).map(|c| c.key) else {
            return;
        };
        if self.sort_column == Some(column) {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = Some(column);
            self.sort_ascending = true;
        }
    }

    pub fn sort_column(&self) -> Option<&'static str> {
        self.sort_column
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    // ===== Filtering =====

    /// Replace the free-text filter.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Produce the visible rows: sorted first, then filtered. With no
    /// sort column the input order is preserved; the stable sort keeps
    /// input order for ties.
    pub fn view<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut visible: Vec<&R> = rows.iter().collect();

        if let Some(key) = self.sort_column {
            visible.sort_by(|a, b| {
                let ord = compare_cells(&a.cell(key), &b.cell(key));
                if self.sort_ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        if !self.filter.is_empty() {
            visible.retain(|row| {
                self.columns
                    .iter()
                    .any(|c| contains_ignore_case(&row.cell(c.key).to_string(), &self.filter))
            });
        }

        visible
    }

    // ===== Widths =====

    /// Effective width of a column in px. A caller-pinned width wins
    /// over stored overrides and the default.
    pub fn width_of(&self, column: &str) -> u16 {
        if let Some(c) = self.column(column) {
            if let Some(fixed) = c.fixed_width {
                return fixed;
            }
        }
        self.widths
            .get(column)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn is_resizable(&self, column: &str) -> bool {
        self.column(column).is_some_and(|c| c.fixed_width.is_none())
    }

    /// Begin a resize drag on a column edge. Returns false for pinned
    /// or unknown columns.
    pub fn begin_resize(&mut self, column: &str) -> bool {
        if !self.is_resizable(column) {
            return false;
        }
        let Some(column) = self.column(column).map(|c| c.key) else {
            return false;
        };
        self.drag = Some(DragState {
            column,
            start_width: self.width_of(column),
        });
        true
    }

    /// Apply the current drag offset. Only the dragged column moves;
    /// the result is clamped to the resize bounds and written back to
    /// storage.
    pub fn drag_resize(&mut self, delta_px: i32) {
        let Some(drag) = &self.drag else {
            return;
        };
        let column = drag.column;
        let target = i32::from(drag.start_width) + delta_px;
        let clamped = target.clamp(i32::from(MIN_COLUMN_WIDTH), i32::from(MAX_COLUMN_WIDTH)) as u16;
        if self.widths.get(column) == Some(&clamped) {
            return;
        }
        self.widths.insert(column.to_string(), clamped);
        self.persist_widths();
    }

    pub fn end_resize(&mut self) {
        self.drag = None;
    }

    /// One-shot resize by a delta, for keyboard-driven adjustment.
    pub fn resize_by(&mut self, column: &str, delta_px: i32) {
        if self.begin_resize(column) {
            self.drag_resize(delta_px);
            self.end_resize();
        }
    }

    /// Fit a column to its content: the wider of the header label and
    /// the widest cell, each padded, clamped to the resize bounds.
    pub fn auto_fit<R: TableRow>(&mut self, column: &str, rows: &[R]) {
        if !self.is_resizable(column) {
            return;
        }
        let Some(column) = self.column(column).map(|c| c.key) else {
            return;
        };

        let header_width = measure::bold_text_width(&column.to_uppercase()) + CELL_PADDING;
        let widest_cell = rows
            .iter()
            .map(|row| measure::text_width(&row.cell(column).to_string()) + CELL_PADDING)
            .fold(0.0_f32, f32::max);

        let fitted = header_width.max(widest_cell).round() as i32;
        let clamped = fitted.clamp(i32::from(MIN_COLUMN_WIDTH), i32::from(MAX_COLUMN_WIDTH)) as u16;
        debug!(column, width = clamped, "Auto-fit column");
        self.widths.insert(column.to_string(), clamped);
        self.persist_widths();
    }
}

/// Order two cells: numerically when both sides are numbers, otherwise
/// by case-insensitive string comparison of the rendered values.
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => cmp_ignore_case(&a.to_string(), &b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: &'static str,
        age: u32,
        email: &'static str,
    }

    impl TableRow for Person {
        fn cell(&self, column: &str) -> CellValue {
            match column {
                "name" => CellValue::Text(self.name.to_string()),
                "age" => CellValue::Number(f64::from(self.age)),
                "email" => CellValue::Text(self.email.to_string()),
                _ => CellValue::Text(String::new()),
            }
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "Alice", age: 30, email: "alice@example.com" },
            Person { name: "Bob", age: 25, email: "bob@example.com" },
            Person { name: "Charlie", age: 35, email: "charlie@example.com" },
        ]
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("name"), Column::new("age"), Column::new("email")]
    }

    fn ages<R: TableRow>(rows: &[&R]) -> Vec<i64> {
        rows.iter()
            .map(|r| r.cell("age").as_number().unwrap_or(0.0) as i64)
            .collect()
    }

    #[test]
    fn test_no_sort_preserves_input_order() {
        let controller = TableController::new(columns());
        let rows = people();
        assert_eq!(ages(&controller.view(&rows)), vec![30, 25, 35]);
    }

    #[test]
    fn test_numeric_sort_and_toggle() {
        let mut controller = TableController::new(columns());
        let rows = people();

        controller.toggle_sort("age");
        assert_eq!(ages(&controller.view(&rows)), vec![25, 30, 35]);

        // Same column again reverses
        controller.toggle_sort("age");
        assert_eq!(ages(&controller.view(&rows)), vec![35, 30, 25]);

        // A different column resets to ascending
        controller.toggle_sort("name");
        assert!(controller.sort_ascending());
        assert_eq!(controller.sort_column(), Some("name"));
    }

    #[test]
    fn test_string_sort_is_case_insensitive() {
        let mut controller = TableController::new(columns());
        let rows = vec![
            Person { name: "charlie", age: 1, email: "" },
            Person { name: "Bob", age: 2, email: "" },
            Person { name: "alice", age: 3, email: "" },
        ];
        controller.toggle_sort("name");
        let names: Vec<String> = controller
            .view(&rows)
            .iter()
            .map(|r| r.cell("name").to_string())
            .collect();
        assert_eq!(names, vec!["alice", "Bob", "charlie"]);
    }

    #[test]
    fn test_filter_matches_any_column() {
        let mut controller = TableController::new(columns());
        let rows = people();

        controller.set_filter("bob");
        let visible = controller.view(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cell("name").to_string(), "Bob");

        // Numbers match through their string form
        controller.set_filter("35");
        let visible = controller.view(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].cell("name").to_string(), "Charlie");

        controller.set_filter("");
        assert_eq!(controller.view(&rows).len(), 3);
    }

    #[test]
    fn test_sort_then_filter_pipeline() {
        let mut controller = TableController::new(columns());
        let rows = people();

        controller.toggle_sort("age");
        controller.set_filter("example.com");
        // Filter applies to the sorted result without disturbing order
        assert_eq!(ages(&controller.view(&rows)), vec![25, 30, 35]);
    }

    #[test]
    fn test_resize_clamps_low_and_high() {
        let mut controller = TableController::new(columns());

        assert!(controller.begin_resize("age"));
        controller.drag_resize(-10_000);
        controller.end_resize();
        assert_eq!(controller.width_of("age"), MIN_COLUMN_WIDTH);

        assert!(controller.begin_resize("age"));
        controller.drag_resize(10_000);
        controller.end_resize();
        assert_eq!(controller.width_of("age"), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_drag_moves_only_its_column() {
        let mut controller = TableController::new(columns());
        controller.resize_by("age", 40);
        assert_eq!(controller.width_of("age"), DEFAULT_COLUMN_WIDTH + 40);
        assert_eq!(controller.width_of("name"), DEFAULT_COLUMN_WIDTH);
        assert_eq!(controller.width_of("email"), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_fixed_width_overrides_and_disables_resize() {
        let mut controller = TableController::new(vec![
            Column::fixed("name", 240),
            Column::new("age"),
            Column::new("email"),
        ]);

        assert_eq!(controller.width_of("name"), 240);
        assert!(!controller.is_resizable("name"));
        assert!(!controller.begin_resize("name"));

        controller.resize_by("name", 100);
        assert_eq!(controller.width_of("name"), 240);

        controller.auto_fit("name", &people());
        assert_eq!(controller.width_of("name"), 240);
    }

    #[test]
    fn test_auto_fit_tracks_content_and_clamps() {
        let mut controller = TableController::new(columns());
        let rows = people();

        controller.auto_fit("email", &rows);
        let email_width = controller.width_of("email");
        controller.auto_fit("age", &rows);
        let age_width = controller.width_of("age");

        // Long email addresses need more room than two-digit ages
        assert!(email_width > age_width);
        assert!(age_width >= MIN_COLUMN_WIDTH);
        assert!(email_width <= MAX_COLUMN_WIDTH);

        // Pathologically long content clamps to the maximum
        let long = vec![Person {
            name: "x",
            age: 1,
            email: "an-extremely-long-address-that-never-ends-and-keeps-going-forever@subdomain.of.a.subdomain.of.another.subdomain.example.com",
        }];
        controller.auto_fit("email", &long);
        assert_eq!(controller.width_of("email"), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_widths_persist_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().join("storage"));

        let mut controller =
            TableController::with_persistence(columns(), storage.clone(), "people");
        controller.resize_by("age", 75);
        assert_eq!(controller.width_of("age"), DEFAULT_COLUMN_WIDTH + 75);

        // A fresh controller for the same table id sees the override
        let reloaded = TableController::with_persistence(columns(), storage.clone(), "people");
        assert_eq!(reloaded.width_of("age"), DEFAULT_COLUMN_WIDTH + 75);

        // A different table id does not
        let other = TableController::with_persistence(columns(), storage, "other");
        assert_eq!(other.width_of("age"), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_stored_widths_for_unknown_columns_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().join("storage"));
        storage
            .set(
                "table-column-widths.people",
                r#"{"age": 99, "ghost": 300, "email": 5000}"#,
            )
            .expect("seed");

        let controller = TableController::with_persistence(columns(), storage, "people");
        assert_eq!(controller.width_of("age"), 99);
        // Out-of-range stored values clamp on load
        assert_eq!(controller.width_of("email"), MAX_COLUMN_WIDTH);
        // "ghost" was dropped entirely
        assert_eq!(controller.width_of("name"), DEFAULT_COLUMN_WIDTH);
    }
}
