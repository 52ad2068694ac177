//! Filtered and sorted presentation of the loaded lists.

use std::cmp::Ordering;

use shared_types::TodoList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// A to Z
    #[default]
    Ascending,
    /// Z to A
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "A-Z",
            SortDirection::Descending => "Z-A",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub search: String,
    pub incomplete_only: bool,
    pub list_order: SortDirection,
    pub task_order: SortDirection,
}

impl ViewOptions {
    pub fn query(&self) -> Option<String> {
        let query = self.search.trim();
        (!query.is_empty()).then(|| query.to_lowercase())
    }

    /// True while a search query or the incomplete-only toggle narrows tasks.
    pub fn filter_active(&self) -> bool {
        self.incomplete_only || self.query().is_some()
    }
}

/// Apply search, the incomplete filter, then sorting. Lists left without
/// tasks are hidden only while a filter is active.
pub fn derive_view(lists: &[TodoList], options: &ViewOptions) -> Vec<TodoList> {
    let query = options.query();
    let filtering = options.filter_active();

    let mut view: Vec<TodoList> = lists
        .iter()
        .filter_map(|list| {
            let mut list = list.clone();
            if let Some(query) = &query {
                list.tasks
                    .retain(|task| task.content.to_lowercase().contains(query.as_str()));
            }
            if options.incomplete_only {
                list.tasks.retain(|task| !task.completed);
            }
            if filtering && list.tasks.is_empty() {
                return None;
            }
            list.tasks.sort_by(|a, b| {
                options
                    .task_order
                    .apply(compare_text(&a.content, &b.content))
            });
            Some(list)
        })
        .collect();

    view.sort_by(|a, b| options.list_order.apply(compare_text(&a.title, &b.title)));
    view
}

/// Case-insensitive comparison, falling back to the raw text so the order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Cards are always expanded while filtering so matches are visible.
pub fn is_expanded(user_expanded: bool, options: &ViewOptions) -> bool {
    user_expanded || options.filter_active()
}

/// (completed, total) for a list header.
pub fn progress(list: &TodoList) -> (usize, usize) {
    (list.completed_count(), list.tasks.len())
}

pub fn has_any_tasks(lists: &[TodoList]) -> bool {
    lists.iter().any(|list| !list.tasks.is_empty())
}
