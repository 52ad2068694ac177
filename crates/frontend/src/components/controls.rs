use client_state::{SortDirection, ViewOptions};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub options: ViewOptions,
    /// The search box only appears once some list has a task.
    pub show_search: bool,
    pub on_change: Callback<ViewOptions>,
}

fn direction_value(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    }
}

fn parse_direction(value: &str) -> SortDirection {
    match value {
        "desc" => SortDirection::Descending,
        _ => SortDirection::Ascending,
    }
}

fn sort_select(label: &str, current: SortDirection, onchange: Callback<Event>) -> Html {
    html! {
        <label class="sort-control">
            { label }
            <select {onchange}>
                { for [SortDirection::Ascending, SortDirection::Descending].into_iter().map(|direction| html! {
                    <option
                        value={direction_value(direction)}
                        selected={direction == current}
                    >
                        { direction.label() }
                    </option>
                }) }
            </select>
        </label>
    }
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let update = |apply: fn(&mut ViewOptions, Event)| {
        let options = props.options.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut next = options.clone();
            apply(&mut next, e);
            on_change.emit(next);
        })
    };

    let on_search = {
        let options = props.options.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(ViewOptions {
                search: input.value(),
                ..options.clone()
            });
        })
    };

    let on_incomplete = update(|options, e| {
        let input: HtmlInputElement = e.target_unchecked_into();
        options.incomplete_only = input.checked();
    });
    let on_list_order = update(|options, e| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        options.list_order = parse_direction(&select.value());
    });
    let on_task_order = update(|options, e| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        options.task_order = parse_direction(&select.value());
    });

    html! {
        <div class="controls">
            if props.show_search {
                <input
                    type="search"
                    class="search"
                    placeholder="Search tasks..."
                    value={props.options.search.clone()}
                    oninput={on_search}
                />
            }
            <label class="filter-control">
                <input
                    type="checkbox"
                    checked={props.options.incomplete_only}
                    onchange={on_incomplete}
                />
                { "Incomplete only" }
            </label>
            { sort_select("Lists", props.options.list_order, on_list_order) }
            { sort_select("Tasks", props.options.task_order, on_task_order) }
        </div>
    }
}
