use client_state::{commit_draft, normalized_input, ops, view, Action, DraftCommit, ViewOptions};
use shared_types::{TodoList, MAX_CONTENT_LEN, MAX_TITLE_LEN};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::task_item::TaskItem;
use crate::services::api::ApiService;

#[derive(Properties, PartialEq)]
pub struct ListCardProps {
    /// The list as currently displayed (filtered and sorted).
    pub list: TodoList,
    /// (completed, total) over the unfiltered list.
    pub progress: (usize, usize),
    pub options: ViewOptions,
    pub api: ApiService,
    pub dispatch: Callback<Action>,
}

#[function_component(ListCard)]
pub fn list_card(props: &ListCardProps) -> Html {
    let expanded = use_state(|| false);
    let renaming = use_state(|| false);
    let title_draft = use_state(|| props.list.title.clone());
    let deleting = use_state(|| false);
    let new_task = use_state(String::new);
    let adding = use_state(|| false);
    // Enter and the following blur both commit; only the first may submit.
    let saving = use_mut_ref(|| false);

    let list_id = props.list.id;

    let toggle_expanded = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    let commit_rename = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let renaming = renaming.clone();
        let title_draft = title_draft.clone();
        let saving = saving.clone();
        let current = props.list.title.clone();
        Callback::from(move |_: ()| {
            if *saving.borrow() {
                return;
            }
            match commit_draft(&current, &title_draft) {
                DraftCommit::Unchanged => {
                    title_draft.set(current.clone());
                    renaming.set(false);
                }
                DraftCommit::Submit(title) => {
                    *saving.borrow_mut() = true;
                    let api = api.clone();
                    let dispatch = dispatch.clone();
                    let renaming = renaming.clone();
                    let title_draft = title_draft.clone();
                    let saving = saving.clone();
                    let current = current.clone();
                    spawn_local(async move {
                        let outcome = ops::rename_list(&api, list_id, &title).await;
                        match &outcome {
                            Ok(_) => title_draft.set(title),
                            Err(_) => title_draft.set(current),
                        }
                        renaming.set(false);
                        *saving.borrow_mut() = false;
                        dispatch.emit(Action::from_outcome(outcome));
                    });
                }
            }
        })
    };

    let start_rename = {
        let renaming = renaming.clone();
        let title_draft = title_draft.clone();
        let current = props.list.title.clone();
        Callback::from(move |_: MouseEvent| {
            title_draft.set(current.clone());
            renaming.set(true);
        })
    };

    let on_title_input = {
        let title_draft = title_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title_draft.set(input.value());
        })
    };

    let on_title_keydown = {
        let commit_rename = commit_rename.clone();
        let renaming = renaming.clone();
        let title_draft = title_draft.clone();
        let current = props.list.title.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => {
                e.prevent_default();
                commit_rename.emit(());
            }
            "Escape" => {
                title_draft.set(current.clone());
                renaming.set(false);
            }
            _ => {}
        })
    };

    let on_title_blur = {
        let commit_rename = commit_rename.clone();
        Callback::from(move |_: FocusEvent| commit_rename.emit(()))
    };

    let on_delete = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let deleting = deleting.clone();
        let title = props.list.title.clone();
        Callback::from(move |_: MouseEvent| {
            let message = format!("Delete list \"{}\" and all of its tasks?", title);
            if *deleting || !gloo::dialogs::confirm(&message) {
                return;
            }
            deleting.set(true);
            let api = api.clone();
            let dispatch = dispatch.clone();
            let deleting = deleting.clone();
            spawn_local(async move {
                let outcome = ops::delete_list(&api, list_id).await;
                deleting.set(false);
                dispatch.emit(Action::from_outcome(outcome));
            });
        })
    };

    let on_task_input = {
        let new_task = new_task.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_task.set(input.value());
        })
    };

    let on_add_task = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let new_task = new_task.clone();
        let adding = adding.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *adding {
                return;
            }
            let Some(content) = normalized_input(&new_task) else {
                return;
            };
            adding.set(true);
            let api = api.clone();
            let dispatch = dispatch.clone();
            let new_task = new_task.clone();
            let adding = adding.clone();
            spawn_local(async move {
                let outcome = ops::create_task(&api, list_id, &content).await;
                if outcome.is_ok() {
                    new_task.set(String::new());
                }
                adding.set(false);
                dispatch.emit(Action::from_outcome(outcome));
            });
        })
    };

    let list = &props.list;
    let (completed, total) = props.progress;
    let is_open = view::is_expanded(*expanded, &props.options);
    let filtering = props.options.filter_active();

    html! {
        <section class="list-card">
            <div class="list-header">
                if *renaming {
                    <input
                        type="text"
                        class="list-title-edit"
                        maxlength={MAX_TITLE_LEN.to_string()}
                        value={(*title_draft).clone()}
                        oninput={on_title_input}
                        onkeydown={on_title_keydown}
                        onblur={on_title_blur}
                    />
                } else {
                    <h3 class="list-title" ondblclick={start_rename.clone()}>{ &list.title }</h3>
                }
                <span class="list-progress">{ format!("{}/{}", completed, total) }</span>
                <button class="list-rename" onclick={start_rename}>{ "Rename" }</button>
                <button class="list-delete" disabled={*deleting} onclick={on_delete}>{ "Delete" }</button>
                <button
                    class="list-toggle"
                    disabled={filtering}
                    onclick={toggle_expanded}
                >
                    { if is_open { "Collapse" } else { "Expand" } }
                </button>
            </div>
            if is_open {
                <ul class="task-list">
                    { for list.tasks.iter().map(|task| html! {
                        <TaskItem
                            key={task.id.to_string()}
                            task={task.clone()}
                            list_id={list.id}
                            api={props.api.clone()}
                            dispatch={props.dispatch.clone()}
                        />
                    }) }
                </ul>
                <form class="task-form" onsubmit={on_add_task}>
                    <input
                        type="text"
                        placeholder="Add a task..."
                        maxlength={MAX_CONTENT_LEN.to_string()}
                        value={(*new_task).clone()}
                        oninput={on_task_input}
                    />
                    <button type="submit" disabled={*adding || new_task.trim().is_empty()}>
                        { "Add" }
                    </button>
                </form>
            }
        </section>
    }
}
