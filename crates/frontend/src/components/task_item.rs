use client_state::{commit_draft, ops, Action, DraftCommit};
use shared_types::{Task, MAX_CONTENT_LEN};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiService;

#[derive(Properties, PartialEq)]
pub struct TaskItemProps {
    pub task: Task,
    pub list_id: Uuid,
    pub api: ApiService,
    pub dispatch: Callback<Action>,
}

#[function_component(TaskItem)]
pub fn task_item(props: &TaskItemProps) -> Html {
    let editing = use_state(|| false);
    let draft = use_state(|| props.task.content.clone());
    let toggling = use_state(|| false);
    let deleting = use_state(|| false);
    // Enter and the following blur both commit; only the first may submit.
    let saving = use_mut_ref(|| false);

    let task_id = props.task.id;
    let list_id = props.list_id;

    let on_toggle = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let toggling = toggling.clone();
        let completed = !props.task.completed;
        Callback::from(move |_: Event| {
            if *toggling {
                return;
            }
            toggling.set(true);
            let api = api.clone();
            let dispatch = dispatch.clone();
            let toggling = toggling.clone();
            spawn_local(async move {
                let outcome = ops::set_task_completed(&api, list_id, task_id, completed).await;
                toggling.set(false);
                dispatch.emit(Action::from_outcome(outcome));
            });
        })
    };

    let commit = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let editing = editing.clone();
        let draft = draft.clone();
        let saving = saving.clone();
        let current = props.task.content.clone();
        Callback::from(move |_: ()| {
            if *saving.borrow() {
                return;
            }
            match commit_draft(&current, &draft) {
                DraftCommit::Unchanged => {
                    draft.set(current.clone());
                    editing.set(false);
                }
                DraftCommit::Submit(content) => {
                    *saving.borrow_mut() = true;
                    let api = api.clone();
                    let dispatch = dispatch.clone();
                    let editing = editing.clone();
                    let draft = draft.clone();
                    let saving = saving.clone();
                    let current = current.clone();
                    spawn_local(async move {
                        let outcome = ops::edit_task_content(&api, list_id, task_id, &content).await;
                        match &outcome {
                            Ok(_) => draft.set(content),
                            Err(_) => draft.set(current),
                        }
                        editing.set(false);
                        *saving.borrow_mut() = false;
                        dispatch.emit(Action::from_outcome(outcome));
                    });
                }
            }
        })
    };

    let on_delete = {
        let api = props.api.clone();
        let dispatch = props.dispatch.clone();
        let deleting = deleting.clone();
        let content = props.task.content.clone();
        Callback::from(move |_: MouseEvent| {
            if *deleting || !gloo::dialogs::confirm(&format!("Delete task \"{}\"?", content)) {
                return;
            }
            deleting.set(true);
            let api = api.clone();
            let dispatch = dispatch.clone();
            let deleting = deleting.clone();
            spawn_local(async move {
                let outcome = ops::delete_task(&api, list_id, task_id).await;
                deleting.set(false);
                dispatch.emit(Action::from_outcome(outcome));
            });
        })
    };

    let start_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let current = props.task.content.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(current.clone());
            editing.set(true);
        })
    };

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_keydown = {
        let commit = commit.clone();
        let editing = editing.clone();
        let draft = draft.clone();
        let current = props.task.content.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => {
                e.prevent_default();
                commit.emit(());
            }
            "Escape" => {
                draft.set(current.clone());
                editing.set(false);
            }
            _ => {}
        })
    };

    let on_blur = {
        let commit = commit.clone();
        Callback::from(move |_: FocusEvent| commit.emit(()))
    };

    let task = &props.task;
    html! {
        <li class={classes!("task-item", task.completed.then_some("completed"))}>
            <input
                type="checkbox"
                checked={task.completed}
                disabled={*toggling}
                onchange={on_toggle}
            />
            if *editing {
                <input
                    type="text"
                    class="task-edit"
                    maxlength={MAX_CONTENT_LEN.to_string()}
                    value={(*draft).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    onblur={on_blur}
                />
            } else {
                <span class="task-content" ondblclick={start_edit}>{ &task.content }</span>
            }
            <button class="task-delete" disabled={*deleting} onclick={on_delete}>{ "Delete" }</button>
        </li>
    }
}
