use client_state::{normalized_input, ops, view, Action, ViewOptions};
use shared_types::MAX_TITLE_LEN;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::controls::Controls;
use crate::components::list_card::ListCard;
use crate::components::notice::{ErrorBanner, Toast};
use crate::components::sign_in::SignIn;
use crate::services::api::ApiService;
use crate::state::{AppStore, Session};

#[function_component(Home)]
pub fn home() -> Html {
    let session = use_context::<Session>().unwrap_or_default();

    match session.token {
        Some(token) => html! { <Board {token} on_sign_out={session.sign_out} /> },
        None => html! { <SignIn on_sign_in={session.sign_in} /> },
    }
}

#[derive(Properties, PartialEq)]
struct BoardProps {
    token: String,
    on_sign_out: Callback<()>,
}

/// The signed-in view: every list of the caller plus the controls over them.
#[function_component(Board)]
fn board(props: &BoardProps) -> Html {
    let store = use_reducer(AppStore::default);
    let options = use_state(ViewOptions::default);
    let new_title = use_state(String::new);
    let creating = use_state(|| false);

    let api = ApiService::new(props.token.clone());
    let dispatch = {
        let store = store.clone();
        Callback::from(move |action: Action| store.dispatch(action))
    };

    // Sync the user and load their lists whenever the token changes
    {
        let api = api.clone();
        let dispatch = dispatch.clone();
        use_effect_with(props.token.clone(), move |_| {
            spawn_local(async move {
                dispatch.emit(ops::sign_in(&api).await);
            });
            || ()
        });
    }

    let on_sign_out = {
        let dispatch = dispatch.clone();
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.emit(Action::SignedOut);
            on_sign_out.emit(());
        })
    };

    let on_title_input = {
        let new_title = new_title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_title.set(input.value());
        })
    };

    let on_create = {
        let api = api.clone();
        let dispatch = dispatch.clone();
        let new_title = new_title.clone();
        let creating = creating.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *creating {
                return;
            }
            let Some(title) = normalized_input(&new_title) else {
                return;
            };
            creating.set(true);
            let api = api.clone();
            let dispatch = dispatch.clone();
            let new_title = new_title.clone();
            let creating = creating.clone();
            spawn_local(async move {
                let outcome = ops::create_list(&api, &title).await;
                if outcome.is_ok() {
                    new_title.set(String::new());
                }
                creating.set(false);
                dispatch.emit(Action::from_outcome(outcome));
            });
        })
    };

    let on_options = {
        let options = options.clone();
        Callback::from(move |next: ViewOptions| options.set(next))
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: ()| dispatch.emit(Action::DismissNotice))
    };

    let body = match &store.lists {
        None => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Some(lists) => {
            let visible = view::derive_view(lists, &options);
            let empty_message = if lists.is_empty() {
                "No lists yet! Create one above."
            } else {
                "No tasks match the current filters."
            };

            html! {
                <>
                    <Controls
                        options={(*options).clone()}
                        show_search={view::has_any_tasks(lists)}
                        on_change={on_options}
                    />
                    if visible.is_empty() {
                        <p class="empty-state">{ empty_message }</p>
                    } else {
                        <div class="lists">
                            { for visible.into_iter().map(|list| {
                                let progress = store
                                    .list(list.id)
                                    .map(view::progress)
                                    .unwrap_or_default();
                                let key = list.id.to_string();
                                html! {
                                    <ListCard
                                        key={key}
                                        {list}
                                        {progress}
                                        options={(*options).clone()}
                                        api={api.clone()}
                                        dispatch={dispatch.clone()}
                                    />
                                }
                            }) }
                        </div>
                    }
                </>
            }
        }
    };

    html! {
        <div class="container">
            <div class="toolbar">
                <h2>{ "My Lists" }</h2>
                <button class="sign-out" onclick={on_sign_out}>{ "Sign out" }</button>
            </div>
            <ErrorBanner error={store.error.clone()} />
            <Toast notice={store.notice.clone()} seq={store.notice_seq} {on_dismiss} />
            <form class="list-form" onsubmit={on_create}>
                <input
                    type="text"
                    placeholder="New list title..."
                    maxlength={MAX_TITLE_LEN.to_string()}
                    value={(*new_title).clone()}
                    oninput={on_title_input}
                />
                <button type="submit" disabled={*creating || new_title.trim().is_empty()}>
                    { "Create list" }
                </button>
            </form>
            { body }
        </div>
    }
}
