use client_state::{Notice, NoticeKind};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

const NOTICE_TIMEOUT_MS: u32 = 3_000;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
    /// Changes with every raised notice, restarting the dismiss timer.
    pub seq: u64,
    pub on_dismiss: Callback<()>,
}

/// Shows the latest notice and dismisses it after a few seconds.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with((props.seq, props.notice.is_some()), move |(_, showing)| {
            let timeout = showing
                .then(|| Timeout::new(NOTICE_TIMEOUT_MS, move || on_dismiss.emit(())));
            move || drop(timeout)
        });
    }

    let Some(notice) = &props.notice else {
        return html! {};
    };

    let class = match notice.kind {
        NoticeKind::Success => "toast toast-success",
        NoticeKind::Error => "toast toast-error",
    };
    let dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div {class} role="status">
            <span>{ &notice.message }</span>
            <button class="toast-close" onclick={dismiss}>{ "×" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub error: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.error {
        Some(error) => html! { <p class="error">{ error }</p> },
        None => html! {},
    }
}
