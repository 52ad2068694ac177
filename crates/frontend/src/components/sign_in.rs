use client_state::normalized_input;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    pub on_sign_in: Callback<String>,
}

/// Accepts the identity provider's session token for this browser.
#[function_component(SignIn)]
pub fn sign_in(props: &SignInProps) -> Html {
    let token = use_state(String::new);

    let on_input = {
        let token = token.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            token.set(input.value());
        })
    };

    let on_submit = {
        let token = token.clone();
        let on_sign_in = props.on_sign_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(value) = normalized_input(&token) {
                on_sign_in.emit(value);
            }
        })
    };

    html! {
        <div class="container sign-in">
            <h2>{ "Sign in" }</h2>
            <p>{ "Paste the session token issued by your identity provider." }</p>
            <form onsubmit={on_submit}>
                <input
                    type="password"
                    placeholder="Session token"
                    value={(*token).clone()}
                    oninput={on_input}
                />
                <button type="submit" disabled={token.trim().is_empty()}>{ "Sign in" }</button>
            </form>
        </div>
    }
}
