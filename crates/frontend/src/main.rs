mod components;
mod pages;
mod router;
mod services;
mod state;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::router::{switch, Route};
use crate::services::auth;
use crate::state::Session;

#[function_component(App)]
fn app() -> Html {
    let token = use_state(auth::stored_token);

    let session = {
        let sign_in = {
            let token = token.clone();
            Callback::from(move |value: String| {
                auth::store_token(&value);
                token.set(Some(value));
            })
        };
        let sign_out = {
            let token = token.clone();
            Callback::from(move |_: ()| {
                auth::clear_token();
                token.set(None);
            })
        };
        Session {
            token: (*token).clone(),
            sign_in,
            sign_out,
        }
    };

    html! {
        <BrowserRouter>
            <ContextProvider<Session> context={session}>
                <div id="app">
                    <components::header::Header />
                    <yew_router::Switch<Route> render={switch} />
                </div>
            </ContextProvider<Session>>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
