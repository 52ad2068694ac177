use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>
                    <Link<Route> to={Route::Home}>{ "To-Do Lists" }</Link<Route>>
                </h1>
            </div>
        </header>
    }
}
