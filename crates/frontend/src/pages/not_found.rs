use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <h2>{ "Page not found" }</h2>
            <Link<Route> to={Route::Home}>{ "Back to your lists" }</Link<Route>>
        </div>
    }
}
