use std::ops::Deref;
use std::rc::Rc;

use client_state::{Action, ListsState};
use yew::prelude::*;

/// `ListsState` adapted to Yew's `use_reducer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppStore(ListsState);

impl Reducible for AppStore {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        Rc::new(AppStore(self.0.apply(action)))
    }
}

impl Deref for AppStore {
    type Target = ListsState;

    fn deref(&self) -> &ListsState {
        &self.0
    }
}

/// Sign-in state shared through context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub sign_in: Callback<String>,
    pub sign_out: Callback<()>,
}
