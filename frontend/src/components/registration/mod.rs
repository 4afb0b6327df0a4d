//! Registration form: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, helpers, and the
//! submission sinks.

mod helpers;
mod messages;
mod sink;
mod state;
mod update;
mod view;

use yew::prelude::*;

pub use messages::Msg;
pub use state::RegistrationForm;

impl Component for RegistrationForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        RegistrationForm::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
