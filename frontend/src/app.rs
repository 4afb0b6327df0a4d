use yew::{html, Component, Context, Html};

use crate::components::registration::RegistrationForm;

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="page">
                <section class="hero">
                    <h1>{"Christmas Dinner"}</h1>
                    <p class="event-detail">{"Thu, 18 Dec | 7:00 PM"}</p>
                    <p class="event-detail">{"Auntie Lim's — Ruko Aniva Grande FA1-FA2, Gading Serpong"}</p>
                    <p class="event-detail">{"Gift exchange: bring a small gift (budget 20-30k)"}</p>
                </section>
                <section class="form-section">
                    <h2>{"Register Now"}</h2>
                    <RegistrationForm />
                </section>
            </div>
        }
    }
}
