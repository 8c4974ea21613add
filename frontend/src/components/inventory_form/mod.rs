//! Inventory form: cascading location selectors, the map point selector and
//! the archival description fields.
//!
//! All edits go through the shared `common::form` reducer; this component only
//! turns DOM events into `FormEvent`s and renders the result.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{InventoryFormProps, SharedLookup};
pub use state::InventoryForm;

impl Component for InventoryForm {
    type Message = Msg;
    type Properties = InventoryFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        InventoryForm::new(ctx.props().initial.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().record_key != old_props.record_key {
            ctx.link().send_message(Msg::Load(ctx.props().initial.clone()));
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        update::set_window_dirty_flag(false);
    }
}
