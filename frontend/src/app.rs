use std::rc::Rc;

use yew::{html, Component, Context, Html, Properties};

use crate::components::manager::PdfManager;
use crate::config::PageConfig;

pub struct App;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<PageConfig>,
}

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <PdfManager config={ctx.props().config.clone()} />
        }
    }
}
