use yew::{html, Callback, Component, Context, Html, MouseEvent, Properties};

/// A sheet sliding in from the top over a dimmed backdrop. Visibility is
/// driven by the `open` prop; clicking the backdrop asks the parent to close.
pub struct ModalSheet;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for ModalSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if !props.open {
            return html! {};
        }

        let on_backdrop = props.on_close.reform(|_: MouseEvent| ());
        let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

        html! {
            <div class="top-sheet-backdrop" onclick={on_backdrop}>
                <div class="top-sheet show" onclick={keep_open}>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}
