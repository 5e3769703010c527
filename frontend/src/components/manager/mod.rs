//! PDF manager page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! On first render the thumbnails are drawn (staggered) and the first file in
//! the list is opened. Later renders redraw thumbnails only when the list
//! changed, and scroll the active entry into view after it was opened.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use helpers::take_files;
pub use messages::Msg;
pub use props::ManagerProps;
pub use state::PdfManager;

use crate::thumbnails::schedule_batch;

impl Component for PdfManager {
    type Message = Msg;
    type Properties = ManagerProps;

    fn create(ctx: &Context<Self>) -> Self {
        PdfManager::new(ctx.props().config.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if self.thumbs_dirty {
            self.thumbs_dirty = false;
            schedule_batch(self.manager.viewer().engine(), self.thumbnail_targets());
        }
        if first_render {
            update::open_first(self, ctx);
        } else if self.scroll_pending && self.manager.files().active().is_some() {
            self.scroll_pending = false;
            if let Some(entry) = self.active_entry() {
                helpers::scroll_into_view(&entry);
            }
        }
    }
}
