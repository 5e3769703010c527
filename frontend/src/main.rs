use std::rc::Rc;

use crate::app::{App, AppProps};
use crate::config::PageConfig;

mod actions;
mod app;
mod components;
mod config;
mod error;
mod files;
mod logging;
mod manager;
mod pdf;
mod shell;
mod staging;
#[cfg(test)]
mod test_support;
mod thumbnails;
mod tops_sheet;
mod transport;
mod viewer;

fn main() {
    logging::init(config::log_level_from_document());

    let config = match PageConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("page configuration unreadable, starting empty: {}", err);
            PageConfig::default()
        }
    };
    log::info!("managing {} file(s)", config.session.order.len());

    yew::Renderer::<App>::with_props(AppProps {
        config: Rc::new(config),
    })
    .render();
}
