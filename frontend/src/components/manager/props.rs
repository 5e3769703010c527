use std::rc::Rc;

use yew::prelude::*;

use crate::config::PageConfig;

/// Properties for `PdfManager`: the configuration read from the host page at
/// startup.
#[derive(Properties, PartialEq, Clone)]
pub struct ManagerProps {
    pub config: Rc<PageConfig>,
}
