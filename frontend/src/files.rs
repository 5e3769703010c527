//! The ordered list of documents shown in the sidebar, and which one is
//! active. The sidebar is rendered from this list; nothing reads the DOM back.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileList {
    order: Vec<String>,
    active: Option<String>,
}

impl FileList {
    /// Blank names and repeated names are dropped.
    pub fn new(order: Vec<String>) -> Self {
        let mut list = FileList::default();
        list.restore(order);
        list
    }

    pub fn entries(&self) -> &[String] {
        &self.order
    }

    pub fn first(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.order.iter().any(|f| f == file)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, file: &str) -> bool {
        self.active.as_deref() == Some(file)
    }

    /// Clears the marker and puts it on `file` when the list has it.
    pub fn mark_active(&mut self, file: Option<&str>) {
        self.active = file.filter(|f| self.contains(f)).map(str::to_string);
    }

    pub fn remove(&mut self, file: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|f| f != file);
        if self.is_active(file) {
            self.active = None;
        }
        self.order.len() != before
    }

    /// Swaps `file` with its neighbour. Returns `false` when it is already at
    /// that end of the list or not in it.
    pub fn move_entry(&mut self, file: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.order.iter().position(|f| f == file) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.order.len() => index + 1,
            _ => return false,
        };
        self.order.swap(index, target);
        true
    }

    /// Replaces the order, keeping the active marker if its file survives.
    pub fn restore(&mut self, order: Vec<String>) {
        self.order.clear();
        for file in order {
            if !file.trim().is_empty() && !self.order.contains(&file) {
                self.order.push(file);
            }
        }
        let active = self.active.take();
        self.mark_active(active.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> FileList {
        FileList::new(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn new_skips_blank_and_repeated_names() {
        let files = list(&["a.pdf", "", "b.pdf", "a.pdf"]);
        assert_eq!(files.entries(), ["a.pdf", "b.pdf"]);
        assert_eq!(files.first(), Some("a.pdf"));
    }

    #[test]
    fn mark_active_moves_the_single_marker() {
        let mut files = list(&["a.pdf", "b.pdf"]);
        files.mark_active(Some("a.pdf"));
        files.mark_active(Some("b.pdf"));
        assert!(!files.is_active("a.pdf"));
        assert!(files.is_active("b.pdf"));

        files.mark_active(Some("gone.pdf"));
        assert_eq!(files.active(), None);

        files.mark_active(Some("a.pdf"));
        files.mark_active(None);
        assert_eq!(files.active(), None);
    }

    #[test]
    fn removing_the_active_entry_clears_the_marker() {
        let mut files = list(&["a.pdf", "b.pdf"]);
        files.mark_active(Some("b.pdf"));
        assert!(files.remove("b.pdf"));
        assert!(!files.remove("b.pdf"));
        assert_eq!(files.entries(), ["a.pdf"]);
        assert_eq!(files.active(), None);
    }

    #[test]
    fn move_entry_stops_at_the_ends() {
        let mut files = list(&["a.pdf", "b.pdf", "c.pdf"]);
        assert!(files.move_entry("c.pdf", MoveDirection::Up));
        assert_eq!(files.entries(), ["a.pdf", "c.pdf", "b.pdf"]);
        assert!(!files.move_entry("a.pdf", MoveDirection::Up));
        assert!(!files.move_entry("b.pdf", MoveDirection::Down));
        assert!(!files.move_entry("zzz.pdf", MoveDirection::Down));
    }

    #[test]
    fn restore_keeps_marker_only_for_surviving_file() {
        let mut files = list(&["a.pdf", "b.pdf"]);
        files.mark_active(Some("a.pdf"));
        files.restore(vec!["b.pdf".to_string(), "a.pdf".to_string()]);
        assert_eq!(files.active(), Some("a.pdf"));
        files.restore(vec!["b.pdf".to_string()]);
        assert_eq!(files.active(), None);
    }
}
