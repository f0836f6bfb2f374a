/// Non-blocking user feedback queued for the presentation layer to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message.into());
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }

    /// Hand everything queued so far to the renderer
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        log::debug!("[Notice] {:?}: {}", level, message);
        self.pending.push(Notice { level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_board() {
        let mut board = NoticeBoard::new();
        board.show_warning("Playlist sync failed");
        board.show_success("Loved");

        let drained = board.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Warning);
        assert!(board.pending().is_empty());
    }
}
