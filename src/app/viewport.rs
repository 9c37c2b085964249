use crate::model::ContentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Meta(ContentType),
    Link,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub text: String,
    pub kind: LineKind,
}

impl ViewLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

/// A fixed-size window onto pre-rendered lines. The offset never points past the last full screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    lines: Vec<ViewLine>,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            offset: 0,
            lines: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn set_content(&mut self, lines: Vec<ViewLine>) {
        self.lines = lines;
        self.clamp();
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp();
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1) as usize);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1) as usize);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn visible(&self) -> &[ViewLine] {
        let end = (self.offset + self.height as usize).min(self.lines.len());
        &self.lines[self.offset.min(end)..end]
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<ViewLine> {
        (0..n)
            .map(|i| ViewLine::new(LineKind::Title, format!("line {i}")))
            .collect()
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut vp = Viewport::new(10, 3);
        vp.set_content(lines(5));
        assert_eq!(vp.line_count(), 5);

        vp.scroll_down(10);
        assert_eq!(vp.offset(), 2);
        assert!(vp.at_bottom());
        assert_eq!(vp.visible()[0].text, "line 2");

        vp.scroll_up(10);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut vp = Viewport::new(10, 8);
        vp.set_content(lines(3));
        vp.page_down();
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible().len(), 3);
    }

    #[test]
    fn growing_height_pulls_offset_back() {
        let mut vp = Viewport::new(10, 2);
        vp.set_content(lines(6));
        vp.to_bottom();
        assert_eq!(vp.offset(), 4);

        vp.set_size(10, 5);
        assert_eq!(vp.offset(), 1);
        assert_eq!(vp.visible().len(), 5);
    }

    #[test]
    fn zero_height_shows_nothing() {
        let mut vp = Viewport::new(10, 0);
        vp.set_content(lines(4));
        assert!(vp.visible().is_empty());
        vp.page_down();
        assert_eq!(vp.offset(), 1);
    }
}
