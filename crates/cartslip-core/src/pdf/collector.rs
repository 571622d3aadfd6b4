//! `OutputDev` sink that records one fragment per show-text run.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::trace;

use crate::models::document::{TextDocument, TextPage};

/// Collects text runs into pages of [`TextFragment`](crate::TextFragment)s.
///
/// Each run is positioned at the origin of its first glyph.
#[derive(Debug, Default)]
pub struct FragmentCollector {
    pages: Vec<TextPage>,
    current: Option<TextPage>,
    word: String,
    origin: Option<(f64, f64)>,
}

impl FragmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the collector, returning the pages seen so far.
    pub fn into_document(mut self) -> TextDocument {
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        TextDocument::new(self.pages)
    }

    fn flush_word(&mut self) {
        let content = std::mem::take(&mut self.word);
        let Some((x, y)) = self.origin.take() else {
            return;
        };

        if let Some(page) = self.current.as_mut() {
            trace!("page {}: {:?} at ({:.2}, {:.2})", page.number, content, x, y);
            page.push(content, x, y);
        }
    }
}

impl OutputDev for FragmentCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        self.current = Some(TextPage::new(page_num));
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush_word();
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        _width: f64,
        _spacing: f64,
        _font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        if self.origin.is_none() {
            self.origin = Some((trm.m31, trm.m32));
        }
        self.word.push_str(char);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.flush_word();
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush_word();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MEDIA_BOX: MediaBox = MediaBox {
        llx: 0.0,
        lly: 0.0,
        urx: 595.0,
        ury: 842.0,
    };

    fn show(collector: &mut FragmentCollector, text: &str, x: f64, y: f64) {
        collector.begin_word().unwrap();
        for (i, c) in text.chars().enumerate() {
            let trm = Transform::create_translation(x + 6.0 * i as f64, y);
            collector
                .output_character(&trm, 0.5, 0.0, 12.0, &c.to_string())
                .unwrap();
        }
        collector.end_word().unwrap();
    }

    #[test]
    fn test_runs_become_fragments() {
        let mut collector = FragmentCollector::new();
        collector.begin_page(1, &MEDIA_BOX, None).unwrap();
        show(&mut collector, "Qty", 300.0, 700.0);
        show(&mut collector, "Milk", 30.0, 680.0);
        collector.end_line().unwrap();
        collector.end_page().unwrap();

        let document = collector.into_document();
        assert_eq!(document.pages.len(), 1);

        let page = &document.pages[0];
        assert_eq!(page.number, 1);
        assert_eq!(page.fragments.len(), 2);
        assert_eq!(page.fragments[0].content, "Qty");
        assert_eq!((page.fragments[0].x, page.fragments[0].y), (300.0, 700.0));
        assert_eq!(page.fragments[1].content, "Milk");
        assert_eq!((page.fragments[1].x, page.fragments[1].y), (30.0, 680.0));
    }

    #[test]
    fn test_empty_runs_skipped() {
        let mut collector = FragmentCollector::new();
        collector.begin_page(1, &MEDIA_BOX, None).unwrap();
        collector.begin_word().unwrap();
        collector.end_word().unwrap();
        collector.end_page().unwrap();

        assert_eq!(collector.into_document().fragment_count(), 0);
    }

    #[test]
    fn test_pages_kept_in_order() {
        let mut collector = FragmentCollector::new();
        for number in 1..=3 {
            collector.begin_page(number, &MEDIA_BOX, None).unwrap();
            show(&mut collector, &format!("p{number}"), 10.0, 10.0);
            collector.end_page().unwrap();
        }

        let numbers: Vec<u32> = collector
            .into_document()
            .pages
            .iter()
            .map(|p| p.number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_unterminated_page_kept() {
        let mut collector = FragmentCollector::new();
        collector.begin_page(1, &MEDIA_BOX, None).unwrap();
        show(&mut collector, "Zepto", 10.0, 800.0);

        assert_eq!(collector.into_document().pages[0].fragments[0].content, "Zepto");
    }
}
