use hanzi_core::Segmenter;
use jieba_rs::Jieba;

/// Dictionary-driven Chinese segmenter.
///
/// Runs in precise mode with HMM enabled for unseen words. Token boundaries
/// follow the bundled jieba dictionary, so short entries often come back whole.
pub struct JiebaSegmenter {
    jieba: Jieba,
}

impl JiebaSegmenter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_cover_the_input() {
        let segmenter = JiebaSegmenter::new();
        for word in ["你好", "謝謝", "我們學中文", "電腦"] {
            assert_eq!(segmenter.segment(word).concat(), word);
        }
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(JiebaSegmenter::new().segment("").is_empty());
    }
}
