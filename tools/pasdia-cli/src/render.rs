//! LaTeX document assembly around the computed layout.

use pasdia_protocol::Sentence;
use pasdia_solver::layout::{backbone_block, role_block};
use pasdia_solver::SentenceLayout;

use crate::config::{RenderConfig, RowSource};

/// `%` starts a comment in LaTeX.
pub fn escape_row(row: &str) -> String {
    row.replace('%', "\\%")
}

pub struct LatexFormatter {
    config: RenderConfig,
}

impl LatexFormatter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn header(&self) -> String {
        format!(
            "\\documentclass[convert=true]{{{}}}\n\
             \\usepackage{{tikz-dependency}}\n\
             \\usepackage{{zxjatype}}\n\
             \\setjamainfont[Scale=1]{{{}}}\n\
             \\begin{{document}}\n",
            self.config.doc_class, self.config.font
        )
    }

    pub fn footer(&self) -> &'static str {
        "\\end{document}"
    }

    /// The `dependency` environment for one sentence.
    pub fn dependency_block(&self, sentence: &Sentence, layout: &SentenceLayout) -> String {
        let row = match self.config.row {
            RowSource::Segments => sentence.text_row(),
            RowSource::Predicates => layout.pas.text_row(),
        };

        format!(
            "\\begin{{dependency}}[{}, text only label, edge vertical padding=1]\n\
             \\begin{{deptext}}[{}, column sep=0.1cm, nodes={{draw=black, inner sep=1ex, text=black}}]\n\
             {}\n\
             \\end{{deptext}}\n\
             {}{}\n\
             \\end{{dependency}}\n",
            self.config.dep_option,
            self.config.deptext_option,
            escape_row(&row),
            backbone_block(&layout.backbone),
            role_block(&layout.roles)
        )
    }

    /// A standalone document holding one sentence.
    pub fn document(&self, sentence: &Sentence, layout: &SentenceLayout) -> String {
        let mut doc = self.header();
        doc.push_str(&self.dependency_block(sentence, layout));
        doc.push_str(self.footer());
        doc
    }
}
