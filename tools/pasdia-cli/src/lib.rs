pub mod config;
pub mod render;

use std::io::{BufRead, Write};

use anyhow::Context;
use pasdia_protocol::Sentence;
use pasdia_solver::{layout_sentence, DependencyTree, SentenceLayout};
use serde::Serialize;

use crate::render::LatexFormatter;

/// Read every sentence, then write one document per sentence.
///
/// Nothing is written when the input has a format error.
pub fn convert<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    formatter: &LatexFormatter,
) -> anyhow::Result<Vec<(Sentence, SentenceLayout)>> {
    let sentences = pasdia_parser::read_deptree(input).context("Failed to read dependency trees")?;
    tracing::info!(sentences = sentences.len(), "parsed input");

    let mut rendered = Vec::with_capacity(sentences.len());
    for (index, sentence) in sentences.into_iter().enumerate() {
        for issue in DependencyTree::from_sentence(&sentence).issues() {
            tracing::warn!(sentence = index + 1, %issue, "malformed dependency tree");
        }

        let layout = layout_sentence(&sentence);
        output
            .write_all(formatter.document(&sentence, &layout).as_bytes())
            .context("Failed to write LaTeX output")?;
        rendered.push((sentence, layout));
    }

    Ok(rendered)
}

#[derive(Serialize)]
struct SentenceDump<'a> {
    index: usize,
    text: String,
    #[serde(flatten)]
    layout: &'a SentenceLayout,
}

/// Write the PAS aggregates and edges of every sentence as a JSON array.
pub fn write_pas_json<W: Write>(output: W, rendered: &[(Sentence, SentenceLayout)]) -> anyhow::Result<()> {
    let dump: Vec<SentenceDump<'_>> = rendered
        .iter()
        .enumerate()
        .map(|(index, (sentence, layout))| SentenceDump {
            index,
            text: sentence.iter().map(|s| s.surface()).collect(),
            layout,
        })
        .collect();

    serde_json::to_writer_pretty(output, &dump).context("Failed to serialize PAS summary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Platform, RenderConfig};

    const INPUT: &str = "\
* 0 -1D 0/0 0.0
犬\tpred,type=\"pred\",ga=\"1\"
* 1 0D 0/0 0.0
が\tID=\"1\"
EOS
* 0 -1D 0/0 0.0
はい\t感動詞
EOS
";

    fn formatter() -> LatexFormatter {
        LatexFormatter::new(RenderConfig::for_platform(Platform::Linux))
    }

    #[test]
    fn test_convert_writes_one_document_per_sentence() {
        let mut out = Vec::new();
        let rendered = convert(INPUT.as_bytes(), &mut out, &formatter()).unwrap();
        assert_eq!(rendered.len(), 2);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\\documentclass").count(), 2);
        assert_eq!(text.matches("\\end{document}").count(), 2);
        assert!(text.contains("{1}{2}{NOM}"));
    }

    #[test]
    fn test_convert_stops_on_format_error() {
        let mut out = Vec::new();
        let err = convert("* 0 -1 0 0\nEOS\n".as_bytes(), &mut out, &formatter()).unwrap_err();
        assert!(out.is_empty());
        assert!(format!("{:#}", err).contains("* 0 -1 0 0"));
    }

    #[test]
    fn test_convert_keeps_going_on_malformed_tree() {
        // Two roots: logged, still rendered
        let input = "* 0 -1D 0/0 0.0\n犬\t名詞\n* 1 -1D 0/0 0.0\n猫\t名詞\nEOS\n";
        let mut out = Vec::new();
        let rendered = convert(input.as_bytes(), &mut out, &formatter()).unwrap();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].1.backbone.is_empty());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\\end{document}").count(), 1);
        assert!(text.contains("犬 \\& 猫 \\\\"));
    }

    #[test]
    fn test_pas_json() {
        let mut out = Vec::new();
        let rendered = convert(INPUT.as_bytes(), &mut out, &formatter()).unwrap();

        let mut json = Vec::new();
        write_pas_json(&mut json, &rendered).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

        assert_eq!(value[0]["text"], "犬が");
        assert_eq!(value[0]["pas"]["predicates"][1], "が");
        assert_eq!(value[0]["pas"]["arguments"]["1"], "が");
        assert_eq!(value[0]["roles"][0]["role"], "ga");
        assert_eq!(value[0]["roles"][0]["start"], 1);
        assert_eq!(value[1]["roles"].as_array().map(Vec::len), Some(0));
    }
}
