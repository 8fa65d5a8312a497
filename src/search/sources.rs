use super::gemini::GroundingMetadata;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Citation shown beneath a search answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// One source per distinct web url, in chunk order. The snippet joins the
/// text of every grounding support that cites the chunk.
pub fn extract_sources(metadata: Option<&GroundingMetadata>) -> Vec<Source> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for (index, chunk) in metadata.grounding_chunks.iter().enumerate() {
        let Some(web) = &chunk.web else { continue };
        let (Some(url), Some(title)) = (&web.uri, &web.title) else {
            continue;
        };
        if url.is_empty() || title.is_empty() || !seen.insert(url.clone()) {
            continue;
        }

        let snippet = metadata
            .grounding_supports
            .iter()
            .filter(|support| support.grounding_chunk_indices.contains(&index))
            .map(|support| support.segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        sources.push(Source {
            title: title.clone(),
            url: url.clone(),
            snippet,
        });
    }

    sources
}
