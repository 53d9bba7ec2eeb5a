use super::SummaryStyle;

/// System prompt template for a summary style.
pub fn style_prompt(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Brief => {
            "Provide a brief, concise summary of this video transcript in 2-3 sentences. \
             Focus on the main topic and key takeaway."
        }
        SummaryStyle::Detailed => {
            "Provide a comprehensive summary of this video transcript. \
             Include the main topics, key points, important details, and conclusions. \
             Organize the summary in clear paragraphs."
        }
        SummaryStyle::BulletPoints => {
            "Summarize this video transcript using bullet points.\n\
             - Start with the main topic\n\
             - List key points and important information\n\
             - Include any conclusions or takeaways\n\
             Use clear, concise bullet points."
        }
        SummaryStyle::KeyInsights => {
            "Extract and summarize the key insights from this video transcript.\n\
             Focus on:\n\
             - Main insights and learnings\n\
             - Important facts or data mentioned\n\
             - Actionable advice or recommendations\n\
             - Notable quotes or statements"
        }
        SummaryStyle::Academic => {
            "Provide an academic-style summary of this video transcript.\n\
             Structure it with:\n\
             - Abstract/Overview\n\
             - Main arguments or points\n\
             - Supporting evidence or examples\n\
             - Conclusions\n\
             Use formal, scholarly language."
        }
        SummaryStyle::Casual => {
            "Summarize this video transcript in a casual, conversational tone. \
             Make it easy to read and understand, as if explaining to a friend. \
             Include the main points and interesting details in a relaxed style."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_a_prompt() {
        let styles = [
            SummaryStyle::Brief,
            SummaryStyle::Detailed,
            SummaryStyle::BulletPoints,
            SummaryStyle::KeyInsights,
            SummaryStyle::Academic,
            SummaryStyle::Casual,
        ];

        for style in styles {
            assert!(!style_prompt(style).is_empty());
        }
    }

    #[test]
    fn test_style_display_matches_cli_names() {
        assert_eq!(SummaryStyle::BulletPoints.to_string(), "bullet_points");
        assert_eq!(SummaryStyle::Brief.to_string(), "brief");
    }
}
