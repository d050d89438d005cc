/// Build the article-writing prompt for a transcript.
///
/// The wording is fixed; downstream consumers rely on it verbatim.
pub fn build_article_prompt(transcript: &str) -> String {
    format!(
        "You are an expert content writer. Based on the transcript below, write a long, \
well-structured blog article with title, intro, several subheadings, and a conclusion. \
Do NOT mention 'YouTube' or 'transcript and any other text other than blog article'.\n\
\n\
{transcript}\n\
\n\
Article:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_transcript_verbatim() {
        let prompt = build_article_prompt("line one\nline two");

        assert_eq!(
            prompt,
            "You are an expert content writer. Based on the transcript below, write a long, \
             well-structured blog article with title, intro, several subheadings, and a conclusion. \
             Do NOT mention 'YouTube' or 'transcript and any other text other than blog article'.\
             \n\nline one\nline two\n\nArticle:"
        );
    }
}
