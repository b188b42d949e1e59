#[cfg(test)]
mod tests {
    use paymo_cli::libs::sanitize::clean_description;

    #[test]
    fn test_strips_html_tags() {
        assert_eq!(clean_description("<p>Reviewed contract</p>"), "Reviewed contract");
        assert_eq!(clean_description("<div><b>Call</b> with <i>client</i></div>"), "Call with client");
    }

    #[test]
    fn test_decodes_named_entities() {
        assert_eq!(clean_description("Research &amp; drafting"), "Research & drafting");
        assert_eq!(clean_description("a &lt; b &gt; c"), "a < b > c");
        assert_eq!(clean_description("&quot;quoted&quot; &apos;text&apos;"), "\"quoted\" 'text'");
    }

    #[test]
    fn test_decodes_numeric_references() {
        assert_eq!(clean_description("caf&#233;"), "café");
        assert_eq!(clean_description("caf&#xe9;"), "café");
        assert_eq!(clean_description("&#39;s fees"), "'s fees");
    }

    #[test]
    fn test_nbsp_becomes_space() {
        assert_eq!(clean_description("before&nbsp;after"), "before after");
    }

    #[test]
    fn test_amp_decoded_after_other_entities() {
        // "&amp;lt;" means the literal text "&lt;", not "<".
        assert_eq!(clean_description("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean_description("  <p> padded </p>  "), "padded");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_description("Plain description"), "Plain description");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_description("<p></p>"), "");
    }

    #[test]
    fn test_invalid_numeric_reference_left_alone() {
        assert_eq!(clean_description("&#xZZ;"), "&#xZZ;");
    }
}
