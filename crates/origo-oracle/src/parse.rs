use regex::Regex;

lazy_static::lazy_static! {
    static ref SUGGESTION_FOOTER: Regex = Regex::new(r"(?s)<<<(.*?)>>>").expect("valid suggestion regex");
}

/// Split the `<<<Q1 | Q2 | Q3>>>` footer off a reply.
///
/// Returns the reply without the footer and the suggestions it held. A reply
/// without a footer is returned unchanged with no suggestions.
pub fn split_suggestions(reply: &str) -> (String, Vec<String>) {
    let Some(found) = SUGGESTION_FOOTER.captures_iter(reply).last() else {
        return (reply.to_string(), Vec::new());
    };
    let (Some(whole), Some(inner)) = (found.get(0), found.get(1)) else {
        return (reply.to_string(), Vec::new());
    };

    let suggestions = inner
        .as_str()
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut body = String::with_capacity(reply.len());
    body.push_str(&reply[..whole.start()]);
    body.push_str(&reply[whole.end()..]);
    (body.trim_end().to_string(), suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_footer() {
        let reply = "Your Moon is strong.\n\n<<<What about career? | Is Saturn weak? | When will I travel?>>>";
        let (body, suggestions) = split_suggestions(reply);
        assert_eq!(body, "Your Moon is strong.");
        assert_eq!(
            suggestions,
            vec!["What about career?", "Is Saturn weak?", "When will I travel?"]
        );
    }

    #[test]
    fn test_no_footer() {
        let (body, suggestions) = split_suggestions("Plain answer.");
        assert_eq!(body, "Plain answer.");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_last_footer_wins() {
        let (_, suggestions) = split_suggestions("<<<a>>> text <<<b | c>>>");
        assert_eq!(suggestions, vec!["b", "c"]);
    }
}
