use crate::consts::MAX_COMPETITORS;

const INTRO: &str = "You are a market analyst who identifies the direct business competitors of a website.";
const RESPONSE_HEADER: &str = "Respond with a raw JSON array. Each element must have exactly this shape:";
const ENTRY_FORMAT: &str = "{\"url\": \"https://competitor.example\", \"description\": \"one-sentence summary of what the competitor does\"}";
const RULES_HEADER: &str = "Rules:";
const RULES: &[&str] = &[
    "Output the JSON array only. No prose, no explanations, no notes.",
    "Do not wrap the array in markdown code fences.",
    "Use the competitor's homepage URL for \"url\".",
    "Keep each description under 25 words.",
    "Never include the target website itself.",
];

pub fn build_discover_prompt(website: &str) -> String {
    let rules = RULES
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{intro}\n\nList exactly {count} competitors of {website}.\n\n{response_header}\n{entry_format}\n\n{rules_header}\n{rules}\n",
        intro = INTRO,
        count = MAX_COMPETITORS,
        website = website,
        response_header = RESPONSE_HEADER,
        entry_format = ENTRY_FORMAT,
        rules_header = RULES_HEADER,
        rules = rules
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_website() {
        let prompt = build_discover_prompt("example.com");
        assert!(prompt.contains("competitors of example.com"));
    }

    #[test]
    fn prompt_asks_for_exactly_ten() {
        let prompt = build_discover_prompt("example.com");
        assert!(prompt.contains("exactly 10 competitors"));
    }

    #[test]
    fn prompt_has_entry_shape() {
        let prompt = build_discover_prompt("example.com");
        assert!(prompt.contains("\"url\""));
        assert!(prompt.contains("\"description\""));
    }

    #[test]
    fn prompt_has_no_markdown_fences() {
        let prompt = build_discover_prompt("example.com");
        assert!(!prompt.contains("```"));
    }

    #[test]
    fn prompt_includes_rules() {
        let prompt = build_discover_prompt("example.com");
        for rule in RULES {
            assert!(prompt.contains(rule));
        }
    }
}
