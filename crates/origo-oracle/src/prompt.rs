pub const SYSTEM_PROMPT: &str = "You are a helpful, mystical, and accurate Vedic Astrologer named Origo. Always output in valid Markdown.";

const D1_REPORT_TASK: &str = "**TASK: Generate D1 Chart Analysis in 6 Distinct Sections**
### Section 1: 🔥 Powerful Yogas & Rarity
### Section 2: 👤 Personality & Looks
### Section 3: 💰 Wealth Potential
### Section 4: 🐉 Rahu & Ketu Axis
### Section 5: 🪐 Moon, Mars & Saturn
### Section 6: ⭐ Final Rating";

const REPORT_DEPTH: &str = "**MODE: DETAILED REPORT**
- Follow the SECTION STRUCTURE exactly.
- Use double line breaks between paragraphs.";

/// Everything the prompt needs about the client and the charts in focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequestContext {
    pub client_name: String,
    pub client_gender: String,
    /// Rendered D1 chart.
    pub d1_text: String,
    /// Label of the chart the user asked about, e.g. "D9".
    pub focus_label: String,
    /// Rendered focus chart.
    pub focus_text: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Short,
    Detailed,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Multi-section written analysis of a whole chart.
    Report,
    /// Direct answer to a question.
    Answer(Depth),
}

impl Mode {
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("analyze") && lower.contains("chart") {
            return Mode::Report;
        }
        if message.contains("Depth: short") {
            Mode::Answer(Depth::Short)
        } else if message.contains("Depth: detailed") {
            Mode::Answer(Depth::Detailed)
        } else {
            Mode::Answer(Depth::Balanced)
        }
    }
}

fn task_instruction(mode: Mode, focus_label: &str) -> String {
    match mode {
        Mode::Report if focus_label.eq_ignore_ascii_case("D1") => D1_REPORT_TASK.to_string(),
        Mode::Report if focus_label.eq_ignore_ascii_case("D2") => "Detailed D2 Wealth analysis.".to_string(),
        Mode::Report => format!("Analyze {} in detailed sections.", focus_label),
        Mode::Answer(_) => "Answer user question directly.".to_string(),
    }
}

fn depth_instruction(mode: Mode) -> &'static str {
    match mode {
        Mode::Report => REPORT_DEPTH,
        Mode::Answer(Depth::Short) => "Keep answer under 60 words.",
        Mode::Answer(Depth::Detailed) => "Detailed explanation with logic.",
        Mode::Answer(Depth::Balanced) => "Balanced answer.",
    }
}

/// The user turn sent to the model.
pub fn build_prompt(ctx: &ChatRequestContext) -> String {
    let mode = Mode::detect(&ctx.message);
    format!(
        "You are Origo AI.
[CLIENT] {name} | {gender}
[DATA]
D1: {d1}
{label}: {focus}
[INPUT] \"{message}\"
[INSTRUCTIONS] {task}
[RULES] {depth}
- Use Markdown.
- End with 3 suggestions: <<<Q1 | Q2 | Q3>>>
",
        name = ctx.client_name,
        gender = ctx.client_gender,
        d1 = ctx.d1_text,
        label = ctx.focus_label,
        focus = ctx.focus_text,
        message = ctx.message,
        task = task_instruction(mode, &ctx.focus_label),
        depth = depth_instruction(mode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(message: &str, focus: &str) -> ChatRequestContext {
        ChatRequestContext {
            client_name: "Asha".to_string(),
            client_gender: "female".to_string(),
            d1_text: "- **LAGNA (Ascendant)**: Aries Sign (1st House)".to_string(),
            focus_label: focus.to_string(),
            focus_text: "Ascendant Missing.".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_mode_detection() {
        assert_eq!(Mode::detect("Please ANALYZE my Chart"), Mode::Report);
        assert_eq!(Mode::detect("Will I travel? Depth: short"), Mode::Answer(Depth::Short));
        assert_eq!(Mode::detect("Career? Depth: detailed"), Mode::Answer(Depth::Detailed));
        assert_eq!(Mode::detect("analyze my career"), Mode::Answer(Depth::Balanced));
    }

    #[test]
    fn test_report_prompt_for_d1() {
        let prompt = build_prompt(&context("Analyze my chart", "D1"));
        assert!(prompt.contains("6 Distinct Sections"));
        assert!(prompt.contains("MODE: DETAILED REPORT"));
        assert!(prompt.contains("[CLIENT] Asha | female"));
    }

    #[test]
    fn test_report_prompt_for_other_charts() {
        assert!(build_prompt(&context("analyze chart", "D2")).contains("Detailed D2 Wealth analysis."));
        assert!(build_prompt(&context("analyze chart", "D9")).contains("Analyze D9 in detailed sections."));
    }

    #[test]
    fn test_question_prompt() {
        let prompt = build_prompt(&context("When will I marry? Depth: short", "D9"));
        assert!(prompt.contains("Answer user question directly."));
        assert!(prompt.contains("Keep answer under 60 words."));
        assert!(prompt.contains("D9: Ascendant Missing."));
        assert!(prompt.contains("[INPUT] \"When will I marry? Depth: short\""));
        assert!(prompt.ends_with("<<<Q1 | Q2 | Q3>>>\n"));
    }
}
