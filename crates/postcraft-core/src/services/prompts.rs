//! Prompt and response-schema builders for the text model.

use serde_json::{Value, json};

use crate::domain::{Platform, Tone};

pub(crate) fn draft_prompt(topic: &str, platform: Platform, tone: Tone, include_emoji: bool) -> String {
    let emoji = if include_emoji {
        "Use appropriate emojis."
    } else {
        "Do not use emojis."
    };

    format!(
        "Act as an expert social media manager.\n\
         Write a post for the social network: {platform}.\n\
         Topic: \"{topic}\".\n\
         Tone of voice: {tone}.\n\
         {emoji}\n\
         \n\
         The response must be a JSON object with:\n\
         - \"text\": the main content of the post.\n\
         - \"hashtags\": a list of 5-10 relevant hashtags.\n\
         - \"imagePrompt\": a short, visually rich description in English for generating an image to accompany this post.\n",
        topic = topic.trim(),
        tone = tone.label(),
    )
}

/// Schema constraining the draft response: all three fields required.
pub(crate) fn draft_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": { "type": "STRING" },
            "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "imagePrompt": { "type": "STRING" }
        },
        "required": ["text", "hashtags", "imagePrompt"]
    })
}

pub(crate) fn trend_prompt(excerpts: &[String]) -> String {
    format!(
        "Analyze the themes of the following recent posts and suggest 3 new content ideas \
         that complement this strategy and increase engagement.\n\
         Be concise. Answer in plain text formatted as bullet points.\n\
         \n\
         Recent posts:\n\
         - {}\n",
        excerpts.join("\n- ")
    )
}
