/// Builds the instruction sent to the model for one category/difficulty pair.
///
/// Pure string construction: callers validate `count` and the labels.
pub fn build_prompt(category: &str, difficulty: &str, count: u8) -> String {
    format!(
        r#"Generate {count} trivia questions for a Smart10-style game. Each question should be a clear and direct topic.

Category: {category}
Difficulty: {difficulty}

Requirements:
- The "question" should be a direct topic, not a full interrogative sentence. For example, instead of "Which of the following players have won the Ballon d'Or?", the question should be "Ballon d'Or Winners".
- Avoid unnecessary filler phrases like "Which of the following are..." or "Identify the...". The topic itself should be the question.
- Provide exactly 10 answer options per question
- 1-10 options should be correct answers
- 0-9 options should be incorrect but plausible answers
- Questions should be appropriate for the {difficulty} difficulty level
- Vary the number of correct answers between questions

Return the response as a JSON array with this exact structure:
[
  {{
    "question": "Direct Topic Name",
    "options": [
      {{"text": "Option 1", "isCorrect": true}},
      {{"text": "Option 2", "isCorrect": false}},
      // ... exactly 10 options total
    ],
    "category": "{category}",
    "difficulty": "{difficulty}"
  }}
  // ... {count} questions total
]

Make sure the JSON is valid and properly formatted. Do not include any text before or after the JSON array."#
    )
}
