//! Prompt templates for the goal assistant.

use chrono::NaiveDateTime;

pub fn validation_prompt(goal_text: &str) -> String {
    format!(
        r#"Analyze if this text represents a valid personal goal: "{goal_text}"

A valid goal should:
- Be actionable and specific
- Represent something achievable by an individual
- Not be nonsense, spam, or malicious content
- Have clear intent and purpose

Respond with JSON only, no other text:
{{
  "isValid": boolean,
  "confidence": number (0-1),
  "feedback": "SHORT message if invalid (max 10 words)",
  "improvedGoal": "suggested improvement if the goal could be clearer (optional)"
}}"#
    )
}

pub fn target_options_prompt(goal_name: &str, goal_description: Option<&str>) -> String {
    let description = goal_description
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!(" with description: \"{}\"", d))
        .unwrap_or_default();

    format!(
        r#"Based on the goal "{goal_name}"{description}, suggest 3 to 5 specific, measurable target options.

These should be progressive levels (beginner, intermediate, advanced) that are:
- Specific and measurable
- Realistic and achievable
- Time-bound when appropriate
- Relevant to the goal

If the goal cannot sensibly be measured with a number, return an empty list.

Respond in JSON format:
{{
  "options": [
    {{
      "value": <number>,
      "label": "<short label>",
      "description": "<brief description of what this target means>"
    }}
  ]
}}

The value should be a positive number representing the target (minutes, repetitions, etc.)
Order from easiest to most challenging."#
    )
}

pub fn plan_prompt(
    goal_name: &str,
    goal_description: Option<&str>,
    target_value: i32,
    target_date: Option<NaiveDateTime>,
) -> String {
    let description = goal_description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No additional description provided");
    let duration_context = match target_date {
        Some(date) => format!(
            "The user wants to achieve this goal by {}.",
            date.format("%B %-d, %Y")
        ),
        None => "This is a habit-based goal with no specific end date.".to_string(),
    };

    format!(
        r#"You are an expert in habit formation and goal achievement.

Create a practical, habit-focused plan for this goal:
- Goal: {goal_name}
- Description: {description}
- Target: {target_value} (this could be minutes per day, repetitions, or other units depending on the goal)
- {duration_context}

Generate a plan following these principles:
1. Make it obvious (environmental design)
2. Make it attractive (temptation bundling)
3. Make it easy (2-minute rule, reduce friction)
4. Make it satisfying (immediate rewards)

Provide your response in JSON format:
{{
  "tasks": [
    {{ "title": "Specific, actionable task" }}
  ],
  "suggestions": [
    "Helpful tip or strategy for success"
  ]
}}

- Generate 3-6 specific tasks that build habits
- Include 2-3 practical suggestions
- Focus on small, consistent actions rather than big goals
- Tasks should be concrete and immediately actionable"#
    )
}
