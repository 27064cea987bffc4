//! Prompt text and response schemas sent to Gemini.

use serde_json::{Value, json};

pub const EXTRACTION_PROMPT: &str =
    "Extract all text clearly and accurately from this handwritten or printed answer sheet.";

pub const RULES_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant for a teacher. Your purpose is to help the teacher create a set of clear, structured rules for evaluating an exam.
- When the teacher provides instructions, rephrase them as a clear, numbered list to confirm your understanding. For example, if they say 'q1 is 10 marks', you should say '1. Question 1 is worth 10 marks.'
- If instructions are ambiguous, ask for clarification.
- Combine all confirmed rules into a single, comprehensive list.
- Your final response in a turn, after the user has provided rules, should *only* be the summarized list of rules. Do not add conversational filler like 'Here are the rules:'. Just output the list.";

const GENERAL_STANDARDS: &str =
    "Evaluate based on general academic standards for the subject matter.";

/// Grading instruction for the optional teacher rules.
pub fn rules_instruction(custom_rules: &str) -> String {
    let rules = custom_rules.trim();
    if rules.is_empty() {
        GENERAL_STANDARDS.to_string()
    } else {
        format!(
            "A specific set of custom grading rules has been provided. You MUST follow these rules strictly when grading. The rules are:\n---\n{rules}\n---"
        )
    }
}

/// Builds the examiner prompt for one sheet.
pub fn evaluation_prompt(question_text: &str, answer_text: &str, custom_rules: &str) -> String {
    format!(
        r#"You are an expert and strict examiner evaluating a student's exam paper.
Your primary task is to provide a detailed, question-by-question evaluation. Follow these steps methodically:

**Step 1: Understand the Question Paper Thoroughly**
First, carefully read and analyze the entire **QUESTION PAPER** provided below. Understand the scope of each question, the marks allocated, and what is being asked.

**Step 2: Apply Grading Rules**
Adhere strictly to the grading rules. {rules}

**Step 3: Evaluate the Student's Answers**
1. For each question from the question paper, locate the corresponding answer in the student's answer sheet.
2. Evaluate the answer critically against the question's requirements and the grading rules. Award marks based on correctness, completeness and clarity. Be strict with partial marks. Never award more than the question's maximum marks.
3. Provide concise, specific and constructive feedback for each answer.
4. After evaluating all questions, write a final summary of the student's overall performance.

**Step 4: Format the Output**
The final output MUST be a valid JSON object that adheres to the provided schema. Do not include any text or markdown formatting outside of the JSON object.

**QUESTION PAPER:**
---
{question_text}
---

**STUDENT'S ANSWER SHEET:**
---
{answer_text}
---
"#,
        rules = rules_instruction(custom_rules),
    )
}

/// Builds the similarity prompt for extracted answer text.
pub fn plagiarism_prompt(answer_text: &str) -> String {
    format!(
        r#"You are an academic integrity reviewer. Estimate how much of the student's answer sheet below is copied verbatim or near-verbatim from well-known published sources (textbooks, encyclopedias, popular websites).

Report:
- plagiarismPercentage: a number from 0 to 100 estimating the share of copied text.
- summary: one or two sentences describing the finding.
- matches: each copied passage exactly as it appears in the student's text, with the likely source.

Ordinary definitions and standard formulas are not plagiarism. Respond only with JSON matching the schema.

**STUDENT'S ANSWER SHEET:**
---
{answer_text}
---
"#
    )
}

pub fn evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "evaluation": {
                "type": "ARRAY",
                "description": "A question-wise breakdown of the evaluation.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING", "description": "The question being evaluated." },
                        "studentAnswer": { "type": "STRING", "description": "A brief summary of the student's answer for this question." },
                        "marksAwarded": { "type": "NUMBER", "description": "Marks awarded for this specific question." },
                        "maxMarks": { "type": "NUMBER", "description": "Maximum marks possible for this question." },
                        "feedback": { "type": "STRING", "description": "Constructive feedback for the student's answer to this question." }
                    },
                    "required": ["question", "studentAnswer", "marksAwarded", "maxMarks", "feedback"]
                }
            },
            "summary": {
                "type": "OBJECT",
                "description": "A summary of the entire evaluation.",
                "properties": {
                    "overallFeedback": { "type": "STRING", "description": "Overall performance, strengths and areas for improvement." }
                },
                "required": ["overallFeedback"]
            }
        },
        "required": ["evaluation", "summary"]
    })
}

pub fn plagiarism_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "plagiarismPercentage": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "matches": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "studentText": { "type": "STRING" },
                        "source": { "type": "STRING" }
                    },
                    "required": ["studentText", "source"]
                }
            }
        },
        "required": ["plagiarismPercentage", "summary"]
    })
}
