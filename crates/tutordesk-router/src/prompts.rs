// SPDX-FileCopyrightText: 2026 Tutordesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instruction templates for every model call.
//!
//! Each function renders one complete prompt. The query (and, for the
//! handlers, the retrieved context) is interpolated verbatim.

use tutordesk_core::QueryCategory;

/// Renders the category classification prompt.
pub fn classification_prompt(customer_query: &str) -> String {
    format!(
        r#"You are an intelligent query classifier for a tutoring support system.
Your goal is to accurately categorize the following teacher or tutor query into one of three distinct categories.

---

**Categories**

1. 🧮 **Academic & Curriculum Analytics**
Queries about **curriculum structure, subject topics, academic content by year group,**
or analytical insights about student data and performance.

Includes:
- Understanding what topics or subjects are taught in a particular year or curriculum stage.
- Curriculum alignment or coverage questions.
- Analyzing, comparing, or reporting on academic performance, attendance patterns, or exam results.

Examples:
- "What topics are covered in Year 8 Maths?"
- "Compare the average math performance between Year 5 and Year 6."
- "Show me attendance patterns for Year 9 students."

2. 💳 **Billing, Payments & Administrative**
Queries related to pricing, invoices, refunds, subscriptions, payment failures,
account upgrades/downgrades, or other financial or account issues.

3. 🧾 **General / Teaching Assistance**
Queries that ask for help **creating or preparing teaching materials** — such as
lesson plans, quizzes, worksheets, or study guides.
Also includes platform or account questions not related to curriculum or analytics.

---

**Instructions**

- Assign the query to exactly **one** category.
- Output **only** the category name, exactly as written:
`Academic & Curriculum Analytics`, `Billing, Payments & Administrative`, or `General / Teaching Assistance`
- Do **not** explain or justify your choice.
- If a query fits more than one category, select the **primary intent** of the query.

---

**Examples**

| Query | Category |
|--------|-----------|
| "Show me my students’ attendance trend for Year 8" | Academic & Curriculum Analytics |
| "Generate a lesson on fractions and a short quiz to practice" | General / Teaching Assistance |
| "Prepare a Year 9 science test based on the UK curriculum" | General / Teaching Assistance |
| "Compare the average math performance between Year 5 and Year 6" | Academic & Curriculum Analytics |
| "How do I download my last month’s invoice?" | Billing, Payments & Administrative |
| "Where can I reset my tutor account password?" | Billing, Payments & Administrative |
| "What topic do you teach in maths for Year 8?" | Academic & Curriculum Analytics |

---

Customer Query:
{customer_query}

Category:
"#
    )
}

/// Renders the sentiment analysis prompt.
pub fn sentiment_prompt(customer_query: &str) -> String {
    format!(
        r#"You are a sentiment analysis expert. Your job is to analyze the emotional tone of customer queries
to help prioritize support requests.

Analyze the customer query below and classify its sentiment into ONE of these categories:

1. **Positive**: Customer is happy, satisfied, expressing gratitude, or being complimentary.
   Examples: "Thank you for the great service!", "I love this feature!"

2. **Neutral**: Customer is asking a straightforward question without strong emotion.
   Examples: "What payment methods do you support?", "How do I integrate with AWS?"

3. **Negative**: Customer is frustrated, angry, disappointed, or expressing dissatisfaction.
   Examples: "This is terrible!", "I'm very frustrated", "This doesn't work at all"

Return ONLY the sentiment category (Positive, Neutral, or Negative).
Do not include any explanation, just the sentiment.

Customer Query:
{customer_query}

Sentiment:
"#
    )
}

/// Renders the answer prompt for `category` around the retrieved context.
pub fn response_prompt(
    category: QueryCategory,
    retrieved_content: &str,
    customer_query: &str,
) -> String {
    let (preamble, closing) = match category {
        QueryCategory::Academic => (ACADEMIC_PREAMBLE, "Academic Support Response:"),
        QueryCategory::Billing => (BILLING_PREAMBLE, "Billing Support Response:"),
        QueryCategory::General => (GENERAL_PREAMBLE, "Support Response:"),
    };

    format!(
        "{preamble}\n\
         Retrieved Knowledge Base Information:\n\
         {retrieved_content}\n\
         \n\
         Customer Query:\n\
         {customer_query}\n\
         \n\
         {closing}\n"
    )
}

const ACADEMIC_PREAMBLE: &str = "\
You are an academic support specialist with deep expertise in UK curricula and student analytics.

Craft a clear and detailed academic support response for the following customer query.
Use the retrieved knowledge base information below to provide accurate, curriculum-aligned guidance.

Guidelines:
- Be precise about subjects, year groups, and learning goals
- Include concrete examples, learning strategies, or assessment tips when relevant
- Reference curriculum sources when applicable
- If the retrieved information is incomplete, acknowledge it and suggest next steps or resources
- Keep the response professional, supportive, and teacher-friendly
";

const BILLING_PREAMBLE: &str = "\
You are a billing support specialist focused on helping customers with financial matters.

Craft a clear and detailed billing support response for the following customer query.
Use the retrieved knowledge base information below to provide accurate answers about pricing,
payments, invoices, refunds, or subscription matters.

Guidelines:
- Be clear about pricing, payment terms, and policies
- Include specific details like pricing tiers, payment methods, and timeframes
- If discussing refunds or disputes, be empathetic and helpful
- Reference official policies when applicable
- For account-specific issues, direct the customer to the appropriate channel
- Keep the response professional and reassuring
";

const GENERAL_PREAMBLE: &str = "\
You are a customer support representative helping customers with general inquiries.

Craft a clear and helpful response for the following customer query.
Use the retrieved knowledge base information below to provide accurate information about
our company, policies, support channels, or general questions.

Guidelines:
- Be friendly, professional, and helpful
- Provide complete and accurate information
- Include relevant links or contact information when appropriate
- If the question is outside your knowledge, direct them to the right resource
- Keep the response concise but thorough
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_prompt_lists_every_label_and_ends_with_query() {
        let prompt = classification_prompt("Where is my refund?");
        for category in QueryCategory::ALL {
            assert!(prompt.contains(category.label()), "missing {category}");
        }
        assert!(prompt.ends_with("Customer Query:\nWhere is my refund?\n\nCategory:\n"));
    }

    #[test]
    fn sentiment_prompt_embeds_query() {
        let prompt = sentiment_prompt("This doesn't load!");
        assert!(prompt.starts_with("You are a sentiment analysis expert."));
        assert!(prompt.contains("Customer Query:\nThis doesn't load!\n\nSentiment:"));
    }

    #[test]
    fn query_braces_are_not_template_syntax() {
        let prompt = classification_prompt("what does {year} mean?");
        assert!(prompt.contains("what does {year} mean?"));
    }

    #[test]
    fn response_prompts_differ_by_category() {
        let academic = response_prompt(QueryCategory::Academic, "ctx", "q");
        let billing = response_prompt(QueryCategory::Billing, "ctx", "q");
        let general = response_prompt(QueryCategory::General, "ctx", "q");

        assert!(academic.starts_with("You are an academic support specialist"));
        assert!(academic.ends_with("Academic Support Response:\n"));
        assert!(billing.starts_with("You are a billing support specialist"));
        assert!(billing.ends_with("Billing Support Response:\n"));
        assert!(general.starts_with("You are a customer support representative"));
        assert!(general.ends_with("\nSupport Response:\n"));
    }

    #[test]
    fn response_prompt_places_context_before_query() {
        let prompt = response_prompt(QueryCategory::Billing, "[Source: faq]\nInvoices live here.", "invoice?");
        let context = prompt.find("Retrieved Knowledge Base Information:\n[Source: faq]\nInvoices live here.\n").unwrap();
        let query = prompt.find("Customer Query:\ninvoice?\n").unwrap();
        assert!(context < query);
    }
}
