use reviewlens_core::Extremity;

pub const SYSTEM_PROMPT: &str = "You are a careful analyst of customer reviews for local businesses. \
Answer with a single JSON object and nothing else.";

pub fn suspicion_prompt(review_text: &str, rating: u8, extremity: Extremity) -> String {
    let checks = match extremity {
        Extremity::High => {
            r#"This review has one of the highest ratings for the business. Check for signs it was fabricated to inflate the rating:
- excessive or generic praise
- lack of concrete, specific details about the visit
- unnatural or advertising-like phrasing
- signs it was written by the owner, staff or someone paid by them"#
        }
        Extremity::Low => {
            r#"This review has one of the lowest ratings for the business. Check for signs it was fabricated to damage the business:
- excessive negativity out of proportion to the complaint
- lack of concrete, specific complaints
- purely emotional tone without describing what happened
- signs it was written by a competitor or someone with a grudge"#
        }
    };

    format!(
        r#"{checks}

Rating: {rating}/5
REVIEW:
<{review}>

Output JSON:
{{"trustScore": <integer 0-100, higher means more likely genuine>, "riskFlags": [<short snake_case labels for each risk found, empty if none>]}}"#,
        checks = checks,
        rating = rating,
        review = review_text,
    )
}

pub fn relevance_prompt(review_text: &str, essence_aspect: &str, other_aspects: &[String]) -> String {
    let others = if other_aspects.is_empty() {
        "anything else".to_string()
    } else {
        other_aspects.join(", ")
    };

    format!(
        r#"For this kind of business the essential quality is "{essence}". Other aspects are: {others}.

Rate how much the review below is about the essential quality rather than the other aspects.
0.0 means it only discusses other aspects, 1.0 means it only discusses the essential quality.

REVIEW:
<{review}>

Output JSON:
{{"score": <number 0.0-1.0>, "reason": "<one short sentence>"}}"#,
        essence = essence_aspect,
        others = others,
        review = review_text,
    )
}
