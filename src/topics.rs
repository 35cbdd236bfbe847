//! Tutoring topic catalog
//!
//! Every topic pairs a display name with the system prompt that steers the
//! tutor. The table is fixed at compile time; topics are never created or
//! mutated at runtime.

/// A math topic the tutor can focus on
#[derive(Debug, PartialEq, Eq)]
pub struct Topic {
    /// Stable identifier (e.g., "basic-math")
    pub id: &'static str,
    /// Human-readable name shown to the user
    pub display_name: &'static str,
    /// One-line summary for topic pickers
    pub description: &'static str,
    /// Instruction text sent as the system message
    pub system_prompt: &'static str,
}

const ALGEBRA_PROMPT: &str = "You are an expert algebra tutor. Focus on explaining algebraic concepts, equations, variables, and problem-solving techniques. Break down complex algebraic problems into simple steps. Current question: ";

const GEOMETRY_PROMPT: &str = "You are an expert geometry tutor. Focus on shapes, spatial relationships, angles, and geometric proofs. Use visual explanations and step-by-step geometric problem solving. Current question: ";

const CALCULUS_PROMPT: &str = "You are an expert calculus tutor. Focus on derivatives, integrals, limits, and rates of change. Explain calculus concepts with practical examples and clear steps. Current question: ";

const BASIC_MATH_PROMPT: &str = "You are an expert in basic mathematics. Focus on arithmetic, fractions, decimals, and percentages. Provide clear, simple explanations with practical examples. Current question: ";

static TOPICS: [Topic; 4] = [
    Topic {
        id: "algebra",
        display_name: "Algebra",
        description: "Master equations and variables",
        system_prompt: ALGEBRA_PROMPT,
    },
    Topic {
        id: "geometry",
        display_name: "Geometry",
        description: "Explore shapes and spaces",
        system_prompt: GEOMETRY_PROMPT,
    },
    Topic {
        id: "calculus",
        display_name: "Calculus",
        description: "Learn about rates of change",
        system_prompt: CALCULUS_PROMPT,
    },
    Topic {
        id: "basic-math",
        display_name: "Basic Math",
        description: "Strengthen your foundations",
        system_prompt: BASIC_MATH_PROMPT,
    },
];

/// Get all topic definitions, in display order
pub fn all_topics() -> &'static [Topic] {
    &TOPICS
}

/// Look up a topic by id or display name (case-insensitive)
pub fn find_topic(key: &str) -> Option<&'static Topic> {
    let key = key.trim();
    TOPICS
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(key) || t.display_name.eq_ignore_ascii_case(key))
}
