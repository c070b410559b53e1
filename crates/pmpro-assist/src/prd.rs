//! Product requirements document generation
//!
//! Real model output is split into numbered sections. Simulated output
//! yields the eight-section template filled from the brief.

use crate::error::AssistError;
use crate::generator::{is_simulated, GenerationOptions, TextGenerator};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Title used when the brief has no product name
pub const UNTITLED: &str = "Untitled Product";

/// Product information collected from the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductBrief {
    /// Product name
    pub product_name: String,
    /// Problem being solved
    pub problem_statement: String,
    /// Intended users
    pub target_audience: String,
    /// Free-text feature list
    pub key_features: String,
    /// Free-text competitor list
    pub competitors: String,
    /// Free-text delivery timeline
    pub timeline: String,
}

impl ProductBrief {
    /// Create a brief with only a product name
    #[inline]
    #[must_use]
    pub fn named(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            ..Self::default()
        }
    }

    /// Render the generation prompt
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Generate a comprehensive Product Requirements Document (PRD) for the following product:\n\n\
             Product Name: {}\n\
             Problem Statement: {}\n\
             Target Audience: {}\n\
             Key Features: {}\n\
             Competitors: {}\n\
             Timeline: {}\n\n\
             Please structure the PRD with the following sections:\n\
             1. Executive Summary (2-3 paragraphs)\n\
             2. Problem Statement (detailed analysis)\n\
             3. Target Users & Personas (define 2-3 user personas)\n\
             4. Key Features & Requirements (detailed feature list)\n\
             5. Success Metrics & KPIs (measurable goals)\n\
             6. Competitive Analysis (comparison with competitors)\n\
             7. Timeline & Milestones (phased approach)\n\
             8. Risks & Mitigation (identify key risks)\n\n\
             Format each section clearly and provide actionable details.",
            self.product_name,
            self.problem_statement,
            self.target_audience,
            self.key_features,
            self.competitors,
            self.timeline,
        )
    }

    fn title(&self) -> String {
        if self.product_name.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.product_name.clone()
        }
    }
}

/// One titled PRD section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdSection {
    /// Numbered heading, e.g. `1. Executive Summary`
    pub title: String,
    /// Body text
    pub content: String,
}

impl PrdSection {
    fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdDocument {
    /// Document title
    pub title: String,
    /// Sections in order
    pub sections: Vec<PrdSection>,
    /// Generation time
    pub generated_at: DateTime<Utc>,
}

impl PrdDocument {
    /// Render as markdown
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let body = self
            .sections
            .iter()
            .map(|s| format!("## {}\n\n{}", s.title, s.content))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("# {}\n\n{}", self.title, body)
    }

    /// Download file name: whitespace runs become `-`, plus `.md`
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem = self.title.split_whitespace().collect::<Vec<_>>().join("-");
        format!("{stem}.md")
    }
}

/// PRD generator over any text backend
#[derive(Clone)]
pub struct PrdGenerator {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
}

impl PrdGenerator {
    /// Create generator
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            options: GenerationOptions::default()
                .with_temperature(0.7)
                .with_max_tokens(3000),
        }
    }

    /// Generate a PRD for a brief
    ///
    /// # Errors
    /// Propagates backend errors that were not absorbed by a fallback.
    pub async fn generate(&self, brief: &ProductBrief) -> Result<PrdDocument, AssistError> {
        tracing::info!("Generating PRD for {}", brief.title());
        let response = self.generator.generate(&brief.prompt(), &self.options).await?;
        Ok(parse_response(&response, brief, Utc::now()))
    }
}

impl std::fmt::Debug for PrdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrdGenerator")
            .field("generator", &self.generator.name())
            .field("options", &self.options)
            .finish()
    }
}

/// Turn backend output into a document
#[must_use]
pub fn parse_response(
    response: &str,
    brief: &ProductBrief,
    generated_at: DateTime<Utc>,
) -> PrdDocument {
    let sections = if is_simulated(response) {
        templated_sections(brief)
    } else {
        split_sections(response)
    };

    PrdDocument {
        title: brief.title(),
        sections,
        generated_at,
    }
}

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s+[A-Z]").expect("valid section heading regex"));

static HEADING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s+").expect("valid heading prefix regex"));

/// Split model output wherever `N. Capital` begins
///
/// A marker can start anywhere in a line, and every digit of a multi-digit
/// number starts its own marker, so `10. Appendix` yields a one-character
/// chunk `1` followed by `0. Appendix`. Chunk numbering counts every chunk,
/// including a leading preamble and the digit fragments that are later
/// dropped for having no body.
#[must_use]
pub fn split_sections(response: &str) -> Vec<PrdSection> {
    let mut starts: Vec<usize> = Vec::new();
    for m in SECTION_HEADING.find_iter(response) {
        let digits = m.as_str().bytes().take_while(u8::is_ascii_digit).count();
        starts.extend(m.start()..m.start() + digits);
    }
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }
    starts.push(response.len());

    starts
        .windows(2)
        .map(|w| &response[w[0]..w[1]])
        .enumerate()
        .filter_map(|(index, chunk)| {
            let mut lines = chunk.split('\n');
            let heading = lines.next().unwrap_or_default();
            let heading = HEADING_PREFIX.replace(heading, "");
            let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();
            if content.is_empty() {
                return None;
            }
            Some(PrdSection::new(
                format!("{}. {}", index + 1, heading.trim_end()),
                content,
            ))
        })
        .collect()
}

/// Eight-section template filled from the brief
#[must_use]
pub fn templated_sections(brief: &ProductBrief) -> Vec<PrdSection> {
    let problem = if brief.problem_statement.is_empty() {
        "Define the core problem this product solves".to_string()
    } else {
        brief.problem_statement.clone()
    };

    vec![
        PrdSection::new(
            "1. Executive Summary",
            format!(
                "{} addresses {} for {}. By leveraging {}, we aim to differentiate from {} and deliver exceptional value.",
                brief.product_name,
                brief.problem_statement,
                brief.target_audience,
                brief.key_features,
                brief.competitors
            ),
        ),
        PrdSection::new("2. Problem Statement", problem),
        PrdSection::new(
            "3. Target Users & Personas",
            format!(
                "Primary Audience: {}\n\n\
                 Persona 1: Tech-Savvy Professional\n- Values efficiency and innovation\n- Seeks seamless experiences\n\n\
                 Persona 2: Business Decision Maker\n- Focuses on ROI and scalability\n- Requires reliability and support",
                brief.target_audience
            ),
        ),
        PrdSection::new(
            "4. Key Features & Requirements",
            format!(
                "{}\n\nTechnical Requirements:\n- Cloud-native architecture\n- RESTful API\n\
                 - Mobile-responsive design\n- Enterprise security\n- Real-time analytics",
                brief.key_features
            ),
        ),
        PrdSection::new(
            "5. Success Metrics & KPIs",
            "- User Acquisition: 10K users in Q1\n- Engagement: 60% DAU/MAU\n- NPS Score: >50\n\
             - ARR: $500K by year-end\n- Feature Adoption: 70%",
        ),
        PrdSection::new(
            "6. Competitive Analysis",
            format!(
                "Competitors: {}\n\nOur Advantages:\n- Superior UX/UI\n- AI-powered features\n\
                 - Competitive pricing\n- Faster deployment\n- Better support",
                brief.competitors
            ),
        ),
        PrdSection::new(
            "7. Timeline & Milestones",
            format!(
                "Timeline: {}\n\nPhase 1 (Months 1-2): Discovery\nPhase 2 (Months 3-4): MVP Development\n\
                 Phase 3 (Month 5): Beta Testing\nPhase 4 (Month 6): Launch",
                brief.timeline
            ),
        ),
        PrdSection::new(
            "8. Risks & Mitigation",
            "Risk: Market Competition\nMitigation: Unique AI features\n\n\
             Risk: Technical Complexity\nMitigation: Phased rollout\n\n\
             Risk: User Adoption\nMitigation: Onboarding program",
        ),
    ]
}
