//! Competitive analysis generation

use crate::error::AssistError;
use crate::generator::{is_simulated, GenerationOptions, TextGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Characters of raw model output kept as recommendations
pub const RECOMMENDATION_EXCERPT_CHARS: usize = 500;

/// Per-dimension ratings on a 1-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    /// Feature breadth
    pub features: f64,
    /// User experience
    pub ux: f64,
    /// Performance
    pub performance: f64,
    /// Customer support
    pub support: f64,
    /// Integrations
    pub integration: f64,
}

/// One analysed competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    /// Competitor name
    pub name: String,
    /// Market share percentage, when known
    pub market_share: Option<u8>,
    /// Pricing summary, when known
    pub pricing: Option<String>,
    /// Ratings
    pub ratings: Ratings,
    /// Strengths
    pub strengths: Vec<String>,
    /// Weaknesses
    pub weaknesses: Vec<String>,
}

impl Competitor {
    fn known(
        name: &str,
        market_share: u8,
        pricing: &str,
        ratings: Ratings,
        strengths: &[&str],
        weaknesses: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            market_share: Some(market_share),
            pricing: Some(pricing.to_string()),
            ratings,
            strengths: strengths.iter().map(|s| (*s).to_string()).collect(),
            weaknesses: weaknesses.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Radar row for the ratings chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRow {
    /// Competitor name
    pub competitor: String,
    /// Ratings
    #[serde(flatten)]
    pub ratings: Ratings,
}

/// Full analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    /// Product being positioned
    pub product: String,
    /// Competitors analysed
    pub competitors: Vec<Competitor>,
    /// Strategy recommendations
    pub recommendations: Vec<String>,
}

impl CompetitiveAnalysis {
    /// Ratings for the radar chart
    #[must_use]
    pub fn rating_rows(&self) -> Vec<RatingRow> {
        self.competitors
            .iter()
            .map(|c| RatingRow {
                competitor: c.name.clone(),
                ratings: c.ratings,
            })
            .collect()
    }

    /// `(name, share)` pairs for competitors with a known market share
    #[must_use]
    pub fn market_share(&self) -> Vec<(&str, u8)> {
        self.competitors
            .iter()
            .filter_map(|c| c.market_share.map(|share| (c.name.as_str(), share)))
            .collect()
    }
}

/// Render the generation prompt
#[must_use]
pub fn prompt(competitors: &[String]) -> String {
    format!(
        "Analyze the following competitors and provide insights:\n\n\
         Competitors: {}\n\n\
         For each competitor, provide:\n\
         1. Key Strengths (3-4 points)\n\
         2. Weaknesses (3-4 points)\n\
         3. Feature comparison ratings (Features, UX, Performance, Integration, Support) on scale 1-10\n\
         4. Market positioning\n\n\
         Then provide strategic recommendations for our product.",
        competitors.join(", ")
    )
}

/// Competitive analysis generator over any text backend
#[derive(Clone)]
pub struct AnalysisGenerator {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
}

impl AnalysisGenerator {
    /// Create generator
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            options: GenerationOptions::default()
                .with_temperature(0.6)
                .with_max_tokens(2000),
        }
    }

    /// Analyse competitors for a product
    ///
    /// # Errors
    /// Propagates backend errors that were not absorbed by a fallback.
    pub async fn generate(
        &self,
        product: &str,
        competitors: &[String],
    ) -> Result<CompetitiveAnalysis, AssistError> {
        tracing::info!("Analysing {} competitors", competitors.len());
        let response = self
            .generator
            .generate(&prompt(competitors), &self.options)
            .await?;
        Ok(parse_response(&response, product, competitors))
    }
}

impl std::fmt::Debug for AnalysisGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisGenerator")
            .field("generator", &self.generator.name())
            .finish()
    }
}

/// Turn backend output into an analysis
#[must_use]
pub fn parse_response(response: &str, product: &str, competitors: &[String]) -> CompetitiveAnalysis {
    if is_simulated(response) {
        return sample_analysis(product);
    }

    let placeholder = Ratings {
        features: 8.0,
        ux: 7.0,
        performance: 8.0,
        support: 8.0,
        integration: 7.0,
    };
    CompetitiveAnalysis {
        product: product.to_string(),
        competitors: competitors
            .iter()
            .map(|name| Competitor {
                name: name.clone(),
                market_share: None,
                pricing: None,
                ratings: placeholder,
                strengths: vec!["Model-reported strength".to_string()],
                weaknesses: vec!["Model-reported weakness".to_string()],
            })
            .collect(),
        recommendations: vec![response.chars().take(RECOMMENDATION_EXCERPT_CHARS).collect()],
    }
}

/// Canned four-competitor market snapshot
#[must_use]
pub fn sample_analysis(product: &str) -> CompetitiveAnalysis {
    CompetitiveAnalysis {
        product: product.to_string(),
        competitors: vec![
            Competitor::known(
                "Asana",
                28,
                "$10.99/user/month",
                Ratings { features: 8.5, ux: 9.0, performance: 8.0, support: 7.5, integration: 9.5 },
                &["Excellent UX", "Strong integrations", "Robust features"],
                &["Expensive at scale", "Learning curve for advanced features"],
            ),
            Competitor::known(
                "Monday.com",
                24,
                "$9/user/month",
                Ratings { features: 9.0, ux: 8.5, performance: 8.5, support: 8.0, integration: 8.5 },
                &["Highly customizable", "Great visualizations", "Good value"],
                &["Can feel overwhelming", "Performance issues with large boards"],
            ),
            Competitor::known(
                "Trello",
                22,
                "$5/user/month",
                Ratings { features: 6.5, ux: 9.5, performance: 9.0, support: 6.5, integration: 7.5 },
                &["Very simple to use", "Affordable", "Fast performance"],
                &["Limited features", "Not suitable for complex projects"],
            ),
            Competitor::known(
                "ClickUp",
                18,
                "$7/user/month",
                Ratings { features: 9.5, ux: 7.0, performance: 7.0, support: 7.5, integration: 8.0 },
                &["Feature-rich", "Competitive pricing", "All-in-one solution"],
                &["Complex UI", "Steep learning curve"],
            ),
        ],
        recommendations: [
            "Focus on AI-powered automation to differentiate from competitors",
            "Offer competitive pricing between $6-8/user/month",
            "Prioritize UX simplicity while maintaining powerful features",
            "Build strong integration ecosystem from day one",
            "Provide excellent onboarding and customer support",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect(),
    }
}
