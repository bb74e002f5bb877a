use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::infrastructure::llm_clients::LLMClient;

/// Prospect fields the model is asked to reason about. All optional so the
/// endpoints accept partial payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A recent-activity line fed into intent analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDigest {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadScore {
    pub score: i64,
    pub reasoning: String,
    pub intent_signals: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachDraft {
    pub subject: String,
    pub email_body: String,
    pub personalized_opening: String,
    pub call_to_action: String,
}

/// AI lead intelligence. Every operation degrades to a usable default when
/// the model is unreachable or returns garbage; callers never see an error.
pub struct LeadIntel {
    llm: Arc<dyn LLMClient>,
}

impl LeadIntel {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub async fn score_lead(&self, prospect: &ProspectProfile) -> LeadScore {
        match self.score_lead_inner(prospect).await {
            Ok(score) => score,
            Err(e) => {
                tracing::error!(error = %e, "lead scoring failed, degrading to default");
                LeadScore {
                    score: 50,
                    reasoning: "Error occurred during AI analysis".to_string(),
                    intent_signals: Vec::new(),
                    confidence: 0.1,
                }
            }
        }
    }

    async fn score_lead_inner(&self, prospect: &ProspectProfile) -> Result<LeadScore> {
        let system = "You are an AI lead scoring expert for enterprise B2B marketing software. \
                      Analyze prospects and provide accurate scoring based on their fit for \
                      outbound marketing tools.";
        let user = format!(
            "Analyze this prospect and provide a lead score from 0-100 based on their fit for \
             enterprise B2B outbound marketing software. Consider company size, revenue, title, \
             industry, and any intent signals.\n\n\
             Prospect Data:\n\
             - Name: {} {}\n\
             - Company: {}\n\
             - Title: {}\n\
             - Industry: {}\n\
             - Company Size: {}\n\
             - Revenue: {}\n\
             - Location: {}\n\n\
             Provide your analysis in JSON format with the following structure:\n\
             {{\n\
               \"score\": number (0-100),\n\
               \"reasoning\": \"detailed explanation of the score\",\n\
               \"intentSignals\": [\"signal1\", \"signal2\", ...],\n\
               \"confidence\": number (0-1)\n\
             }}",
            prospect.first_name,
            prospect.last_name,
            prospect.company,
            prospect.title,
            or_unknown(&prospect.industry),
            or_unknown(&prospect.company_size),
            or_unknown(&prospect.revenue),
            or_unknown(&prospect.location),
        );

        let reply = self.llm.generate_json(system, &user).await?;
        Ok(LeadScore {
            score: reply["score"].as_i64().unwrap_or(0).clamp(0, 100),
            reasoning: reply["reasoning"]
                .as_str()
                .unwrap_or("No reasoning provided")
                .to_string(),
            intent_signals: string_array(&reply["intentSignals"]),
            confidence: reply["confidence"].as_f64().unwrap_or(0.5).clamp(0.0, 1.0),
        })
    }

    pub async fn generate_outreach(
        &self,
        prospect: &ProspectProfile,
        sequence_type: &str,
    ) -> OutreachDraft {
        match self.generate_outreach_inner(prospect, sequence_type).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::error!(error = %e, "outreach generation failed, degrading to default");
                OutreachDraft {
                    subject: "Error generating subject".to_string(),
                    email_body: "Error generating email body".to_string(),
                    personalized_opening: "Error generating opening".to_string(),
                    call_to_action: "Error generating CTA".to_string(),
                }
            }
        }
    }

    async fn generate_outreach_inner(
        &self,
        prospect: &ProspectProfile,
        sequence_type: &str,
    ) -> Result<OutreachDraft> {
        let system = "You are an expert B2B copywriter specializing in personalized outreach for \
                      marketing technology. Create engaging, relevant emails that resonate with \
                      enterprise decision makers.";
        let user = format!(
            "Create a personalized outreach email for this prospect for an AI-powered outbound \
             marketing platform. The email should be professional, relevant, and focused on \
             their specific role and company.\n\n\
             Prospect Details:\n\
             - Name: {} {}\n\
             - Company: {}\n\
             - Title: {}\n\
             - Industry: {}\n\n\
             Sequence Type: {}\n\n\
             Generate a personalized email with:\n\
             1. A compelling subject line\n\
             2. Personalized opening that shows research\n\
             3. Value proposition relevant to their role\n\
             4. Clear call to action\n\n\
             Provide the response in JSON format:\n\
             {{\n\
               \"subject\": \"email subject line\",\n\
               \"emailBody\": \"full email body\",\n\
               \"personalizedOpening\": \"personalized first paragraph\",\n\
               \"callToAction\": \"specific call to action\"\n\
             }}",
            prospect.first_name,
            prospect.last_name,
            prospect.company,
            prospect.title,
            prospect.industry.as_deref().unwrap_or("Technology"),
            sequence_type,
        );

        let reply = self.llm.generate_json(system, &user).await?;
        Ok(OutreachDraft {
            subject: reply["subject"]
                .as_str()
                .unwrap_or("Partnership Opportunity")
                .to_string(),
            email_body: reply["emailBody"]
                .as_str()
                .unwrap_or("Generic email body")
                .to_string(),
            personalized_opening: reply["personalizedOpening"]
                .as_str()
                .unwrap_or("Hello")
                .to_string(),
            call_to_action: reply["callToAction"]
                .as_str()
                .unwrap_or("Let's connect")
                .to_string(),
        })
    }

    pub async fn analyze_intent(
        &self,
        prospect: &ProspectProfile,
        recent_activity: &[ActivityDigest],
    ) -> Vec<String> {
        match self.analyze_intent_inner(prospect, recent_activity).await {
            Ok(signals) => signals,
            Err(e) => {
                tracing::error!(error = %e, "intent analysis failed, returning no signals");
                Vec::new()
            }
        }
    }

    async fn analyze_intent_inner(
        &self,
        prospect: &ProspectProfile,
        recent_activity: &[ActivityDigest],
    ) -> Result<Vec<String>> {
        let system = "You are an expert at identifying buyer intent signals for B2B marketing \
                      software. Analyze prospect behavior and profile to identify indicators \
                      of purchase intent.";
        let activity_lines = recent_activity
            .iter()
            .map(|a| format!("- {}: {}", a.kind, a.description))
            .collect::<Vec<_>>()
            .join("\n");
        let user = format!(
            "Analyze this prospect's recent activity and profile to identify intent signals for \
             B2B marketing software. Look for signals that indicate they might be interested in \
             outbound marketing automation, lead generation, or sales enablement tools.\n\n\
             Prospect Profile:\n\
             - Company: {}\n\
             - Title: {}\n\
             - Industry: {}\n\n\
             Recent Activity:\n{}\n\n\
             Identify potential intent signals and return them as a JSON array of strings:\n\
             {{\n\
               \"intentSignals\": [\"signal1\", \"signal2\", ...]\n\
             }}",
            prospect.company,
            prospect.title,
            or_unknown(&prospect.industry),
            activity_lines,
        );

        let reply = self.llm.generate_json(system, &user).await?;
        Ok(string_array(&reply["intentSignals"]))
    }
}

fn or_unknown(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("Unknown")
}

fn string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::error::AppError;

    struct CannedClient(String);

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct DownClient;

    #[async_trait]
    impl LLMClient for DownClient {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(AppError::LLMError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn score_is_clamped_into_range() {
        let intel = LeadIntel::new(Arc::new(CannedClient(
            r#"{"score": 140, "reasoning": "strong fit", "intentSignals": ["hiring SDRs"], "confidence": 1.4}"#.to_string(),
        )));

        let score = intel.score_lead(&ProspectProfile::default()).await;
        assert_eq!(score.score, 100);
        assert_eq!(score.confidence, 1.0);
        assert_eq!(score.intent_signals, vec!["hiring SDRs".to_string()]);
    }

    #[tokio::test]
    async fn scoring_degrades_when_model_is_down() {
        let intel = LeadIntel::new(Arc::new(DownClient));

        let score = intel.score_lead(&ProspectProfile::default()).await;
        assert_eq!(score.score, 50);
        assert_eq!(score.reasoning, "Error occurred during AI analysis");
        assert!(score.intent_signals.is_empty());
        assert_eq!(score.confidence, 0.1);
    }

    #[tokio::test]
    async fn outreach_fills_missing_fields_with_defaults() {
        let intel = LeadIntel::new(Arc::new(CannedClient(
            r#"{"subject": "Scaling outbound at Acme"}"#.to_string(),
        )));

        let draft = intel
            .generate_outreach(&ProspectProfile::default(), "email")
            .await;
        assert_eq!(draft.subject, "Scaling outbound at Acme");
        assert_eq!(draft.email_body, "Generic email body");
        assert_eq!(draft.call_to_action, "Let's connect");
    }

    #[tokio::test]
    async fn intent_analysis_is_empty_on_failure() {
        let intel = LeadIntel::new(Arc::new(DownClient));
        let signals = intel
            .analyze_intent(&ProspectProfile::default(), &[])
            .await;
        assert!(signals.is_empty());
    }
}
