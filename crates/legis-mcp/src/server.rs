/// MCP server exposing the legislation checker.
///
/// Exposes three tools:
/// - `analyze_document`: run the deterministic pipeline over a PDF on disk
/// - `check_text`: run the same pipeline over already-extracted text
/// - `refine_document`: ask the LLM for the section map and rule list of a PDF
use std::path::{Path, PathBuf};
use std::sync::Arc;

use legis_analysis::extract::extract_text_from_path;
use legis_analysis::{
    analyze_text, clean::clean_text, DocumentAnalysis, RefinedAnalysis, Refiner, RuleResult,
    SectionMap,
};
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

#[derive(Clone)]
pub struct LegisServer {
    refiner: Arc<Refiner>,
    document_root: Option<PathBuf>,
    tool_router: ToolRouter<LegisServer>,
}

impl LegisServer {
    pub fn new(refiner: Arc<Refiner>, document_root: Option<PathBuf>) -> Self {
        Self {
            refiner,
            document_root,
            tool_router: Self::tool_router(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AppError> {
        let canonical = std::fs::canonicalize(path).map_err(|source| AppError::Path {
            path: path.to_string(),
            source,
        })?;
        match &self.document_root {
            Some(root) if !canonical.starts_with(root) => {
                Err(AppError::OutsideRoot(canonical.display().to_string()))
            }
            _ => Ok(canonical),
        }
    }

    async fn read_document(&self, path: &str) -> Result<String, AppError> {
        let path = self.resolve(path)?;
        info!(path = %path.display(), "extracting document");
        let raw = tokio::task::spawn_blocking(move || extract_text_from_path(Path::new(&path)))
            .await??;
        Ok(raw)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AnalyzeDocumentParams {
    /// Path to a PDF file.
    path: String,
    /// Include the full cleaned text in the response (default: false).
    include_text: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckTextParams {
    /// Raw text extracted from a legislative document.
    text: String,
    /// Include the full cleaned text in the response (default: false).
    include_text: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RefineDocumentParams {
    /// Path to a PDF file.
    path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct AnalysisReport {
    /// First 4000 characters of the cleaned text.
    preview: String,
    cleaned_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleaned_text: Option<String>,
    summary: Vec<String>,
    sections: SectionMap,
    rule_checks: Vec<RuleResult>,
}

impl AnalysisReport {
    fn new(analysis: DocumentAnalysis, include_text: bool) -> Self {
        Self {
            preview: analysis.preview().to_string(),
            cleaned_chars: analysis.cleaned_text.chars().count(),
            cleaned_text: include_text.then_some(analysis.cleaned_text),
            summary: analysis.summary,
            sections: analysis.sections,
            rule_checks: analysis.rule_checks,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
struct RefineResponse {
    /// JSON returned by the model; expected to hold `task3` and `task4`.
    response: RefinedAnalysis,
}

#[tool_router]
impl LegisServer {
    #[tool(description = "Extract, clean and segment a legislative PDF, then run the six-rule checklist. Returns a text preview, a fixed summary, the seven extracted sections and the rule results.")]
    async fn analyze_document(
        &self,
        Parameters(params): Parameters<AnalyzeDocumentParams>,
    ) -> Result<Json<AnalysisReport>, String> {
        let path = params.path.trim().to_string();
        if path.is_empty() {
            return Err("path must not be empty".to_string());
        }
        let raw = self
            .read_document(&path)
            .await
            .map_err(|e| format!("analyze_document failed: {e}"))?;
        let analysis = analyze_text(&raw);
        Ok(Json(AnalysisReport::new(
            analysis,
            params.include_text.unwrap_or(false),
        )))
    }

    #[tool(description = "Run the section extraction and six-rule checklist over raw legislative text that was already extracted from a document.")]
    async fn check_text(
        &self,
        Parameters(params): Parameters<CheckTextParams>,
    ) -> Result<Json<AnalysisReport>, String> {
        if params.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        let analysis = analyze_text(&params.text);
        Ok(Json(AnalysisReport::new(
            analysis,
            params.include_text.unwrap_or(false),
        )))
    }

    #[tool(description = "Send a legislative PDF's cleaned text to the configured Anthropic model and return its JSON answer (task3 sections, task4 rule checks). Requires ANTHROPIC_API_KEY. The result is independent of analyze_document.")]
    async fn refine_document(
        &self,
        Parameters(params): Parameters<RefineDocumentParams>,
    ) -> Result<Json<RefineResponse>, String> {
        let path = params.path.trim().to_string();
        if path.is_empty() {
            return Err("path must not be empty".to_string());
        }
        let raw = self
            .read_document(&path)
            .await
            .map_err(|e| format!("refine_document failed: {e}"))?;
        let cleaned = clean_text(&raw);
        let response = self
            .refiner
            .refine(&cleaned)
            .await
            .map_err(AppError::from)
            .map_err(|e| format!("refine_document failed: {e}"))?;
        Ok(Json(RefineResponse { response }))
    }
}

#[tool_handler]
impl ServerHandler for LegisServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "legis-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Legislation checker MCP server. Use analyze_document for a PDF on disk or \
check_text for text you already have; both return the seven keyword-extracted sections \
(definitions, obligations, responsibilities, eligibility, payments, penalties, record_keeping) \
and six pass/fail rule checks. refine_document asks an LLM for the same structure."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use legis_analysis::model::truncate_chars;
    use legis_analysis::RefineSettings;
    use legis_common::anthropic::{AnthropicClient, AnthropicClientConfig};

    use super::*;

    fn server(document_root: Option<PathBuf>) -> LegisServer {
        let client = AnthropicClient::new(AnthropicClientConfig::default()).expect("client");
        let refiner = Arc::new(Refiner::new(client, RefineSettings::default()));
        LegisServer::new(refiner, document_root)
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = LegisServer::tool_router().list_all();
        for name in ["analyze_document", "check_text", "refine_document"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[test]
    fn report_truncates_unless_text_requested() {
        let analysis = analyze_text(&"Schedule 1 definition ".repeat(400));
        let report = AnalysisReport::new(analysis.clone(), false);
        assert_eq!(report.preview.chars().count(), 4000);
        assert!(report.cleaned_text.is_none());
        assert_eq!(report.cleaned_chars, analysis.cleaned_text.chars().count());

        let full = AnalysisReport::new(analysis.clone(), true);
        assert_eq!(full.cleaned_text.as_deref(), Some(analysis.cleaned_text.as_str()));
        assert_eq!(truncate_chars(&analysis.cleaned_text, 4000), full.preview);
    }

    #[tokio::test]
    async fn check_text_rejects_blank_input() {
        let result = server(None)
            .check_text(Parameters(CheckTextParams {
                text: "   ".to_string(),
                include_text: None,
            }))
            .await;
        assert_eq!(result.err().as_deref(), Some("text must not be empty"));
    }

    #[tokio::test]
    async fn check_text_runs_the_checklist() {
        let Json(report) = server(None)
            .check_text(Parameters(CheckTextParams {
                text: "The Secretary of State must exercise powers under Schedule 1.".to_string(),
                include_text: None,
            }))
            .await
            .expect("check_text");
        assert_eq!(report.rule_checks.len(), 6);
        assert!(!report.sections.definitions.is_empty());
        assert!(!report.sections.obligations.is_empty());
        assert!(report.sections.penalties.is_empty());
    }

    #[test]
    fn paths_outside_root_are_rejected() {
        let root = std::env::temp_dir().join(format!("legis-root-{}", std::process::id()));
        std::fs::create_dir_all(&root).expect("create root");
        let root = std::fs::canonicalize(&root).expect("canonical root");
        let server = server(Some(root.clone()));

        let inside = root.join("act.pdf");
        std::fs::write(&inside, b"not a pdf").expect("write");
        assert!(server.resolve(inside.to_str().expect("utf8 path")).is_ok());

        let err = server.resolve("/").expect_err("root dir is outside");
        assert!(matches!(err, AppError::OutsideRoot(_)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn refine_reports_unreadable_path() {
        let dir = std::env::temp_dir().join(format!("legis-refine-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let missing = dir.join("missing.pdf");
        let result = server(None)
            .refine_document(Parameters(RefineDocumentParams {
                path: missing.display().to_string(),
            }))
            .await;
        // Unreadable input fails before the credential is consulted.
        let err = result.err().expect("should fail");
        assert!(err.starts_with("refine_document failed: cannot resolve"), "got {err}");
        std::fs::remove_dir_all(&dir).ok();
    }
}
