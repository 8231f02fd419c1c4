use yew::prelude::*;

/// One of the four upload tools. The workflow is identical across them:
/// acquire a PDF, post it as multipart form data, render the payload. Only
/// the endpoint, the auxiliary inputs and the result rendering vary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToolKind {
    Detect,
    Extract,
    AutoGenerate,
    ImportAi,
}

impl ToolKind {
    pub fn title(&self) -> &'static str {
        match self {
            ToolKind::Detect => "Detect template",
            ToolKind::Extract => "Extract data",
            ToolKind::AutoGenerate => "Auto-generate template",
            ToolKind::ImportAi => "AI import",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ToolKind::Detect => "/ml/detect-template",
            ToolKind::Extract => "/ml/extract-data",
            ToolKind::AutoGenerate => "/ml/auto-generate-template",
            ToolKind::ImportAi => "/pdf/import-ai",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            ToolKind::Detect => "Identify which saved template a filled PDF belongs to.",
            ToolKind::Extract => "Pull field values out of a filled PDF.",
            ToolKind::AutoGenerate => "Build a template draft from a blank form PDF.",
            ToolKind::ImportAi => "Let the layout model propose fields for a PDF.",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadToolProps {
    pub kind: ToolKind,
}
