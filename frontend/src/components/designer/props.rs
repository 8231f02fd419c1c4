use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DesignerProps {
    /// Template to open when the designer mounts. When `None`, the
    /// `?template=<id>` URL query is consulted instead; failing that the
    /// designer starts with an empty canvas.
    #[prop_or_default]
    pub template_id: Option<String>,
}
