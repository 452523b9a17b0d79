use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCard {
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<&'static str>,
    pub name: &'static str,
    pub value: String,
}
