use serde::Serialize;
use utoipa::ToSchema;

/// Envelope metadata. `redirect_to` carries the navigation signal a view emits
/// (checkout -> `/payment`, payment -> `/confirmation`, confirmation -> `/`).
#[derive(Debug, Serialize, ToSchema, Clone, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl Meta {
    pub fn new(total: usize, shown: usize) -> Self {
        Self {
            total: Some(total),
            shown: Some(shown),
            redirect_to: None,
        }
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            redirect_to: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.redirect_to.as_deref())
    }
}
